//! DTOs for `POST /api/v1/files:process`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{FileCategory, FileRecord, RecordContent};
use crate::processing::{AiPayload, NamedTable};

/// Wire form of a processed file.
///
/// `category` is `null` for files whose extension is not supported. A record
/// carries either `text` (and `base64` for images and PDFs) or `error`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileRecordResponse {
    pub filename: String,
    pub category: Option<FileCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Size of the original upload in bytes, when the record keeps the raw file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<FileRecord> for FileRecordResponse {
    fn from(record: FileRecord) -> Self {
        let size = match &record.content {
            Some(RecordContent::Binary { size, .. }) => Some(*size),
            _ => None,
        };

        Self {
            filename: record.filename,
            category: record.category,
            mime_type: record.mime_type,
            size,
            text: record.text,
            base64: record.base64,
            error: record.error,
        }
    }
}

/// A CSV file or workbook sheet. Named `file` or `file:sheet`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableResponse {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub row_count: usize,
    pub column_count: usize,
}

impl From<NamedTable<'_>> for TableResponse {
    fn from(named: NamedTable<'_>) -> Self {
        Self {
            name: named.name,
            headers: named.table.headers.clone(),
            rows: named.table.rows.clone(),
            row_count: named.table.row_count(),
            column_count: named.table.column_count(),
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessFilesResponse {
    pub batch_id: Uuid,
    pub processed_at: DateTime<Utc>,
    pub records: Vec<FileRecordResponse>,
    pub summary: String,
    pub payload: AiPayload,
    pub tables: Vec<TableResponse>,
}
