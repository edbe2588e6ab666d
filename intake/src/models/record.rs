use serde::Serialize;

use super::FileCategory;

/// One file as received from the client, before any processing.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }
}

/// Rows of string cells with a header row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sheet {
    pub name: String,
    pub table: Table,
}

/// The category-specific payload kept on a successful record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RecordContent {
    /// Raw file bytes. Only the size goes on the wire; the bytes travel as base64.
    Binary {
        #[serde(skip)]
        bytes: Vec<u8>,
        size: usize,
    },
    Table(Table),
    Workbook(Vec<Sheet>),
    Text(String),
}

impl RecordContent {
    pub fn binary(bytes: Vec<u8>) -> Self {
        let size = bytes.len();
        Self::Binary { bytes, size }
    }
}

/// Normalized representation of one uploaded file.
///
/// A record is either extracted (payload fields set, `error` empty) or
/// failed (`error` set, every payload field empty). The constructors are
/// the only way this crate builds records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub filename: String,
    pub category: Option<FileCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<RecordContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileRecord {
    pub fn extracted(
        filename: impl Into<String>,
        category: FileCategory,
        content: RecordContent,
        base64: Option<String>,
        text: String,
    ) -> Self {
        let filename = filename.into();
        let mime_type = guess_mime(&filename);
        Self {
            filename,
            category: Some(category),
            mime_type,
            content: Some(content),
            base64,
            text: Some(text),
            error: None,
        }
    }

    pub fn failed(
        filename: impl Into<String>,
        category: Option<FileCategory>,
        error: impl Into<String>,
    ) -> Self {
        let filename = filename.into();
        let mime_type = guess_mime(&filename);
        Self {
            filename,
            category,
            mime_type,
            content: None,
            base64: None,
            text: None,
            error: Some(error.into()),
        }
    }

    /// A record is failed exactly when it carries a non-empty error.
    pub fn has_error(&self) -> bool {
        self.error.as_deref().is_some_and(|e| !e.is_empty())
    }

    pub fn is_ok(&self) -> bool {
        !self.has_error()
    }

    /// Label used in summaries: the category name or `"unsupported"`.
    pub fn category_label(&self) -> &'static str {
        self.category
            .map(FileCategory::as_str)
            .unwrap_or(crate::processing::UNSUPPORTED)
    }
}

fn guess_mime(filename: &str) -> Option<String> {
    mime_guess::from_path(filename)
        .first_raw()
        .map(str::to_string)
}
