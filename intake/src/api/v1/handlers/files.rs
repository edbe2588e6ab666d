use axum::extract::{Multipart, State};
use chrono::Utc;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::api::v1::dto::{FileRecordResponse, ProcessFilesResponse, TableResponse};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::error::IntakeError;
use crate::models::UploadedFile;
use crate::processing::{aggregate, collect_tables, create_summary};

/// `POST /api/v1/files:process`
///
/// Accepts a multipart form with one or more `file` fields and an optional
/// `maxImages` field. Every file is processed independently: a file that
/// cannot be read, or has an unsupported extension, comes back as a failed
/// record rather than failing the request.
#[utoipa::path(
    post,
    path = "/api/v1/files:process",
    tag = "files",
    operation_id = "files.process",
    request_body(content_type = "multipart/form-data", content = String, description = "One or more `file` fields, plus an optional `maxImages` field"),
    responses(
        (status = 200, description = "Batch processed", body = ProcessFilesResponse),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 401, description = "Missing or invalid API key", body = ApiError),
    )
)]
pub async fn process_files(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResponse<ProcessFilesResponse> {
    let max_file_size = state.config.upload.max_file_size;
    let max_files = state.config.upload.max_files;
    let image_cap = state.config.aggregation.max_images;

    let mut files: Vec<UploadedFile> = Vec::new();
    let mut max_images = image_cap;
    let mut skipped_files = 0usize;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return ApiResponse::error(
                    ErrorCode::InvalidRequest,
                    format!("Invalid multipart body: {e}"),
                );
            }
        };

        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" | "files" if files.len() >= max_files => {
                // Dropping the field lets multipart skip its bytes unbuffered.
                skipped_files += 1;
            }
            "file" | "files" => {
                let filename = match field.file_name() {
                    Some(filename) if !filename.trim().is_empty() => filename.to_string(),
                    _ => {
                        return ApiResponse::error(
                            ErrorCode::InvalidRequest,
                            "Every file field must carry a filename",
                        );
                    }
                };

                let bytes = match field.bytes().await {
                    Ok(b) => b,
                    Err(e) => {
                        return ApiResponse::error(
                            ErrorCode::InvalidRequest,
                            format!("Failed to read file {filename}: {e}"),
                        );
                    }
                };

                if bytes.len() > max_file_size {
                    return ApiResponse::error(
                        ErrorCode::InvalidRequest,
                        format!(
                            "File too large: {filename} is {} bytes (max {max_file_size} bytes)",
                            bytes.len()
                        ),
                    );
                }

                files.push(UploadedFile::new(filename, bytes.to_vec()));
            }
            "maxImages" | "max_images" => {
                let raw = match field.text().await {
                    Ok(t) => t,
                    Err(e) => {
                        return ApiResponse::error(
                            ErrorCode::InvalidRequest,
                            format!("Invalid maxImages value: {e}"),
                        );
                    }
                };
                match raw.trim().parse::<usize>() {
                    Ok(value) => max_images = value.min(image_cap),
                    Err(_) => {
                        return ApiResponse::error(
                            ErrorCode::InvalidRequest,
                            "maxImages must be a non-negative integer",
                        );
                    }
                }
            }
            _ => {}
        }
    }

    if files.is_empty() {
        return ApiResponse::error(ErrorCode::InvalidRequest, "Missing required 'file' field");
    }

    if skipped_files > 0 {
        tracing::warn!(
            skipped = skipped_files,
            max_files,
            "Too many files in upload; extra files were not read"
        );
    }

    let batch_id = Uuid::new_v4();
    tracing::info!(%batch_id, files = files.len(), max_images, "Processing upload batch");

    // Extraction is CPU-bound; keep it off the async workers.
    let processor = state.processor.clone();
    let records = match tokio::task::spawn_blocking(move || processor.process_batch(files)).await
    {
        Ok(records) => records,
        Err(e) => {
            return IntakeError::Internal(format!("Processing task failed: {e}")).into();
        }
    };

    let summary = create_summary(&records);
    let payload = aggregate(&records, max_images);
    let tables = collect_tables(&records)
        .into_iter()
        .map(TableResponse::from)
        .collect();

    ApiResponse::success(ProcessFilesResponse {
        batch_id,
        processed_at: Utc::now(),
        summary,
        payload,
        tables,
        records: records.into_iter().map(FileRecordResponse::from).collect(),
    })
}
