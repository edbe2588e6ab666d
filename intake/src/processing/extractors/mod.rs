use crate::error::{IntakeError, Result};
use crate::models::{RecordContent, Table};

/// Output of a single extractor, before it is wrapped into a record.
#[derive(Debug)]
pub struct Extraction {
    pub content: RecordContent,
    pub base64: Option<String>,
    pub text: String,
}

pub mod csv;
pub mod docx;
pub mod image;
pub mod pdf;
pub mod text;
pub mod xlsx;

pub use self::csv::CsvExtractor;
pub use docx::DocxExtractor;
pub use image::ImageExtractor;
pub use pdf::PdfExtractor;
pub use text::TextExtractor;
pub use xlsx::XlsxExtractor;

/// Serialize the header row plus the first `max_rows` data rows as CSV.
pub(crate) fn preview_as_csv(table: &Table, max_rows: usize) -> Result<String> {
    let mut writer = ::csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    if !table.headers.is_empty() {
        writer
            .write_record(&table.headers)
            .map_err(|e| IntakeError::Processing(format!("Failed to write CSV preview: {e}")))?;
    }
    for row in table.rows.iter().take(max_rows) {
        writer
            .write_record(row)
            .map_err(|e| IntakeError::Processing(format!("Failed to write CSV preview: {e}")))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| IntakeError::Processing(format!("Failed to flush CSV preview: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| IntakeError::Processing(format!("CSV preview is not UTF-8: {e}")))
}
