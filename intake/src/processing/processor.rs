use std::path::Path;

use crate::config::{ExtractionConfig, UploadConfig};
use crate::error::{IntakeError, Result};
use crate::models::{FileCategory, FileRecord, UploadedFile};
use crate::processing::dispatch::detect_category;
use crate::processing::extractors::{
    CsvExtractor, DocxExtractor, Extraction, ImageExtractor, PdfExtractor, TextExtractor,
    XlsxExtractor,
};

/// Turns uploaded files into records, one at a time, in upload order.
///
/// Nothing here fails at the batch level: every problem with a file ends
/// up in that file's record.
#[derive(Debug, Clone)]
pub struct FileProcessor {
    extraction: ExtractionConfig,
    max_files: usize,
}

impl FileProcessor {
    pub fn new(extraction: ExtractionConfig, upload: &UploadConfig) -> Self {
        Self {
            extraction,
            max_files: upload.max_files,
        }
    }

    pub fn process(&self, file: &UploadedFile) -> FileRecord {
        let filename = file.filename.as_str();

        let Some(category) = detect_category(filename) else {
            tracing::warn!(filename, "Rejected unsupported file type");
            return FileRecord::failed(
                filename,
                None,
                IntakeError::Unsupported(filename.to_string()).to_string(),
            );
        };

        tracing::debug!(filename, %category, size = file.bytes.len(), "Processing file");

        match self.extract(category, filename, &file.bytes) {
            Ok(extraction) => FileRecord::extracted(
                filename,
                category,
                extraction.content,
                extraction.base64,
                extraction.text,
            ),
            Err(e) => {
                tracing::warn!(filename, %category, error = %e, "File extraction failed");
                FileRecord::failed(filename, Some(category), e.to_string())
            }
        }
    }

    /// Process files in order; anything past the configured file cap is dropped.
    pub fn process_batch<I>(&self, files: I) -> Vec<FileRecord>
    where
        I: IntoIterator<Item = UploadedFile>,
    {
        let mut records = Vec::new();
        let mut dropped = 0usize;

        for file in files {
            if records.len() >= self.max_files {
                dropped += 1;
                continue;
            }
            records.push(self.process(&file));
        }

        if dropped > 0 {
            tracing::warn!(
                dropped,
                max_files = self.max_files,
                "Batch exceeded file limit; extra files ignored"
            );
        }

        let failed = records.iter().filter(|r| r.has_error()).count();
        tracing::info!(files = records.len(), failed, "Processed upload batch");

        records
    }

    /// Read a file from disk and process it under its file name.
    pub fn process_path(&self, path: &Path) -> FileRecord {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match std::fs::read(path) {
            Ok(bytes) => self.process(&UploadedFile::new(filename, bytes)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read file");
                FileRecord::failed(
                    filename.as_str(),
                    detect_category(&filename),
                    IntakeError::Io(e).to_string(),
                )
            }
        }
    }

    fn extract(&self, category: FileCategory, filename: &str, bytes: &[u8]) -> Result<Extraction> {
        match category {
            FileCategory::Image => ImageExtractor::extract(bytes),
            FileCategory::Pdf => PdfExtractor::extract(bytes, &self.extraction),
            FileCategory::Excel => XlsxExtractor::extract(bytes, &self.extraction),
            FileCategory::Csv => CsvExtractor::extract(bytes, filename, &self.extraction),
            FileCategory::Word => DocxExtractor::extract(bytes, &self.extraction),
            FileCategory::Text => TextExtractor::extract(bytes, &self.extraction),
        }
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new(ExtractionConfig::default(), &UploadConfig::default())
    }
}
