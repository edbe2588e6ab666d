use std::path::Path;

use super::{preview_as_csv, Extraction};
use crate::config::ExtractionConfig;
use crate::error::{IntakeError, Result};
use crate::models::{RecordContent, Table};
use crate::processing::encoding::decode_text;

/// Extractor for CSV and TSV files.
pub struct CsvExtractor;

impl CsvExtractor {
    /// Decode, parse into a table and build a row-capped text preview.
    pub fn extract(bytes: &[u8], filename: &str, config: &ExtractionConfig) -> Result<Extraction> {
        let (decoded, encoding) = decode_text(bytes)?;

        if decoded.trim().is_empty() {
            return Err(IntakeError::Processing("Empty CSV file".to_string()));
        }

        let delimiter = if is_tsv(filename) {
            b'\t'
        } else {
            detect_delimiter(decoded.as_bytes())
        };

        let table = parse_table(decoded.as_bytes(), delimiter)?;
        tracing::debug!(
            filename,
            ?encoding,
            rows = table.row_count(),
            columns = table.column_count(),
            "Parsed delimited file"
        );

        let mut text = format!(
            "CSV: {} rows x {} columns\n\n",
            table.row_count(),
            table.column_count()
        );
        text.push_str(&preview_as_csv(&table, config.preview_rows)?);

        Ok(Extraction {
            content: RecordContent::Table(table),
            base64: None,
            text,
        })
    }
}

fn is_tsv(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("tsv"))
}

fn parse_table(bytes: &[u8], delimiter: u8) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| IntakeError::Processing(format!("Failed to read CSV headers: {e}")))?
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>();

    if headers.is_empty() {
        return Err(IntakeError::Processing("CSV has no headers".to_string()));
    }

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        let record = result
            .map_err(|e| IntakeError::Processing(format!("Failed to read CSV record: {e}")))?;
        let mut row: Vec<String> = record.iter().map(|f| f.to_string()).collect();
        // Short rows are padded so every row spans the header.
        if row.len() < headers.len() {
            row.resize(headers.len(), String::new());
        }
        rows.push(row);
    }

    Ok(Table { headers, rows })
}

/// Auto-detect delimiter by trying common delimiters and picking the one
/// that produces the most consistent number of columns
fn detect_delimiter(bytes: &[u8]) -> u8 {
    let candidates = [b',', b';', b'\t'];
    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delimiter in &candidates {
        let score = evaluate_delimiter(bytes, delimiter);
        if score > best_score {
            best_score = score;
            best_delimiter = delimiter;
        }
    }

    best_delimiter
}

/// Higher is better; zero when the delimiter never splits a line.
fn evaluate_delimiter(bytes: &[u8], delimiter: u8) -> usize {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(bytes);

    let mut column_counts: Vec<usize> = Vec::new();

    if let Ok(headers) = reader.headers() {
        column_counts.push(headers.len());
    }

    for record in reader.records().take(5).flatten() {
        column_counts.push(record.len());
    }

    let Some(&first_count) = column_counts.first() else {
        return 0;
    };

    let consistent = column_counts.iter().all(|&c| c == first_count);
    let has_multiple_columns = first_count > 1;

    if consistent && has_multiple_columns {
        first_count * 10
    } else if has_multiple_columns {
        first_count
    } else {
        0
    }
}
