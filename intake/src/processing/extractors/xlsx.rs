use super::{preview_as_csv, Extraction};
use crate::config::ExtractionConfig;
use crate::error::{IntakeError, Result};
use crate::models::{RecordContent, Sheet, Table};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use std::io::Cursor;

/// Extractor for `.xlsx` and legacy `.xls` workbooks.
pub struct XlsxExtractor;

impl XlsxExtractor {
    const MAX_ROWS: usize = 100_000;

    /// Load every sheet; only the first `excel_max_sheets` reach the text.
    pub fn extract(bytes: &[u8], config: &ExtractionConfig) -> Result<Extraction> {
        let cursor = Cursor::new(bytes);
        let mut workbook = open_workbook_auto_from_rs(cursor)
            .map_err(|e| IntakeError::Processing(format!("Excel parse error: {e}")))?;

        let sheets: Vec<Sheet> = workbook
            .worksheets()
            .into_iter()
            .map(|(name, range)| Sheet {
                table: Self::range_to_table(&name, &range),
                name,
            })
            .collect();

        let mut blocks: Vec<String> = Vec::new();
        for sheet in sheets.iter().take(config.excel_max_sheets) {
            let preview = preview_as_csv(&sheet.table, config.preview_rows)?;
            blocks.push(format!("=== Sheet: {} ===", sheet.name));
            blocks.push(preview);
        }

        if sheets.len() > config.excel_max_sheets {
            tracing::debug!(
                total = sheets.len(),
                shown = config.excel_max_sheets,
                "Workbook has more sheets than the text preview covers"
            );
        }

        Ok(Extraction {
            content: RecordContent::Workbook(sheets),
            base64: None,
            text: blocks.join("\n\n"),
        })
    }

    /// First row becomes the header row.
    fn range_to_table(name: &str, range: &Range<Data>) -> Table {
        let (rows, cols) = range.get_size();
        if rows == 0 || cols == 0 {
            return Table::default();
        }

        // Guard against pathological files with excessive rows
        let row_limit = rows.min(Self::MAX_ROWS);
        if rows > Self::MAX_ROWS {
            tracing::warn!(
                sheet = name,
                rows,
                kept = Self::MAX_ROWS,
                "Sheet truncated"
            );
        }

        let mut table_rows = range.rows().take(row_limit).map(|row| {
            row.iter()
                .map(|cell| Self::format_cell_value(Some(cell)))
                .collect::<Vec<_>>()
        });

        let headers = table_rows.next().unwrap_or_default();
        Table {
            headers,
            rows: table_rows.collect(),
        }
    }

    fn format_cell_value(cell: Option<&Data>) -> String {
        match cell {
            Some(Data::String(s)) => s.clone(),
            Some(Data::Int(i)) => i.to_string(),
            Some(Data::Float(f)) => {
                // Format float nicely - remove trailing zeros
                let s = format!("{f}");
                if s.contains('.') {
                    s.trim_end_matches('0').trim_end_matches('.').to_string()
                } else {
                    s
                }
            }
            Some(Data::Bool(b)) => b.to_string(),
            Some(Data::DateTime(dt)) => dt.to_string(),
            Some(Data::DateTimeIso(dt)) => dt.to_string(),
            Some(Data::DurationIso(d)) => d.to_string(),
            Some(Data::Empty) | None => String::new(),
            _ => String::new(),
        }
    }
}
