use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{FileCategory, FileRecord, RecordContent, Table};

/// What gets handed to a multimodal model: all extracted text in one
/// block plus a bounded list of base64 images.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct AiPayload {
    pub text: String,
    pub images: Vec<String>,
}

/// A table pulled out of a CSV file or one sheet of a workbook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedTable<'a> {
    pub name: String,
    pub table: &'a Table,
}

/// Concatenate the text of every successful record under a filename header.
pub fn extract_all_text(records: &[FileRecord]) -> String {
    records
        .iter()
        .filter(|record| !record.has_error())
        .filter_map(|record| {
            record
                .text
                .as_deref()
                .filter(|text| !text.is_empty())
                .map(|text| format!("=== {} ===\n{}", record.filename, text))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Base64 payloads of image records, in upload order, at most `max_images`.
pub fn images_for_ai(records: &[FileRecord], max_images: usize) -> Vec<String> {
    records
        .iter()
        .filter(|record| record.category == Some(FileCategory::Image) && !record.has_error())
        .filter_map(|record| record.base64.clone())
        .take(max_images)
        .collect()
}

pub fn aggregate(records: &[FileRecord], max_images: usize) -> AiPayload {
    AiPayload {
        text: extract_all_text(records),
        images: images_for_ai(records, max_images),
    }
}

pub fn create_summary(records: &[FileRecord]) -> String {
    if records.is_empty() {
        return "No files uploaded".to_string();
    }

    // Vec instead of a map so categories stay in first-seen order.
    let mut counts: Vec<(&'static str, usize)> = Vec::new();
    for record in records {
        let label = record.category_label();
        match counts.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((label, 1)),
        }
    }

    let mut lines = vec![format!("{} files total:", records.len())];
    lines.extend(
        counts
            .iter()
            .map(|(label, count)| format!("  {label}: {count}")),
    );

    let errors = records.iter().filter(|record| record.has_error()).count();
    if errors > 0 {
        lines.push(format!("\nErrors: {errors}"));
    }

    lines.join("\n")
}

/// Tables from successful CSV and Excel records. CSV tables are named after
/// the file, workbook sheets as `file:sheet`.
pub fn collect_tables(records: &[FileRecord]) -> Vec<NamedTable<'_>> {
    let mut tables = Vec::new();

    for record in records.iter().filter(|record| !record.has_error()) {
        match &record.content {
            Some(RecordContent::Table(table)) => tables.push(NamedTable {
                name: record.filename.clone(),
                table,
            }),
            Some(RecordContent::Workbook(sheets)) => {
                tables.extend(sheets.iter().map(|sheet| NamedTable {
                    name: format!("{}:{}", record.filename, sheet.name),
                    table: &sheet.table,
                }));
            }
            _ => {}
        }
    }

    tables
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sheet;
    use pretty_assertions::assert_eq;

    fn text_record(name: &str, text: &str) -> FileRecord {
        FileRecord::extracted(
            name,
            FileCategory::Text,
            RecordContent::Text(text.to_string()),
            None,
            text.to_string(),
        )
    }

    fn image_record(name: &str, payload: &str) -> FileRecord {
        FileRecord::extracted(
            name,
            FileCategory::Image,
            RecordContent::binary(vec![0u8; 4]),
            Some(payload.to_string()),
            "Image: 2x2px, PNG".to_string(),
        )
    }

    fn table(headers: &[&str]) -> Table {
        Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: vec![],
        }
    }

    #[test]
    fn test_extract_all_text_skips_failures_and_empty_text() {
        let records = vec![
            text_record("a.txt", "alpha"),
            FileRecord::failed("b.pdf", Some(FileCategory::Pdf), "broken"),
            text_record("empty.txt", ""),
            text_record("c.md", "gamma"),
        ];

        assert_eq!(
            extract_all_text(&records),
            "=== a.txt ===\nalpha\n\n=== c.md ===\ngamma"
        );
    }

    #[test]
    fn test_extract_all_text_empty_batch() {
        assert_eq!(extract_all_text(&[]), "");
    }

    #[test]
    fn test_images_are_capped_in_upload_order() {
        let records: Vec<_> = (0..7)
            .map(|i| image_record(&format!("img{i}.png"), &format!("b64-{i}")))
            .collect();

        let images = images_for_ai(&records, 5);
        assert_eq!(images, vec!["b64-0", "b64-1", "b64-2", "b64-3", "b64-4"]);
    }

    #[test]
    fn test_images_ignore_other_categories() {
        let pdf = FileRecord::extracted(
            "doc.pdf",
            FileCategory::Pdf,
            RecordContent::binary(vec![1]),
            Some("pdf-b64".to_string()),
            "--- Page 1 ---\nx".to_string(),
        );
        let records = vec![pdf, image_record("p.jpg", "jpg-b64")];

        assert_eq!(images_for_ai(&records, 5), vec!["jpg-b64"]);
    }

    #[test]
    fn test_aggregate_combines_text_and_images() {
        let records = vec![text_record("a.txt", "alpha"), image_record("p.png", "png")];
        let payload = aggregate(&records, 5);

        assert_eq!(payload.images, vec!["png"]);
        assert!(payload.text.contains("=== a.txt ===\nalpha"));
        assert!(payload.text.contains("=== p.png ===\nImage: 2x2px, PNG"));
    }

    #[test]
    fn test_summary_for_empty_batch() {
        assert_eq!(create_summary(&[]), "No files uploaded");
    }

    #[test]
    fn test_summary_counts_categories_and_errors() {
        let records = vec![
            text_record("a.txt", "alpha"),
            image_record("p.png", "png"),
            text_record("b.txt", "beta"),
            FileRecord::failed("x.zip", None, "Unsupported file type: x.zip"),
        ];

        assert_eq!(
            create_summary(&records),
            "4 files total:\n  text: 2\n  image: 1\n  unsupported: 1\n\nErrors: 1"
        );
    }

    #[test]
    fn test_collect_tables_names_sheets_and_csv() {
        let csv = FileRecord::extracted(
            "sales.csv",
            FileCategory::Csv,
            RecordContent::Table(table(&["id"])),
            None,
            "CSV".to_string(),
        );
        let workbook = FileRecord::extracted(
            "plan.xlsx",
            FileCategory::Excel,
            RecordContent::Workbook(vec![
                Sheet {
                    name: "Q1".to_string(),
                    table: table(&["month"]),
                },
                Sheet {
                    name: "Q2".to_string(),
                    table: table(&["month"]),
                },
            ]),
            None,
            "=== Sheet: Q1 ===".to_string(),
        );
        let records = vec![csv, text_record("n.txt", "x"), workbook];

        let names: Vec<_> = collect_tables(&records)
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["sales.csv", "plan.xlsx:Q1", "plan.xlsx:Q2"]);
    }
}
