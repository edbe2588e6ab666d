use intake::config::ExtractionConfig;
use intake::models::{RecordContent, Table};
use intake::processing::extractors::csv::CsvExtractor;

mod common;
use common::shift_jis;

fn table_of(content: &RecordContent) -> &Table {
    match content {
        RecordContent::Table(table) => table,
        other => panic!("expected a table, got {other:?}"),
    }
}

#[test]
fn test_csv_with_headers() {
    let csv_content = b"Name,Age,City\nAlice,30,New York\nBob,25,Los Angeles\n";
    let result = CsvExtractor::extract(csv_content, "people.csv", &ExtractionConfig::default());

    assert!(result.is_ok());
    let extracted = result.unwrap();

    assert!(extracted.text.starts_with("CSV: 2 rows x 3 columns\n\n"));
    assert!(extracted.text.contains("Name,Age,City\n"));
    assert!(extracted.text.contains("Bob,25,Los Angeles"));
    assert!(extracted.base64.is_none());

    let table = table_of(&extracted.content);
    assert_eq!(table.headers, vec!["Name", "Age", "City"]);
    assert_eq!(table.rows[0], vec!["Alice", "30", "New York"]);
}

#[test]
fn test_csv_preview_is_capped_but_table_is_complete() {
    let mut csv_content = String::from("id,value\n");
    for i in 1..=30 {
        csv_content.push_str(&format!("{i},v{i}\n"));
    }

    let extracted =
        CsvExtractor::extract(csv_content.as_bytes(), "big.csv", &ExtractionConfig::default())
            .unwrap();

    assert!(extracted.text.starts_with("CSV: 30 rows x 2 columns"));
    assert!(extracted.text.contains("20,v20"));
    assert!(!extracted.text.contains("21,v21"));
    assert_eq!(table_of(&extracted.content).row_count(), 30);
}

#[test]
fn test_csv_auto_delimiter_semicolon() {
    let csv_content = b"Name;Age;City\nAlice;30;Berlin\nBob;25;Paris";
    let extracted =
        CsvExtractor::extract(csv_content, "eu.csv", &ExtractionConfig::default()).unwrap();

    let table = table_of(&extracted.content);
    assert_eq!(table.column_count(), 3);
    assert_eq!(table.rows[1], vec!["Bob", "25", "Paris"]);
    // The preview is always written comma-separated.
    assert!(extracted.text.contains("Alice,30,Berlin"));
}

#[test]
fn test_tsv_extension_forces_tab_delimiter() {
    let tsv_content = b"title\tnote\nLaunch\tsoft, then hard\n";
    let extracted =
        CsvExtractor::extract(tsv_content, "plan.tsv", &ExtractionConfig::default()).unwrap();

    let table = table_of(&extracted.content);
    assert_eq!(table.headers, vec!["title", "note"]);
    assert_eq!(table.rows[0][1], "soft, then hard");
}

#[test]
fn test_shift_jis_csv_is_decoded() {
    let bytes = shift_jis("商品名,価格\nやかん,3980\n");
    let extracted =
        CsvExtractor::extract(&bytes, "products.csv", &ExtractionConfig::default()).unwrap();

    let table = table_of(&extracted.content);
    assert_eq!(table.headers, vec!["商品名", "価格"]);
    assert_eq!(table.rows[0], vec!["やかん", "3980"]);
    assert!(extracted.text.contains("商品名,価格"));
}

#[test]
fn test_csv_short_rows_are_padded() {
    let csv_content = b"a,b,c\n1,2,3\n4\n";
    let extracted =
        CsvExtractor::extract(csv_content, "ragged.csv", &ExtractionConfig::default()).unwrap();

    assert_eq!(table_of(&extracted.content).rows[1], vec!["4", "", ""]);
}

#[test]
fn test_csv_empty() {
    let result = CsvExtractor::extract(b"", "empty.csv", &ExtractionConfig::default());
    assert!(result.is_err());
}

#[test]
fn test_csv_undecodable_bytes_fail() {
    let result = CsvExtractor::extract(&[0xFF, 0xFF, 0xFF], "junk.csv", &ExtractionConfig::default());
    assert!(result.is_err());
}
