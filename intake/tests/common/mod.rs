//! In-memory fixture builders shared by the integration tests.
#![allow(dead_code)]

use std::io::{Cursor, Write};

/// A .docx with one paragraph per entry. Empty entries become blank paragraphs.
pub fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
    use docx_rs::*;

    let docx = paragraphs.iter().fold(Docx::new(), |docx, text| {
        docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)))
    });

    let mut buffer = Cursor::new(Vec::new());
    docx.build().pack(&mut buffer).expect("Failed to pack DOCX");
    buffer.into_inner()
}

/// A workbook with one sheet per `(name, data_rows)` entry.
///
/// Every sheet has the header row `Month,Units` followed by `data_rows` rows
/// of `M{n},{n * 10}`.
pub fn xlsx_workbook(sheets: &[(&str, usize)]) -> Vec<u8> {
    use zip::write::FileOptions;
    use zip::CompressionMethod;

    let mut buffer = Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut buffer);
        let options: FileOptions<zip::write::ExtendedFileOptions> = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);

        zip.start_file("[Content_Types].xml", options.clone())
            .unwrap();
        zip.write_all(content_types_xml(sheets.len()).as_bytes())
            .unwrap();

        zip.start_file("_rels/.rels", options.clone()).unwrap();
        zip.write_all(RELS_XLSX.as_bytes()).unwrap();

        zip.start_file("xl/workbook.xml", options.clone()).unwrap();
        zip.write_all(workbook_xml(sheets).as_bytes()).unwrap();

        zip.start_file("xl/_rels/workbook.xml.rels", options.clone())
            .unwrap();
        zip.write_all(workbook_rels_xml(sheets.len()).as_bytes())
            .unwrap();

        for (index, (_, data_rows)) in sheets.iter().enumerate() {
            zip.start_file(format!("xl/worksheets/sheet{}.xml", index + 1), options.clone())
                .unwrap();
            zip.write_all(sheet_xml(*data_rows).as_bytes()).unwrap();
        }

        zip.finish().unwrap();
    }

    buffer.into_inner()
}

fn content_types_xml(sheet_count: usize) -> String {
    let overrides: String = (1..=sheet_count)
        .map(|n| {
            format!(
                r#"<Override PartName="/xl/worksheets/sheet{n}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    {overrides}
</Types>"#
    )
}

const RELS_XLSX: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

fn workbook_xml(sheets: &[(&str, usize)]) -> String {
    let entries: String = sheets
        .iter()
        .enumerate()
        .map(|(index, (name, _))| {
            let n = index + 1;
            format!(r#"<sheet name="{name}" sheetId="{n}" r:id="rId{n}"/>"#)
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>{entries}</sheets>
</workbook>"#
    )
}

fn workbook_rels_xml(sheet_count: usize) -> String {
    let relationships: String = (1..=sheet_count)
        .map(|n| {
            format!(
                r#"<Relationship Id="rId{n}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{n}.xml"/>"#
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    {relationships}
</Relationships>"#
    )
}

fn sheet_xml(data_rows: usize) -> String {
    let mut rows = String::from(
        r#"<row r="1"><c r="A1" t="inlineStr"><is><t>Month</t></is></c><c r="B1" t="inlineStr"><is><t>Units</t></is></c></row>"#,
    );
    for n in 1..=data_rows {
        let r = n + 1;
        let units = n * 10;
        rows.push_str(&format!(
            r#"<row r="{r}"><c r="A{r}" t="inlineStr"><is><t>M{n}</t></is></c><c r="B{r}"><v>{units}</v></c></row>"#
        ));
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <sheetData>{rows}</sheetData>
</worksheet>"#
    )
}

/// A PDF with one page per entry, each page drawing its text in Courier.
pub fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    let pages: Vec<(&str, &str)> = pages.iter().map(|text| ("F1", *text)).collect();
    pdf_with_fonts(&pages)
}

/// Like [`pdf_with_pages`], but each page selects the font resource it
/// names. Only `F1` is defined, so any other name leaves the page broken.
pub fn pdf_with_fonts(pages: &[(&str, &str)]) -> Vec<u8> {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for (font, text) in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec![Object::Name(font.as_bytes().to_vec()), 24.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("Failed to encode page content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => pages.len() as i64,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    doc.save_to(&mut out).expect("Failed to write PDF");
    out
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    use image::{DynamicImage, ImageFormat};

    let img = DynamicImage::new_rgb8(width, height);
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .expect("Failed to encode PNG");
    out
}

pub fn shift_jis(text: &str) -> Vec<u8> {
    let (encoded, _, had_errors) = encoding_rs::SHIFT_JIS.encode(text);
    assert!(!had_errors, "text not representable in Shift-JIS");
    encoded.into_owned()
}
