use std::io::Cursor;

use super::Extraction;
use crate::config::ExtractionConfig;
use crate::error::{IntakeError, Result};
use crate::models::RecordContent;

pub struct DocxExtractor;

impl DocxExtractor {
    pub fn extract(bytes: &[u8], config: &ExtractionConfig) -> Result<Extraction> {
        if !Self::is_ooxml_document(bytes) {
            return Err(IntakeError::Processing(
                "Word parse error: not a .docx package (legacy .doc files are not supported)"
                    .to_string(),
            ));
        }

        let docx = docx_rs::read_docx(bytes)
            .map_err(|e| IntakeError::Processing(format!("Word parse error: {e}")))?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                docx_rs::DocumentChild::Paragraph(paragraph) => {
                    Some(Self::extract_paragraph_text(paragraph))
                }
                _ => None,
            })
            // Scanning stops after the paragraph at index `word_max_paragraphs`.
            .take(config.word_max_paragraphs.saturating_add(1))
            .filter(|text| !text.trim().is_empty())
            .collect();

        let text = paragraphs.join("\n\n");

        Ok(Extraction {
            content: RecordContent::Text(text.clone()),
            base64: None,
            text,
        })
    }

    /// A .docx is a zip package carrying `word/document.xml`.
    fn is_ooxml_document(bytes: &[u8]) -> bool {
        if !bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]) {
            return false;
        }
        match zip::ZipArchive::new(Cursor::new(bytes)) {
            Ok(mut archive) => archive.by_name("word/document.xml").is_ok(),
            Err(_) => false,
        }
    }

    fn extract_paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
        let mut content = String::new();
        for para_child in &paragraph.children {
            if let docx_rs::ParagraphChild::Run(run) = para_child {
                for run_child in &run.children {
                    match run_child {
                        docx_rs::RunChild::Text(text) => content.push_str(&text.text),
                        docx_rs::RunChild::Tab(_) => content.push('\t'),
                        docx_rs::RunChild::Break(_) => content.push('\n'),
                        _ => {}
                    }
                }
            }
        }
        content
    }
}
