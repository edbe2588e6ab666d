use base64::Engine;

use super::Extraction;
use crate::config::ExtractionConfig;
use crate::error::{IntakeError, Result};
use crate::models::RecordContent;

pub struct PdfExtractor;

impl PdfExtractor {
    /// Encode the whole document and pull text from the leading pages only.
    pub fn extract(bytes: &[u8], config: &ExtractionConfig) -> Result<Extraction> {
        if !bytes.starts_with(b"%PDF") {
            return Err(IntakeError::Processing(
                "PDF parse error: missing %PDF header".to_string(),
            ));
        }

        let doc = pdf_extract::Document::load_mem(bytes)
            .map_err(|e| IntakeError::Processing(format!("PDF parse error: {e}")))?;

        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        let pages: Vec<String> = page_numbers
            .iter()
            .take(config.pdf_max_pages)
            .map(|&page_num| Self::page_text(&doc, page_num))
            .collect();

        let text = Self::render_pages(&pages, page_numbers.len());
        tracing::debug!(
            pages = page_numbers.len(),
            max_pages = config.pdf_max_pages,
            "Extracted PDF text"
        );

        Ok(Extraction {
            content: RecordContent::binary(bytes.to_vec()),
            base64: Some(base64::engine::general_purpose::STANDARD.encode(bytes)),
            text,
        })
    }

    /// Text of one page. A page that fails to render counts as blank.
    fn page_text(doc: &pdf_extract::Document, page_num: u32) -> String {
        let mut text = String::new();

        // pdf-extract can panic on malformed fonts; keep that inside this page.
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut output = pdf_extract::PlainTextOutput::new(&mut text);
            pdf_extract::output_doc_page(doc, &mut output, page_num)
        }));

        match result {
            Ok(Ok(())) => text,
            Ok(Err(e)) => {
                tracing::warn!(page = page_num, error = %e, "Skipping unreadable PDF page");
                String::new()
            }
            Err(_panic) => {
                tracing::error!(
                    page = page_num,
                    "PDF page extraction panicked, likely a malformed font or glyph"
                );
                String::new()
            }
        }
    }

    /// `pages` holds the leading pages in order. Blank pages are skipped but
    /// keep their 1-based number in the headers of the pages that follow.
    fn render_pages(pages: &[String], total_pages: usize) -> String {
        let parts: Vec<String> = pages
            .iter()
            .enumerate()
            .filter_map(|(i, page)| {
                let page = page.trim();
                (!page.is_empty()).then(|| format!("--- Page {} ---\n{}", i + 1, page))
            })
            .collect();

        if parts.is_empty() {
            format!("PDF: {total_pages} pages (no extractable text)")
        } else {
            parts.join("\n\n")
        }
    }
}
