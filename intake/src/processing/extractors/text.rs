use super::Extraction;
use crate::config::ExtractionConfig;
use crate::error::Result;
use crate::models::RecordContent;
use crate::processing::encoding::decode_text;

/// Plain text, Markdown and JSON files.
pub struct TextExtractor;

impl TextExtractor {
    pub fn extract(bytes: &[u8], config: &ExtractionConfig) -> Result<Extraction> {
        let (decoded, _) = decode_text(bytes)?;
        let full = decoded.into_owned();
        let text: String = full.chars().take(config.text_max_chars).collect();

        Ok(Extraction {
            content: RecordContent::Text(full),
            base64: None,
            text,
        })
    }
}
