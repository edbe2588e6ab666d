use std::io::Cursor;

use base64::Engine;

use super::Extraction;
use crate::error::{IntakeError, Result};
use crate::models::RecordContent;

pub struct ImageExtractor;

impl ImageExtractor {
    /// Pass the bytes through as base64 and describe the image.
    ///
    /// Only the header is decoded: enough to reject files that are not
    /// images and to report dimensions and format.
    pub fn extract(bytes: &[u8]) -> Result<Extraction> {
        let reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| IntakeError::Processing(format!("Image read error: {e}")))?;

        let format = reader
            .format()
            .ok_or_else(|| IntakeError::Processing("Unrecognized image format".to_string()))?;

        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| IntakeError::Processing(format!("Image decode error: {e}")))?;

        let format_name = format!("{format:?}").to_uppercase();

        Ok(Extraction {
            content: RecordContent::binary(bytes.to_vec()),
            base64: Some(base64::engine::general_purpose::STANDARD.encode(bytes)),
            text: format!("Image: {width}x{height}px, {format_name}"),
        })
    }
}
