use std::borrow::Cow;

use encoding_rs::SHIFT_JIS;

use crate::error::{IntakeError, Result};

/// Source encoding a byte buffer was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    ShiftJis,
}

/// Strip UTF-8 BOM if present
pub fn strip_bom(bytes: &[u8]) -> &[u8] {
    if bytes.len() >= 3 && bytes[0..3] == [0xEF, 0xBB, 0xBF] {
        &bytes[3..]
    } else {
        bytes
    }
}

/// Decode as UTF-8, falling back to Shift-JIS. Fails when neither decodes
/// without replacement characters.
pub fn decode_text(bytes: &[u8]) -> Result<(Cow<'_, str>, TextEncoding)> {
    let bytes = strip_bom(bytes);

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok((Cow::Borrowed(text), TextEncoding::Utf8));
    }

    match SHIFT_JIS.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => {
            tracing::debug!("Decoded input as Shift-JIS");
            Ok((text, TextEncoding::ShiftJis))
        }
        None => Err(IntakeError::Encoding(
            "Content is neither valid UTF-8 nor Shift-JIS".to_string(),
        )),
    }
}
