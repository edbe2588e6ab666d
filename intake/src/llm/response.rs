//! Recovery of JSON from free-form model replies.
//!
//! Models wrap JSON in markdown fences, add prose around it, fall back to
//! Python-style quoting, or get cut off mid-array when they hit the token
//! limit. [`parse_json_response`] handles each of these before giving up.

use regex::Regex;
use serde_json::Value;

use crate::error::{IntakeError, Result};

const PREVIEW_CHARS: usize = 200;

/// Pull the first JSON object or array out of a model reply.
pub fn parse_json_response(reply: &str) -> Result<Value> {
    let text = strip_code_fence(reply.trim())?;

    let starts: Vec<usize> = text.match_indices(['{', '[']).map(|(idx, _)| idx).collect();
    let Some(&first) = starts.first() else {
        return Err(IntakeError::Validation(
            "No JSON object found in reply".to_string(),
        ));
    };

    // Bracketed prose such as "[draft]" can precede the real value, so each
    // later opening bracket gets its own attempt.
    for (attempt, &start) in starts.iter().enumerate() {
        let candidate = &text[start..];

        if let Some(value) = parse_candidate(candidate) {
            if attempt > 0 {
                tracing::debug!(skipped = start, "Parsed reply after skipping leading text");
            }
            return Ok(value);
        }

        if let Some(value) = repair_truncated_ideas(candidate) {
            tracing::warn!("Reply was truncated; recovered the complete entries");
            return Ok(value);
        }
    }

    let candidate = &text[first..];
    let preview: String = candidate.chars().take(PREVIEW_CHARS).collect();
    Err(IntakeError::Validation(format!(
        "Failed to parse JSON reply: {preview}..."
    )))
}

/// Parse `candidate` as is, then with Python-style single quotes swapped.
fn parse_candidate(candidate: &str) -> Option<Value> {
    if let Some(value) = parse_leading_value(candidate) {
        return Some(value);
    }

    if candidate.contains('\'') && !candidate.contains('"') {
        let normalized = candidate.replace('\'', "\"");
        if let Some(value) = parse_leading_value(&normalized) {
            tracing::debug!("Parsed reply after normalizing single quotes");
            return Some(value);
        }
    }

    None
}

/// Contents of the first ```` ```json ```` block, else of the first plain
/// fenced block, else the text unchanged.
fn strip_code_fence(text: &str) -> Result<&str> {
    let pattern = if text.contains("```json") {
        r"```json\s*([\s\S]*?)```"
    } else if text.contains("```") {
        r"```\s*([\s\S]*?)```"
    } else {
        return Ok(text);
    };

    let fence = Regex::new(pattern)
        .map_err(|e| IntakeError::Internal(format!("Invalid fence pattern: {e}")))?;

    Ok(fence
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .unwrap_or(text))
}

/// Parse one JSON value from the start of `text`, ignoring whatever follows.
fn parse_leading_value(text: &str) -> Option<Value> {
    serde_json::Deserializer::from_str(text)
        .into_iter::<Value>()
        .next()
        .and_then(|value| value.ok())
}

/// Close an `"ideas"` array that was cut off mid-element.
fn repair_truncated_ideas(text: &str) -> Option<Value> {
    if !text.contains("\"ideas\"") || text.matches('[').count() <= text.matches(']').count() {
        return None;
    }

    let close = |end: usize| serde_json::from_str::<Value>(&format!("{}]}}", &text[..=end])).ok();

    text.rfind("},")
        .filter(|&idx| idx > 0)
        .and_then(close)
        .or_else(|| text.rfind('}').filter(|&idx| idx > 0).and_then(close))
}
