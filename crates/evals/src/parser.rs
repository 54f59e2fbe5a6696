//! Extraction of structured predictions from free-form model output
//!
//! Models wrap their JSON in prose, markdown fences or trailing chatter. The
//! parser finds the first `{...}` span with no nested object and decodes it
//! strictly.

use intenteval_core::IntentLabel;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Why a model response could not be turned into a prediction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseParseError {
    #[error("No JSON object found in response")]
    NoStructureFound,

    #[error("JSON parse error: {0}")]
    DecodeError(String),

    #[error("Missing or non-boolean field: {0}")]
    MissingField(&'static str),

    #[error("Invalid confidence field: {0}")]
    InvalidConfidence(String),
}

impl ResponseParseError {
    /// Short stable name of the failure kind, used in reports
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoStructureFound => "no_structure_found",
            Self::DecodeError(_) => "decode_error",
            Self::MissingField(_) => "missing_field",
            Self::InvalidConfidence(_) => "invalid_confidence",
        }
    }
}

/// A successfully decoded classification
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedPrediction {
    pub is_search: bool,
    pub search_query: Option<String>,
    /// In [0, 1]
    pub confidence: f64,
    pub reasoning: String,
    pub intent_category: IntentLabel,
}

/// Brace span opened at byte offset `start`, if it closes without an inner `{`.
///
/// Braces inside string literals are ignored, and `\"` escapes are honored.
fn extract_flat_at(content: &str, start: usize) -> Option<&str> {
    let tail = content.get(start..)?;
    if !tail.starts_with('{') {
        return None;
    }

    let mut in_string = false;
    let mut escape_next = false;

    for (i, c) in tail.char_indices().skip(1) {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            // Nested object: a later candidate covers the inner span
            '{' => return None,
            '}' => return Some(&tail[..=i]),
            _ => {}
        }
    }

    None
}

/// Locate the first brace-delimited span that contains no nested object
pub fn find_object_span(content: &str) -> Option<&str> {
    content
        .match_indices('{')
        .find_map(|(pos, _)| extract_flat_at(content, pos))
}

/// Parse a raw model response into a prediction
///
/// Checks run in a fixed order: structure, JSON validity, `isSearch`,
/// then `confidence`. Missing `reasoning` becomes an empty string.
pub fn parse_response(raw: &str) -> Result<ParsedPrediction, ResponseParseError> {
    let span = find_object_span(raw).ok_or(ResponseParseError::NoStructureFound)?;

    let value: Value = serde_json::from_str(span)
        .map_err(|e| ResponseParseError::DecodeError(e.to_string()))?;

    let is_search = value
        .get("isSearch")
        .and_then(Value::as_bool)
        .ok_or(ResponseParseError::MissingField("isSearch"))?;

    let confidence = match value.get("confidence") {
        None | Some(Value::Null) => {
            return Err(ResponseParseError::InvalidConfidence(
                "missing".to_string(),
            ))
        }
        Some(raw_confidence) => {
            let confidence = raw_confidence.as_f64().ok_or_else(|| {
                ResponseParseError::InvalidConfidence(format!("not a number: {raw_confidence}"))
            })?;
            if !(0.0..=1.0).contains(&confidence) {
                return Err(ResponseParseError::InvalidConfidence(format!(
                    "{confidence} is outside [0, 1]"
                )));
            }
            confidence
        }
    };

    let search_query = value
        .get("searchQuery")
        .and_then(Value::as_str)
        .map(str::to_string);

    let reasoning = value
        .get("reasoning")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(ParsedPrediction {
        is_search,
        search_query,
        confidence,
        reasoning,
        intent_category: IntentLabel::from_is_search(is_search),
    })
}
