//! Tolerant JSON recovery from model replies.
//!
//! Models wrap JSON in code fences or surround it with prose despite being
//! told not to. Recovery: strip every fence marker, then take the substring
//! from the first `{` to the last `}`. If no brace pair exists the cleaned
//! text passes through unchanged and the parse error surfaces to the caller.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;

use reelscope_core::ReelError;

static FENCE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"```(?:json)?").expect("fence regex"));

/// Recover the JSON object embedded in a possibly messy reply.
pub fn extract_json(raw: &str) -> String {
    let cleaned = FENCE_MARKER.replace_all(raw, "");
    let cleaned = cleaned.trim();
    match (cleaned.find('{'), cleaned.rfind('}')) {
        (Some(first), Some(last)) if last > first => cleaned[first..=last].to_string(),
        _ => cleaned.to_string(),
    }
}

/// Extract and parse a reply into the expected document type.
///
/// Parse failure after extraction is terminal for the call: no retry, no
/// partial acceptance.
pub fn parse_reply<T: DeserializeOwned>(raw: &str) -> Result<T, ReelError> {
    let json = extract_json(raw);
    serde_json::from_str(&json).map_err(|e| ReelError::MalformedResponse(e.to_string()))
}
