//! Decodes sanitized model output into a JSON object.

use serde_json::{Map, Value};
use thiserror::Error;

/// The sanitized text is not a well-formed JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("model output is not a JSON object: {reason}")]
pub struct DecodeError {
    /// The offending text, as handed to the decoder.
    pub text: String,
    /// Parser diagnostic or description of the wrong top-level type.
    pub reason: String,
}

impl DecodeError {
    pub fn new(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reason: reason.into(),
        }
    }
}

/// Parses `clean_text` as a JSON object.
///
/// Fails when the text is malformed or when the top level is anything
/// other than an object.
pub fn decode(clean_text: &str) -> Result<Map<String, Value>, DecodeError> {
    let value: Value = serde_json::from_str(clean_text)
        .map_err(|e| DecodeError::new(clean_text, e.to_string()))?;

    match value {
        Value::Object(object) => Ok(object),
        other => Err(DecodeError::new(
            clean_text,
            format!("expected an object at top level, found {}", json_type(&other)),
        )),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
