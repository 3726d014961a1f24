//! Common validation helpers for use cases.

use npcgate_shared::ChatRequest;
use serde_json::{Map, Value};

/// Validation error type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("request body is not a JSON object with a string {field_name}: {reason}")]
    Malformed {
        field_name: &'static str,
        reason: String,
    },

    #[error("{field_name} cannot be empty")]
    Empty { field_name: &'static str },
}

/// Validate a string is non-empty. Whitespace counts as content.
pub fn require_non_empty(value: &str, field_name: &'static str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field_name });
    }
    Ok(())
}

/// Parse a raw `POST /` body into a [`ChatRequest`].
///
/// Rejects anything that is not JSON, is not an object, lacks `txt`, has a
/// non-string `txt`, or has an empty `txt`. Other keys are ignored.
pub fn parse_chat_request(body: &[u8]) -> Result<ChatRequest, ValidationError> {
    // Objects only; the derived struct deserializer also takes a JSON sequence
    let object: Map<String, Value> =
        serde_json::from_slice(body).map_err(|e| ValidationError::Malformed {
            field_name: "txt",
            reason: e.to_string(),
        })?;

    let txt = match object.get("txt") {
        Some(Value::String(txt)) => txt,
        Some(other) => {
            return Err(ValidationError::Malformed {
                field_name: "txt",
                reason: format!("expected a string, found {}", json_kind(other)),
            })
        }
        None => {
            return Err(ValidationError::Malformed {
                field_name: "txt",
                reason: "field is missing".to_string(),
            })
        }
    };

    require_non_empty(txt, "txt")?;
    Ok(ChatRequest::new(txt.as_str()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Longest prefix of `text` holding at most `max_chars` characters.
///
/// Cuts on a character boundary, so arbitrary UTF-8 is safe to preview.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
