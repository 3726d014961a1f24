//! Response envelope returned to the game client.
//!
//! Every reply from the gateway, success or failure, is one of these two
//! shapes. On success `data` carries the NPC reply as a JSON *string*, not a
//! nested object; the game client decodes it a second time.

use serde::{Deserialize, Serialize};

/// Message for a request without a usable `txt` field.
pub const MISSING_TXT_MESSAGE: &str = "Missing 'txt' field in JSON request body.";

/// Message returned while the upstream client is not configured.
pub const CLIENT_NOT_INITIALIZED_MESSAGE: &str =
    "API client is not initialized (Missing API Key).";

/// Prefix for failures reported by the upstream model service.
pub const UPSTREAM_ERROR_PREFIX: &str = "Gemini API Error: ";

/// Prefix for every other failure.
pub const UNEXPECTED_ERROR_PREFIX: &str = "Unexpected Error: ";

/// Uniform reply envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum ResponseEnvelope {
    /// The upstream call succeeded
    #[serde(rename = "OK")]
    Ok {
        /// Schema-conforming NPC reply, forwarded verbatim as a string
        data: String,
    },
    /// Something failed; `message` is safe to show to the caller
    #[serde(rename = "ERROR")]
    Error { message: String },
}

impl ResponseEnvelope {
    pub fn ok(data: impl Into<String>) -> Self {
        ResponseEnvelope::Ok { data: data.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ResponseEnvelope::Error {
            message: message.into(),
        }
    }

    pub fn missing_txt() -> Self {
        Self::error(MISSING_TXT_MESSAGE)
    }

    pub fn client_not_initialized() -> Self {
        Self::error(CLIENT_NOT_INITIALIZED_MESSAGE)
    }

    pub fn upstream_error(detail: impl std::fmt::Display) -> Self {
        Self::error(format!("{UPSTREAM_ERROR_PREFIX}{detail}"))
    }

    pub fn unexpected_error(detail: impl std::fmt::Display) -> Self {
        Self::error(format!("{UNEXPECTED_ERROR_PREFIX}{detail}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_keeps_data_as_string() {
        let data = r#"{"text":"hi","newIntimacy":5}"#;
        let value = serde_json::to_value(ResponseEnvelope::ok(data)).unwrap();

        assert_eq!(value, json!({ "status": "OK", "data": data }));
        assert!(value["data"].is_string());
    }

    #[test]
    fn error_has_message_and_no_data() {
        let value = serde_json::to_value(ResponseEnvelope::missing_txt()).unwrap();

        assert_eq!(
            value,
            json!({
                "status": "ERROR",
                "message": "Missing 'txt' field in JSON request body."
            })
        );
    }

    #[test]
    fn prefixes_are_applied() {
        assert_eq!(
            ResponseEnvelope::upstream_error("quota exceeded"),
            ResponseEnvelope::error("Gemini API Error: quota exceeded")
        );
        assert_eq!(
            ResponseEnvelope::unexpected_error("connection reset"),
            ResponseEnvelope::error("Unexpected Error: connection reset")
        );
    }

    #[test]
    fn decodes_from_wire() {
        let envelope: ResponseEnvelope = serde_json::from_str(
            r#"{"status":"ERROR","message":"API client is not initialized (Missing API Key)."}"#,
        )
        .unwrap();

        assert_eq!(envelope, ResponseEnvelope::client_not_initialized());
    }
}
