//! The NPC's next conversational state, as produced by the upstream model.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DomainError;
use crate::schema::{SchemaWarning, NONE_SENTINEL, NPC_RESPONSE_SCHEMA};
use crate::value_objects::Intimacy;

/// Structured NPC reply. Every field is mandatory.
///
/// `new_intimacy` is kept as the raw integer the model produced so a reply
/// with an out-of-range value can still be inspected; use
/// [`NpcResponse::intimacy`] for the checked value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpcResponse {
    /// Spoken reply only, no narration
    pub text: String,
    pub new_intimacy: i64,
    pub new_emotion: String,
    /// Current behavioral task, or `"none"`
    pub new_task: String,
    pub end_chat: bool,
    /// One of the caller-supplied destinations, or `"none"`
    pub new_destination: String,
    /// One of the caller-supplied tools, or `"none"`
    pub selected_tool: String,
}

/// Result of checking raw upstream text against the reply contract.
#[derive(Debug, Clone)]
pub struct CheckedReply {
    pub response: NpcResponse,
    pub warnings: Vec<SchemaWarning>,
}

impl NpcResponse {
    /// Parse and check upstream text against [`NPC_RESPONSE_SCHEMA`].
    ///
    /// Structural problems fail; out-of-range values are returned as
    /// warnings alongside the parsed reply.
    pub fn check(text: &str) -> Result<CheckedReply, DomainError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| DomainError::parse(e.to_string()))?;

        let warnings = NPC_RESPONSE_SCHEMA.validate(&value)?;

        let response: NpcResponse = serde_json::from_value(value)
            .map_err(|e| DomainError::schema_violation("$", e.to_string()))?;

        Ok(CheckedReply { response, warnings })
    }

    pub fn intimacy(&self) -> Result<Intimacy, DomainError> {
        Intimacy::new(self.new_intimacy)
    }

    /// Whether the NPC was told to head somewhere.
    pub fn moves(&self) -> bool {
        !is_none_sentinel(&self.new_destination)
    }

    pub fn uses_tool(&self) -> bool {
        !is_none_sentinel(&self.selected_tool)
    }

    pub fn has_task(&self) -> bool {
        !is_none_sentinel(&self.new_task)
    }
}

fn is_none_sentinel(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case(NONE_SENTINEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFORMING: &str = r#"{"text":"hi","newIntimacy":5,"newEmotion":"joy","newTask":"none","endChat":false,"newDestination":"none","selectedTool":"none"}"#;

    #[test]
    fn serialized_keys_match_schema() {
        let checked = NpcResponse::check(CONFORMING).unwrap();
        let value = serde_json::to_value(&checked.response).unwrap();

        let mut keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        let mut required = NPC_RESPONSE_SCHEMA.required();
        keys.sort_unstable();
        required.sort_unstable();

        assert_eq!(keys, required);
    }

    #[test]
    fn parses_conforming_reply() {
        let checked = NpcResponse::check(CONFORMING).unwrap();

        assert!(checked.warnings.is_empty());
        assert_eq!(checked.response.text, "hi");
        assert_eq!(checked.response.intimacy().map(|i| i.value()), Ok(5));
        assert!(!checked.response.end_chat);
        assert!(!checked.response.moves());
        assert!(!checked.response.uses_tool());
        assert!(!checked.response.has_task());
    }

    #[test]
    fn sentinel_is_case_insensitive() {
        let mut response = NpcResponse::check(CONFORMING).unwrap().response;
        response.new_destination = "None".to_string();
        assert!(!response.moves());

        response.new_destination = "bakery".to_string();
        assert!(response.moves());
    }

    #[test]
    fn not_json_is_parse_error() {
        let err = NpcResponse::check("Sure! Here you go").unwrap_err();
        assert!(matches!(err, DomainError::Parse(_)));
    }

    #[test]
    fn missing_field_is_schema_violation() {
        let err = NpcResponse::check(r#"{"text":"hi"}"#).unwrap_err();
        assert!(err.is_schema_violation());
    }

    #[test]
    fn out_of_range_intimacy_is_a_warning_not_an_error() {
        let text = CONFORMING.replace("\"newIntimacy\":5", "\"newIntimacy\":180");
        let checked = NpcResponse::check(&text).unwrap();

        assert_eq!(checked.warnings.len(), 1);
        assert!(checked.response.intimacy().is_err());
    }
}
