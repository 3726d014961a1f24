//! Request body sent by the game server.

use serde::{Deserialize, Serialize};

/// Body of `POST /`.
///
/// `txt` is the full prompt composed by the game server: NPC persona,
/// intimacy, destination list, tool list and the player's line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub txt: String,
}

impl ChatRequest {
    pub fn new(txt: impl Into<String>) -> Self {
        Self { txt: txt.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_unknown_fields() {
        let request: ChatRequest =
            serde_json::from_str(r#"{"txt":"hello","npcId":7}"#).unwrap();
        assert_eq!(request, ChatRequest::new("hello"));
    }

    #[test]
    fn txt_is_required() {
        assert!(serde_json::from_str::<ChatRequest>(r#"{"text":"hello"}"#).is_err());
    }
}
