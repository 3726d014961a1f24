//! Generate NPC reply use case.
//!
//! Turns a raw request body from the game server into the NPC's next
//! conversational state, as schema-conforming JSON text. The caller (HTTP
//! handler) wraps the result in the response envelope.

use npcgate_domain::{NpcResponse, NPC_RESPONSE_SCHEMA};

use crate::infrastructure::ports::{CompletionClient, CompletionError, CompletionRequest};
use crate::prompt_templates::NPC_SYSTEM_INSTRUCTION;
use crate::use_cases::validation::{parse_chat_request, preview, ValidationError};

/// Characters of the prompt echoed into the logs.
const PROMPT_PREVIEW_CHARS: usize = 100;

/// Generate NPC reply use case.
///
/// Checks the upstream client is configured, validates the request body,
/// makes exactly one structured completion call and checks the reply
/// against the NPC response schema before handing it back verbatim.
pub struct GenerateNpcReply {
    client: CompletionClient,
}

impl GenerateNpcReply {
    pub fn new(client: CompletionClient) -> Self {
        Self { client }
    }

    pub fn is_available(&self) -> bool {
        self.client.is_available()
    }

    /// Build the completion request for a validated prompt.
    ///
    /// Policy and schema are fixed; only the prompt varies per call.
    pub fn build_request(prompt: &str) -> CompletionRequest {
        CompletionRequest::structured(
            prompt,
            NPC_SYSTEM_INSTRUCTION,
            NPC_RESPONSE_SCHEMA.to_json(),
        )
    }

    /// Produce the NPC reply for a raw request body.
    ///
    /// # Returns
    /// * `Ok(String)` - upstream JSON text, unmodified
    /// * `Err(NpcReplyError)` - classified failure for the envelope
    pub async fn execute(&self, body: &[u8]) -> Result<String, NpcReplyError> {
        // 1. Without a client nothing else matters, not even the body
        let Some(port) = self.client.port() else {
            tracing::warn!("Rejecting request: Gemini client not initialized (missing API key)");
            return Err(NpcReplyError::ClientNotInitialized);
        };

        // 2. Validate before any upstream side effect
        let request = parse_chat_request(body).inspect_err(|e| {
            tracing::info!(reason = %e, "Rejecting request without usable txt field");
        })?;

        tracing::info!(
            length = request.txt.chars().count(),
            preview = %preview(&request.txt, PROMPT_PREVIEW_CHARS),
            "Received prompt"
        );

        // 3. Single upstream attempt
        let response = port
            .generate(Self::build_request(&request.txt))
            .await
            .map_err(NpcReplyError::from_completion)?;

        if let Some(usage) = response.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "Gemini usage"
            );
        }

        // 4. Hold the reply to the schema before forwarding it untouched
        let checked = NpcResponse::check(&response.text).map_err(|e| {
            tracing::error!(
                error = ?e,
                raw_reply = %preview(&response.text, PROMPT_PREVIEW_CHARS),
                "Gemini reply does not match the NPC response schema"
            );
            NpcReplyError::Internal(format!(
                "model reply does not match the NPC response schema: {}",
                e
            ))
        })?;

        for warning in &checked.warnings {
            tracing::warn!(warning = %warning, "Gemini reply value out of range, forwarding as-is");
        }

        let reply = &checked.response;
        tracing::info!(
            end_chat = reply.end_chat,
            new_intimacy = reply.new_intimacy,
            new_emotion = %reply.new_emotion,
            has_task = reply.has_task(),
            moves = reply.moves(),
            new_destination = %reply.new_destination,
            uses_tool = reply.uses_tool(),
            selected_tool = %reply.selected_tool,
            "NPC reply generated"
        );

        Ok(response.text)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NpcReplyError {
    #[error("API client is not initialized")]
    ClientNotInitialized,
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    /// Failure reported by the upstream service; displays its message
    #[error("{0}")]
    Upstream(String),
    /// Anything else; displays a caller-safe description
    #[error("{0}")]
    Internal(String),
}

impl NpcReplyError {
    fn from_completion(error: CompletionError) -> Self {
        if error.is_upstream() {
            tracing::warn!(error = %error, "Gemini API error");
            Self::Upstream(error.to_string())
        } else {
            tracing::error!(error = ?error, "Unexpected error calling Gemini");
            Self::Internal(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{CompletionResponse, MockCompletionPort};
    use std::sync::Arc;
    use std::time::Duration;

    const CONFORMING: &str = r#"{"text":"hi","newIntimacy":5,"newEmotion":"joy","newTask":"none","endChat":false,"newDestination":"none","selectedTool":"none"}"#;

    fn use_case(port: MockCompletionPort) -> GenerateNpcReply {
        GenerateNpcReply::new(CompletionClient::available(Arc::new(port)))
    }

    #[tokio::test]
    async fn forwards_reply_verbatim() {
        let mut port = MockCompletionPort::new();
        port.expect_generate()
            .times(1)
            .returning(|_| Ok(CompletionResponse::text(CONFORMING)));

        let reply = use_case(port).execute(br#"{"txt":"hello"}"#).await.unwrap();

        assert_eq!(reply, CONFORMING);
    }

    #[tokio::test]
    async fn sends_fixed_policy_and_schema() {
        let mut port = MockCompletionPort::new();
        port.expect_generate()
            .times(1)
            .withf(|request| {
                request.prompt == "Player: where is the bakery?"
                    && request.system_instruction == NPC_SYSTEM_INSTRUCTION
                    && request.response_mime_type == "application/json"
                    && request.response_schema == NPC_RESPONSE_SCHEMA.to_json()
            })
            .returning(|_| Ok(CompletionResponse::text(CONFORMING)));

        let result = use_case(port)
            .execute(br#"{"txt":"Player: where is the bakery?"}"#)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn invalid_body_never_reaches_upstream() {
        let mut port = MockCompletionPort::new();
        port.expect_generate().never();

        let use_case = use_case(port);
        let bodies: [&[u8]; 5] = [
            b"not json",
            b"{}",
            br#"{"txt":""}"#,
            br#"{"txt":7}"#,
            br#"["hello"]"#,
        ];
        for body in bodies {
            let err = use_case.execute(body).await.unwrap_err();
            assert!(matches!(err, NpcReplyError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn unavailable_client_short_circuits_even_bad_bodies() {
        let use_case = GenerateNpcReply::new(CompletionClient::Unavailable);

        assert!(!use_case.is_available());
        assert!(matches!(
            use_case.execute(br#"{"txt":"hello"}"#).await,
            Err(NpcReplyError::ClientNotInitialized)
        ));
        assert!(matches!(
            use_case.execute(b"garbage").await,
            Err(NpcReplyError::ClientNotInitialized)
        ));
    }

    #[tokio::test]
    async fn upstream_error_keeps_upstream_message() {
        let mut port = MockCompletionPort::new();
        port.expect_generate()
            .times(1)
            .returning(|_| Err(CompletionError::api(Some(429), "quota exceeded")));

        let err = use_case(port).execute(br#"{"txt":"hello"}"#).await.unwrap_err();

        assert!(matches!(&err, NpcReplyError::Upstream(_)));
        assert_eq!(err.to_string(), "quota exceeded");
    }

    #[tokio::test]
    async fn timeout_is_upstream_error() {
        let mut port = MockCompletionPort::new();
        port.expect_generate()
            .times(1)
            .returning(|_| Err(CompletionError::Timeout(Duration::from_secs(120))));

        let err = use_case(port).execute(br#"{"txt":"hello"}"#).await.unwrap_err();

        assert!(matches!(err, NpcReplyError::Upstream(_)));
    }

    #[tokio::test]
    async fn transport_failure_is_internal() {
        let mut port = MockCompletionPort::new();
        port.expect_generate()
            .times(1)
            .returning(|_| Err(CompletionError::Transport("connection reset by peer".into())));

        let err = use_case(port).execute(br#"{"txt":"hello"}"#).await.unwrap_err();

        assert!(matches!(&err, NpcReplyError::Internal(_)));
        assert_eq!(err.to_string(), "request failed: connection reset by peer");
    }

    #[tokio::test]
    async fn nonconforming_reply_is_internal() {
        let mut port = MockCompletionPort::new();
        port.expect_generate()
            .times(1)
            .returning(|_| Ok(CompletionResponse::text(r#"{"text":"hi"}"#)));

        let err = use_case(port).execute(br#"{"txt":"hello"}"#).await.unwrap_err();

        assert!(matches!(err, NpcReplyError::Internal(_)));
    }

    #[tokio::test]
    async fn out_of_range_intimacy_is_forwarded() {
        let reply = CONFORMING.replace("\"newIntimacy\":5", "\"newIntimacy\":140");
        let expected = reply.clone();

        let mut port = MockCompletionPort::new();
        port.expect_generate()
            .times(1)
            .returning(move |_| Ok(CompletionResponse::text(reply.clone())));

        let forwarded = use_case(port).execute(br#"{"txt":"hello"}"#).await.unwrap();

        assert_eq!(forwarded, expected);
    }
}
