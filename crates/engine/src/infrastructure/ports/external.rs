//! External service port traits (structured text completion).

use std::sync::Arc;

use async_trait::async_trait;

use super::error::CompletionError;

// =============================================================================
// Completion Types
// =============================================================================

/// MIME type that switches the upstream model into JSON output mode.
pub const JSON_MIME_TYPE: &str = "application/json";

/// A single-turn structured completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// User turn, passed through as-is
    pub prompt: String,
    /// Behavioral policy attached to every call
    pub system_instruction: String,
    /// Output MIME type (`application/json` for structured output)
    pub response_mime_type: String,
    /// Schema the output must conform to, in the upstream dialect
    pub response_schema: serde_json::Value,
}

impl CompletionRequest {
    /// Request JSON output conforming to `schema`.
    pub fn structured(
        prompt: impl Into<String>,
        system_instruction: impl Into<String>,
        schema: serde_json::Value,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: system_instruction.into(),
            response_mime_type: JSON_MIME_TYPE.to_string(),
            response_schema: schema,
        }
    }
}

/// Response from the completion service
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    /// Generated text, verbatim
    pub text: String,
    /// Upstream finish reason, if reported
    pub finish_reason: Option<String>,
    /// Token usage
    pub usage: Option<TokenUsage>,
}

impl CompletionResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            finish_reason: None,
            usage: None,
        }
    }
}

/// Token usage information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionPort: Send + Sync {
    async fn generate(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError>;
}

// =============================================================================
// Client Handle
// =============================================================================

/// The upstream client as seen by request handlers.
///
/// Built once at startup. `Unavailable` stands in for a client that could
/// not be created (no credential) so handlers can answer without one.
#[derive(Clone)]
pub enum CompletionClient {
    Available(Arc<dyn CompletionPort>),
    Unavailable,
}

impl CompletionClient {
    pub fn available(port: Arc<dyn CompletionPort>) -> Self {
        Self::Available(port)
    }

    pub fn port(&self) -> Option<&Arc<dyn CompletionPort>> {
        match self {
            Self::Available(port) => Some(port),
            Self::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

impl std::fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available(_) => write!(f, "CompletionClient::Available"),
            Self::Unavailable => write!(f, "CompletionClient::Unavailable"),
        }
    }
}
