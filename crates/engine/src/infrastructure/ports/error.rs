//! Error types for port operations.

use std::time::Duration;

/// Failure of a single upstream completion call.
///
/// The variants split along the line the caller cares about: the first
/// three are reported *by* the upstream service (or its deadline), the last
/// two are faults on our side of the wire.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompletionError {
    /// The service answered with an error (quota, bad request, model error).
    /// Displays as the service's own message.
    #[error("{message}")]
    Api {
        status: Option<u16>,
        message: String,
    },

    /// No answer within the configured deadline.
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The service refused to produce content (safety filters).
    #[error("{0}")]
    Blocked(String),

    /// Connection or transport failure before a response arrived.
    #[error("request failed: {0}")]
    Transport(String),

    /// A 2xx response we could not make sense of.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl CompletionError {
    pub fn api(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Whether the upstream service is the source of this failure.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Api { .. } | Self::Timeout(_) | Self::Blocked(_)
        )
    }
}
