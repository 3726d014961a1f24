//! Port traits for infrastructure boundaries.
//!
//! The completion service is the only external dependency, so this is the
//! only abstraction in the engine. Everything else is concrete types.

mod error;
mod external;

pub use error::CompletionError;
pub use external::{
    CompletionClient, CompletionPort, CompletionRequest, CompletionResponse, TokenUsage,
    JSON_MIME_TYPE,
};

#[cfg(test)]
pub use external::MockCompletionPort;
