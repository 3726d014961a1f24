//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    config::GatewayConfig,
    gemini::GeminiClient,
    ports::CompletionClient,
};
use crate::use_cases;

/// Main application state.
///
/// Holds all use cases. Built once at startup and passed to HTTP handlers
/// via Axum state; nothing in it changes after construction.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub npc: use_cases::NpcUseCases,
}

impl App {
    /// Compose the application around an upstream client handle.
    pub fn new(client: CompletionClient) -> Self {
        let reply = Arc::new(use_cases::npc::GenerateNpcReply::new(client));

        Self {
            use_cases: UseCases {
                npc: use_cases::NpcUseCases::new(reply),
            },
        }
    }

    /// Compose the application from configuration.
    ///
    /// A missing API key yields an app whose NPC endpoint reports the client
    /// as not initialized; it does not prevent startup.
    pub fn from_config(config: &GatewayConfig) -> Self {
        let client = match GeminiClient::from_config(config) {
            Some(gemini) => {
                tracing::info!(
                    model = %config.model,
                    base_url = %config.base_url,
                    timeout_secs = config.timeout.as_secs(),
                    "Gemini client configured"
                );
                CompletionClient::available(Arc::new(gemini))
            }
            None => {
                tracing::error!(
                    "GEMINI_API_KEY is not set; NPC replies are disabled until the service is restarted with a key"
                );
                CompletionClient::Unavailable
            }
        };

        Self::new(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_builds_unavailable_app() {
        let app = App::from_config(&GatewayConfig::default());
        assert!(!app.use_cases.npc.reply.is_available());
    }

    #[test]
    fn key_builds_available_app() {
        let config = GatewayConfig {
            api_key: Some("key".to_string()),
            ..GatewayConfig::default()
        };
        let app = App::from_config(&config);
        assert!(app.use_cases.npc.reply.is_available());
    }
}
