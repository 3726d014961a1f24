//! Gateway configuration read from the environment.

use std::time::Duration;

/// Default Gemini API base URL.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model for NPC replies.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Upstream timeout when `GEMINI_TIMEOUT_SECS` is unset or invalid.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Gemini credential. `None` disables the endpoint, not the process.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub server_host: String,
    pub server_port: u16,
    /// Raw `CORS_ALLOWED_ORIGINS` value (`*` or a comma-separated list)
    pub cors_allowed_origins: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            cors_allowed_origins: None,
        }
    }
}

impl GatewayConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// Blank values count as unset. Unparseable numbers fall back to their
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();

        let timeout = get("GEMINI_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        let server_port = get("SERVER_PORT")
            .or_else(|| get("PORT"))
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(defaults.server_port);

        Self {
            api_key: get("GEMINI_API_KEY"),
            model: get("GEMINI_MODEL").unwrap_or(defaults.model),
            base_url: get("GEMINI_BASE_URL").unwrap_or(defaults.base_url),
            timeout,
            server_host: get("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port,
            cors_allowed_origins: get("CORS_ALLOWED_ORIGINS"),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
