//! NPC Gate Engine - Main entry point.

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use npcgate_engine::{api, infrastructure::config::GatewayConfig, App};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary is usually run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "npcgate_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting NPC Gate Engine");

    let config = GatewayConfig::from_env();
    let app = Arc::new(App::from_config(&config));

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer(config.cors_allowed_origins.as_deref()) {
        router = router.layer(cors);
    }

    // Start server
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

/// CORS for browser-hosted game clients; `None` leaves CORS off.
fn build_cors_layer(allowed_origins: Option<&str>) -> Option<CorsLayer> {
    let allowed_origins = allowed_origins.map(str::trim).filter(|s| !s.is_empty())?;

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_off_when_unset_or_blank() {
        assert!(build_cors_layer(None).is_none());
        assert!(build_cors_layer(Some("   ")).is_none());
        assert!(build_cors_layer(Some(" , ,")).is_none());
    }

    #[test]
    fn cors_on_for_wildcard_and_lists() {
        assert!(build_cors_layer(Some("*")).is_some());
        assert!(build_cors_layer(Some("http://localhost:3000, https://game.example")).is_some());
    }
}
