//! HTTP routes.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use npcgate_shared::ResponseEnvelope;

use crate::app::App;
use crate::use_cases::npc::NpcReplyError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", post(npc_reply))
        .route("/api/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}

/// `POST /` - generate the NPC's next conversational state.
///
/// The body is taken as raw bytes so malformed JSON gets the envelope
/// answer rather than axum's own rejection.
async fn npc_reply(
    State(app): State<Arc<App>>,
    body: Bytes,
) -> Result<Json<ResponseEnvelope>, ApiError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("npc_reply", request_id = %request_id);

    let data = app
        .use_cases
        .npc
        .reply
        .execute(&body)
        .instrument(span)
        .await?;

    Ok(Json(ResponseEnvelope::ok(data)))
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest,
    ClientNotInitialized,
    Upstream(String),
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            // Existing game clients only read the envelope's status field here
            ApiError::ClientNotInitialized => StatusCode::OK,
            ApiError::Upstream(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn envelope(&self) -> ResponseEnvelope {
        match self {
            ApiError::BadRequest => ResponseEnvelope::missing_txt(),
            ApiError::ClientNotInitialized => ResponseEnvelope::client_not_initialized(),
            ApiError::Upstream(msg) => ResponseEnvelope::upstream_error(msg),
            ApiError::Internal(msg) => ResponseEnvelope::unexpected_error(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.envelope())).into_response()
    }
}

impl From<NpcReplyError> for ApiError {
    fn from(e: NpcReplyError) -> Self {
        match e {
            NpcReplyError::ClientNotInitialized => ApiError::ClientNotInitialized,
            NpcReplyError::Validation(_) => ApiError::BadRequest,
            NpcReplyError::Upstream(msg) => ApiError::Upstream(msg),
            NpcReplyError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}
