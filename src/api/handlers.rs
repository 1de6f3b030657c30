//! Request Handlers
//!
//! Thin translation between HTTP and [`GameService`]. The session id and
//! request id are attached by middleware before any handler runs.

use super::{errors::ApiError, middleware::RequestId, models::*};
use crate::{games::service::GameService, session_store::SessionId};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Html,
    Extension, Json,
};
use std::sync::Arc;
use tracing::{debug, warn};

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Shared application state
pub struct AppState {
    pub game_service: Arc<GameService>,
    pub version: String,
}

/// Health check handler
/// GET /health
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Running".to_string(),
        version: state.version.clone(),
    })
}

/// Game page. A finished game is swapped for a new one on load.
/// GET /
pub async fn index_handler(
    Extension(request_id): Extension<RequestId>,
    Extension(session_id): Extension<SessionId>,
    State(state): State<Arc<AppState>>,
) -> Result<Html<&'static str>, ApiError> {
    state
        .game_service
        .open(&session_id)
        .await
        .map_err(|e| ApiError::from_service(request_id.0.clone(), e))?;
    Ok(Html(INDEX_HTML))
}

/// Current game state
/// GET /state
pub async fn state_handler(
    Extension(request_id): Extension<RequestId>,
    Extension(session_id): Extension<SessionId>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<StateResponse>, ApiError> {
    let snapshot = state
        .game_service
        .state(&session_id)
        .await
        .map_err(|e| ApiError::from_service(request_id.0.clone(), e))?;
    Ok(Json(snapshot.into()))
}

/// Submit a guess
/// POST /guess  { "guess": "crane" }
pub async fn guess_handler(
    Extension(request_id): Extension<RequestId>,
    Extension(session_id): Extension<SessionId>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GuessRequest>, JsonRejection>,
) -> Result<Json<GuessResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(request_id = %request_id.0, "Malformed guess body: {}", rejection.body_text());
        ApiError::bad_request(
            request_id.0.clone(),
            "Request body must be JSON like {\"guess\": \"CRANE\"}.".to_string(),
        )
    })?;

    debug!(request_id = %request_id.0, session = %session_id, "Guess submitted");

    let outcome = state
        .game_service
        .guess(&session_id, &request.guess)
        .await
        .map_err(|e| ApiError::from_service(request_id.0.clone(), e))?;
    Ok(Json(outcome.into()))
}

/// Start over
/// POST /reset
pub async fn reset_handler(
    Extension(request_id): Extension<RequestId>,
    Extension(session_id): Extension<SessionId>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ResetResponse>, ApiError> {
    state
        .game_service
        .reset(&session_id)
        .await
        .map_err(|e| ApiError::from_service(request_id.0.clone(), e))?;
    Ok(Json(ResetResponse {
        message: "Game reset.".to_string(),
    }))
}
