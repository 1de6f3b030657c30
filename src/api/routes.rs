//! Route Definitions
//!
//! Maps URLs to handlers with type-safe routing.

use super::handlers::*;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Build the API router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))

        // Game page and endpoints
        .route("/", get(index_handler))
        .route("/state", get(state_handler))
        .route("/guess", post(guess_handler))
        .route("/reset", post(reset_handler))

        .with_state(state)
}
