//! HTTP route definitions.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::http::handlers::{health, translate};
use crate::state::AppState;

/// Create the router.
///
/// ```text
/// POST /api/translate - Translate text, keeping its style
/// GET  /health        - Liveness and active model
/// ```
///
/// CORS is open because callers are browser extensions on arbitrary pages.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/translate", post(translate))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
