pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::{self, MAX_FILE_BYTES};
use crate::state::AppState;

/// Room for the largest accepted file plus the text fields around it.
const MAX_BODY_BYTES: usize = MAX_FILE_BYTES + 2 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/analyze",
            post(handlers::handle_analyze).layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .route("/api/models", get(handlers::handle_list_models))
        .with_state(state)
}
