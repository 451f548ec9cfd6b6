pub mod frontend;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(frontend::handle_root))
        .route("/app", get(frontend::handle_app))
        .route("/health", get(health::health_handler))
        .route(
            "/analyze",
            post(handlers::handle_analyze).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .with_state(state)
}
