pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::tailoring::handlers;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Tailoring API
        .route("/scrape-job", post(handlers::handle_scrape_job))
        .route("/api/v1/tailor/preview", post(handlers::handle_preview))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
