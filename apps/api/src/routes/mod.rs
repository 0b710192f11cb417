pub mod health;
pub mod pages;
pub mod session;
mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // HTML surface
        .route("/", get(pages::handle_index))
        .route("/text", post(pages::handle_text))
        .route("/upload", post(pages::handle_upload))
        .route("/analyze", post(pages::handle_analyze))
        .route("/reset", post(pages::handle_reset))
        // Session API
        .route("/api/v1/session", get(session::handle_get_session))
        .route("/api/v1/session/text", put(session::handle_edit_text))
        .route("/api/v1/session/upload", post(session::handle_upload))
        .route("/api/v1/session/analyze", post(session::handle_analyze))
        .route("/api/v1/session/reset", post(session::handle_reset))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}
