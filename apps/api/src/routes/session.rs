//! JSON API over the session controller.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::routes::upload::read_first_file;
use crate::session::SessionSnapshot;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EditTextRequest {
    pub text: String,
}

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.controller.snapshot().await)
}

/// PUT /api/v1/session/text
pub async fn handle_edit_text(
    State(state): State<AppState>,
    Json(request): Json<EditTextRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(state.controller.edit_text(request.text).await?))
}

/// POST /api/v1/session/upload
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SessionSnapshot>, AppError> {
    let bytes = read_first_file(multipart).await?;
    Ok(Json(state.controller.load_file(&bytes).await?))
}

/// POST /api/v1/session/analyze
///
/// Waits for the analysis to resolve. A failed analysis is not an HTTP
/// error: the snapshot comes back in ERROR status.
pub async fn handle_analyze(
    State(state): State<AppState>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(state.controller.submit().await?))
}

/// POST /api/v1/session/reset
pub async fn handle_reset(
    State(state): State<AppState>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(state.controller.reset().await?))
}
