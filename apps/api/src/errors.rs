use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::session::ControllerError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Upload error: {0}")]
    Upload(#[from] MultipartError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl From<ControllerError> for AppError {
    fn from(err: ControllerError) -> Self {
        match err {
            ControllerError::EmptyResume => AppError::Validation(err.to_string()),
            ControllerError::AnalysisInFlight | ControllerError::InvalidTransition { .. } => {
                AppError::Conflict(err.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            // Carries 413 when the body limit is exceeded.
            AppError::Upload(e) => (e.status(), "UPLOAD_ERROR", e.body_text()),
            AppError::Template(e) => {
                tracing::error!("Template error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "TEMPLATE_ERROR",
                    "The page could not be rendered".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
