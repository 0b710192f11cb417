//! HTML form handlers. Every action redirects back to `/`, which renders
//! whatever state the controller is in.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{Html, Redirect},
    Form,
};
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::routes::upload::read_first_file;
use crate::session::ControllerError;
use crate::state::AppState;
use crate::views::render_page;

#[derive(Debug, Deserialize)]
pub struct ResumeForm {
    #[serde(default)]
    pub resume_text: String,
}

fn back_to_page<T>(action: &str, outcome: Result<T, ControllerError>) -> Redirect {
    if let Err(e) = outcome {
        debug!("{action} ignored: {e}");
    }
    Redirect::to("/")
}

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let snapshot = state.controller.snapshot().await;
    Ok(Html(render_page(&snapshot)?))
}

/// POST /text
pub async fn handle_text(
    State(state): State<AppState>,
    Form(form): Form<ResumeForm>,
) -> Redirect {
    back_to_page("edit", state.controller.edit_text(form.resume_text).await)
}

/// POST /upload
///
/// A missing or unreadable file leaves the session untouched. Oversized
/// bodies still get 413.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Redirect, AppError> {
    match read_first_file(multipart).await {
        Ok(bytes) => Ok(back_to_page("upload", state.controller.load_file(&bytes).await)),
        Err(AppError::Upload(e)) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            Err(AppError::Upload(e))
        }
        Err(e) => {
            debug!("upload ignored: {e}");
            Ok(Redirect::to("/"))
        }
    }
}

/// POST /analyze
///
/// The form carries the current text area contents, so the text is
/// committed first and then submitted.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Form(form): Form<ResumeForm>,
) -> Redirect {
    let outcome = match state.controller.edit_text(form.resume_text).await {
        Ok(_) => state.controller.submit().await,
        Err(e) => Err(e),
    };
    back_to_page("analyze", outcome)
}

/// POST /reset
pub async fn handle_reset(State(state): State<AppState>) -> Redirect {
    back_to_page("reset", state.controller.reset().await)
}
