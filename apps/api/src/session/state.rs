//! The interaction state machine: Idle → Loading → Success | Error, plus
//! reset back to Idle. Pure transitions only; the async side lives in
//! `session::controller`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::analysis::AnalysisResult;

/// Shown to the user for every failed analysis, whatever the cause.
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "Failed to analyze resume. Please ensure your API key is valid and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Idle,
    Loading,
    Success,
    Error,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Loading => "loading",
            Status::Success => "success",
            Status::Error => "error",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a user action was refused. The state is unchanged in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("Resume text is empty")]
    EmptyResume,

    #[error("An analysis is already in progress")]
    AnalysisInFlight,

    #[error("Cannot {action} while {status}")]
    InvalidTransition { action: &'static str, status: Status },
}

/// Process-wide session state. Only the controller holds a mutable handle.
#[derive(Debug, Clone)]
pub struct InteractionState {
    status: Status,
    resume_text: String,
    result: Option<AnalysisResult>,
    error_message: Option<String>,
    analyzed_at: Option<DateTime<Utc>>,
    run_id: Option<Uuid>,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            status: Status::Idle,
            resume_text: String::new(),
            result: None,
            error_message: None,
            analyzed_at: None,
            run_id: None,
        }
    }
}

/// Claim on an accepted submit: the run to correlate and the text to send.
#[derive(Debug, Clone)]
pub struct PendingRun {
    pub run_id: Uuid,
    pub resume_text: String,
}

impl InteractionState {
    pub fn can_edit(&self) -> bool {
        self.status != Status::Loading
    }

    pub fn can_submit(&self) -> bool {
        matches!(self.status, Status::Idle | Status::Error) && !self.resume_text.trim().is_empty()
    }

    pub fn edit_text(&mut self, text: String) -> Result<(), ControllerError> {
        if !self.can_edit() {
            return Err(ControllerError::AnalysisInFlight);
        }
        self.resume_text = text;
        Ok(())
    }

    /// Idle/Error → Loading, guarded on non-blank text.
    pub fn begin_submit(&mut self) -> Result<PendingRun, ControllerError> {
        match self.status {
            Status::Loading => return Err(ControllerError::AnalysisInFlight),
            Status::Success => {
                return Err(ControllerError::InvalidTransition {
                    action: "submit",
                    status: self.status,
                })
            }
            Status::Idle | Status::Error => {}
        }
        if self.resume_text.trim().is_empty() {
            return Err(ControllerError::EmptyResume);
        }

        let run_id = Uuid::new_v4();
        self.status = Status::Loading;
        self.error_message = None;
        self.run_id = Some(run_id);
        Ok(PendingRun {
            run_id,
            resume_text: self.resume_text.clone(),
        })
    }

    /// Loading → Success. Ignored unless `run_id` is the run in flight.
    pub fn commit_success(&mut self, run_id: Uuid, result: AnalysisResult) -> bool {
        if !self.is_pending(run_id) {
            return false;
        }
        self.status = Status::Success;
        self.result = Some(result);
        self.error_message = None;
        self.analyzed_at = Some(Utc::now());
        true
    }

    /// Loading → Error with the generic user-facing message.
    pub fn commit_failure(&mut self, run_id: Uuid) -> bool {
        if !self.is_pending(run_id) {
            return false;
        }
        self.status = Status::Error;
        self.result = None;
        self.analyzed_at = None;
        self.error_message = Some(ANALYSIS_FAILED_MESSAGE.to_string());
        true
    }

    pub fn reset(&mut self) -> Result<(), ControllerError> {
        if self.status == Status::Loading {
            return Err(ControllerError::AnalysisInFlight);
        }
        *self = Self::default();
        Ok(())
    }

    fn is_pending(&self, run_id: Uuid) -> bool {
        self.status == Status::Loading && self.run_id == Some(run_id)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status,
            resume_text: self.resume_text.clone(),
            result: self.result.clone(),
            error_message: self.error_message.clone(),
            analyzed_at: self.analyzed_at,
            run_id: self.run_id,
            can_edit: self.can_edit(),
            can_submit: self.can_submit(),
        }
    }
}

/// Read-only copy of the state handed to views and the JSON API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub status: Status,
    pub resume_text: String,
    pub result: Option<AnalysisResult>,
    pub error_message: Option<String>,
    pub analyzed_at: Option<DateTime<Utc>>,
    pub run_id: Option<Uuid>,
    pub can_edit: bool,
    pub can_submit: bool,
}
