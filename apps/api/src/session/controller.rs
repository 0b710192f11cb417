use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, error, info, info_span, Instrument};

use crate::analysis::ResumeAnalyzer;
use crate::session::state::{ControllerError, InteractionState, PendingRun, SessionSnapshot};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Owns the session state and sequences user actions against the analyzer.
///
/// The lock is never held across the analyze call. Each accepted submit
/// runs on its own task so a dropped caller cannot strand the session in
/// Loading.
pub struct InteractionController {
    state: RwLock<InteractionState>,
    analyzer: Arc<dyn ResumeAnalyzer>,
}

impl InteractionController {
    pub fn new(analyzer: Arc<dyn ResumeAnalyzer>) -> Self {
        Self {
            state: RwLock::new(InteractionState::default()),
            analyzer,
        }
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.state.read().await.snapshot()
    }

    pub async fn edit_text(&self, text: String) -> Result<SessionSnapshot, ControllerError> {
        let mut state = self.state.write().await;
        state.edit_text(text)?;
        Ok(state.snapshot())
    }

    /// Decodes an uploaded text file and replaces the resume text with it.
    pub async fn load_file(&self, bytes: &[u8]) -> Result<SessionSnapshot, ControllerError> {
        let text = decode_text_file(bytes);
        debug!("Loaded resume file ({} bytes)", bytes.len());
        self.edit_text(text).await
    }

    /// Starts an analysis of the current text and waits for it to resolve.
    pub async fn submit(self: &Arc<Self>) -> Result<SessionSnapshot, ControllerError> {
        let run = self.state.write().await.begin_submit()?;
        let run_id = run.run_id;

        let controller = Arc::clone(self);
        let span = info_span!("analysis", %run_id);
        let task = tokio::spawn(async move { controller.run_analysis(run).await }.instrument(span));

        match task.await {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => {
                error!(%run_id, "Analysis task ended without committing: {e}");
                let mut state = self.state.write().await;
                state.commit_failure(run_id);
                Ok(state.snapshot())
            }
        }
    }

    async fn run_analysis(&self, run: PendingRun) -> SessionSnapshot {
        info!(
            "Starting resume analysis ({} chars)",
            run.resume_text.chars().count()
        );
        let outcome = self.analyzer.analyze(&run.resume_text).await;

        let mut state = self.state.write().await;
        match outcome {
            Ok(result) => {
                info!("Resume analysis succeeded: score={}", result.score);
                state.commit_success(run.run_id, result);
            }
            Err(e) => {
                error!("Resume analysis failed: {e}");
                state.commit_failure(run.run_id);
            }
        }
        state.snapshot()
    }

    pub async fn reset(&self) -> Result<SessionSnapshot, ControllerError> {
        let mut state = self.state.write().await;
        state.reset()?;
        info!("Session reset");
        Ok(state.snapshot())
    }
}

/// Reads raw bytes as UTF-8 text: invalid sequences become U+FFFD and a
/// leading byte-order mark is dropped.
pub fn decode_text_file(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
