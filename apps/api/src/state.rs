use std::sync::Arc;

use crate::session::InteractionController;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one session of this process. Handlers never touch its state directly.
    pub controller: Arc<InteractionController>,
    /// Model identifier, reported by the health endpoint.
    pub model: String,
}
