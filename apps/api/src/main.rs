mod analysis;
mod config;
mod errors;
mod llm_client;
mod models;
mod routes;
mod session;
mod state;
mod views;

#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::LlmAnalyzer;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::session::InteractionController;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Coach v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.llm_settings())?;
    info!("LLM client initialized (model: {})", llm.model());
    if !llm.has_api_key() {
        warn!("API_KEY is not set; every analysis will fail until it is configured");
    }

    let model = llm.model().to_string();
    let controller = Arc::new(InteractionController::new(Arc::new(LlmAnalyzer::new(llm))));

    let state = AppState { controller, model };

    let app = build_router(state, config.max_upload_bytes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
