use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::{LlmSettings, DEFAULT_API_BASE, DEFAULT_MODEL};

/// Application configuration loaded from environment variables.
///
/// `API_KEY` is optional at startup: without it every analysis fails with an
/// authentication error, which the UI reports like any other failure.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base_url: String,
    pub llm_timeout_secs: u64,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            api_key: non_blank("API_KEY"),
            model: non_blank("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base_url: non_blank("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            llm_timeout_secs: parse_or(&non_blank, "LLM_TIMEOUT_SECS", 120)?,
            max_upload_bytes: parse_or(&non_blank, "MAX_UPLOAD_BYTES", 1024 * 1024)?,
            port: parse_or(&non_blank, "PORT", 8080)?,
            rust_log: non_blank("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn llm_settings(&self) -> LlmSettings {
        LlmSettings {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            base_url: self.api_base_url.clone(),
            timeout: Duration::from_secs(self.llm_timeout_secs),
        }
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
