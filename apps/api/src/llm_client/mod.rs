//! LLM Client: the single point of entry for generative backend calls.
//!
//! ARCHITECTURAL RULE: No other module may call the Gemini API directly.
//! All model interactions MUST go through this module.
//!
//! One request per call: failures are reported, never retried here. The user
//! decides whether to try again.
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
const API_KEY_HEADER: &str = "x-goog-api-key";
const JSON_MIME_TYPE: &str = "application/json";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API key is not configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API key rejected (status {status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("Rate limited: {message}")]
    RateLimited { message: String },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Prompt blocked by the model: {reason}")]
    Blocked { reason: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// One structured-output request: instruction, user message and the JSON
/// schema the model is constrained to.
#[derive(Debug, Clone, Copy)]
pub struct StructuredRequest<'a> {
    pub system: &'a str,
    pub prompt: &'a str,
    pub schema: &'a Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    pub prompt_token_count: Option<u32>,
    pub candidates_token_count: Option<u32>,
}

impl LlmResponse {
    /// Concatenates the text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Connection settings for the generative backend.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

/// The single LLM client used by the analyzer.
/// Wraps the Gemini `generateContent` endpoint with structured output helpers.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl LlmClient {
    pub fn new(settings: LlmSettings) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self {
            client,
            api_key: settings.api_key,
            model: settings.model,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Makes one call to the model, returning the full response object.
    pub async fn call(&self, request: StructuredRequest<'_>) -> Result<LlmResponse, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let body = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: request.system,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: JSON_MIME_TYPE,
                response_schema: request.schema,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("LLM API returned {}: {}", status, body);
            return Err(classify_failure(status, body));
        }

        let llm_response: LlmResponse = response.json().await?;

        if let Some(usage) = &llm_response.usage_metadata {
            debug!(
                "LLM call succeeded: prompt_tokens={:?}, output_tokens={:?}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(llm_response)
    }

    /// Returns the raw text of the model's answer.
    pub async fn call_text(&self, request: StructuredRequest<'_>) -> Result<String, LlmError> {
        let response = self.call(request).await?;

        if let Some(reason) = response.block_reason() {
            return Err(LlmError::Blocked {
                reason: reason.to_string(),
            });
        }

        match response.text() {
            Some(text) => Ok(text),
            None => {
                let finish_reason = response
                    .candidates
                    .first()
                    .and_then(|c| c.finish_reason.as_deref());
                debug!("LLM response had no text (finish_reason={finish_reason:?})");
                Err(LlmError::EmptyContent)
            }
        }
    }
}

/// Maps a non-2xx response onto the error taxonomy.
fn classify_failure(status: StatusCode, body: String) -> LlmError {
    let message = serde_json::from_str::<GeminiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    let code = status.as_u16();

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Unauthorized {
            status: code,
            message,
        },
        // An invalid key is reported as 400 INVALID_ARGUMENT.
        StatusCode::BAD_REQUEST if message.to_lowercase().contains("api key") => {
            LlmError::Unauthorized {
                status: code,
                message,
            }
        }
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited { message },
        _ => LlmError::Api {
            status: code,
            message,
        },
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let stripped = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match stripped {
        Some(stripped) => stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start()),
        None => text,
    }
}
