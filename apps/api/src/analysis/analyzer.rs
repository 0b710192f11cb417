//! Resume analyzer. Builds the analysis request, calls the model through
//! `llm_client`, and turns the reply into a validated `AnalysisResult`.
//!
//! `AppState` carries the analyzer as `Arc<dyn ResumeAnalyzer>` inside the
//! session controller, so tests can drive the controller with a stub.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::analysis::prompts::{ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_SYSTEM};
use crate::analysis::schema::response_schema;
use crate::llm_client::prompts::JSON_RESPONSE_INSTRUCTION;
use crate::llm_client::{strip_json_fences, LlmClient, LlmError, StructuredRequest};
use crate::models::analysis::AnalysisResult;

/// Every way one analysis run can fail. The detail is for logs; the user
/// only ever sees one generic message.
#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("authentication failure: {0}")]
    Auth(String),

    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    #[error("model backend failure: {0}")]
    Upstream(String),
}

impl From<LlmError> for AnalysisError {
    fn from(err: LlmError) -> Self {
        let detail = err.to_string();
        match err {
            LlmError::MissingApiKey | LlmError::Unauthorized { .. } => AnalysisError::Auth(detail),
            // A 2xx body that is not a generateContent envelope.
            LlmError::Http(e) if e.is_decode() => AnalysisError::MalformedResponse(detail),
            LlmError::Http(_) => AnalysisError::Transport(detail),
            LlmError::RateLimited { .. }
            | LlmError::Api { .. }
            | LlmError::Blocked { .. }
            | LlmError::EmptyContent => AnalysisError::Upstream(detail),
        }
    }
}

#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    async fn analyze(&self, resume_text: &str) -> Result<AnalysisResult, AnalysisError>;
}

/// Production analyzer backed by the generative model.
pub struct LlmAnalyzer {
    llm: LlmClient,
    schema: Value,
    system: String,
}

impl LlmAnalyzer {
    pub fn new(llm: LlmClient) -> Self {
        Self {
            llm,
            schema: response_schema(),
            system: system_instruction(),
        }
    }
}

#[async_trait]
impl ResumeAnalyzer for LlmAnalyzer {
    async fn analyze(&self, resume_text: &str) -> Result<AnalysisResult, AnalysisError> {
        let prompt = build_prompt(resume_text);
        let text = self
            .llm
            .call_text(StructuredRequest {
                system: &self.system,
                prompt: &prompt,
                schema: &self.schema,
            })
            .await?;

        debug!("Model returned {} bytes of analysis JSON", text.len());
        parse_analysis(&text)
    }
}

pub fn system_instruction() -> String {
    format!("{ANALYSIS_SYSTEM}\n\n{JSON_RESPONSE_INSTRUCTION}")
}

/// The resume text is inserted verbatim.
pub fn build_prompt(resume_text: &str) -> String {
    ANALYSIS_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}

/// Parses the model's text payload. Structural problems (bad JSON, missing
/// field, unknown rating) and semantic ones (score out of range, blank text)
/// both come back as `MalformedResponse`.
pub fn parse_analysis(text: &str) -> Result<AnalysisResult, AnalysisError> {
    let result: AnalysisResult = serde_json::from_str(strip_json_fences(text))
        .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;
    result.validate().map_err(AnalysisError::MalformedResponse)?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::schema::REQUIRED_FIELDS;
    use crate::llm_client::LlmSettings;
    use crate::models::analysis::{ImprovedBullet, Rating};
    use crate::test_support::{sample_result, spawn_backend, text_reply};
    use serde_json::json;
    use std::time::Duration;

    fn scenario_payload() -> Value {
        json!({
            "score": 7,
            "summary": "Decent start",
            "feedback": [{ "section": "Skills", "rating": "Fair", "comment": "Add more detail" }],
            "improvedBullets": [],
            "missingSections": ["Projects"],
            "atsTips": ["Add quantifiable metrics"]
        })
    }

    fn analyzer(base_url: String, api_key: Option<&str>) -> LlmAnalyzer {
        LlmAnalyzer::new(
            LlmClient::new(LlmSettings {
                api_key: api_key.map(String::from),
                model: "test-model".to_string(),
                base_url,
                timeout: Duration::from_secs(5),
            })
            .unwrap(),
        )
    }

    #[test]
    fn test_prompt_contains_resume_verbatim() {
        let resume = "Jane Smith\n  * Built a \"todo\" app {v2}";
        let prompt = build_prompt(resume);
        assert!(prompt.contains(resume));
        assert!(prompt.starts_with("Analyze the following resume text"));
    }

    #[test]
    fn test_system_instruction_lists_tasks() {
        let system = system_instruction();
        assert!(system.contains("0-10"));
        assert!(system.contains("Action Verb + Task + Result"));
        assert!(system.contains("ATS"));
        assert!(system.ends_with(JSON_RESPONSE_INSTRUCTION));
    }

    #[test]
    fn test_parse_preserves_values() {
        let payload = json!({
            "score": 8.5,
            "summary": "Strong projects section.",
            "feedback": [
                { "section": "Projects", "rating": "Good", "comment": "Clear impact" },
                { "section": "Projects", "rating": "Needs Improvement", "comment": "Add links" }
            ],
            "improvedBullets": [
                { "original": "Made website", "improved": "Built a React site serving 500 users", "reason": "Quantified" }
            ],
            "missingSections": [],
            "atsTips": ["Use standard headings", "Avoid tables"]
        });

        let result = parse_analysis(&payload.to_string()).unwrap();
        assert_eq!(result.score, 8.5);
        assert_eq!(result.feedback.len(), 2);
        assert_eq!(result.feedback[1].rating, Rating::NeedsImprovement);
        assert_eq!(
            result.improved_bullets,
            vec![ImprovedBullet {
                original: "Made website".to_string(),
                improved: "Built a React site serving 500 users".to_string(),
                reason: "Quantified".to_string(),
            }]
        );
        assert!(result.missing_sections.is_empty());
        assert_eq!(serde_json::to_value(&result).unwrap(), payload);
    }

    #[test]
    fn test_parse_scenario_payload() {
        let result = parse_analysis(&scenario_payload().to_string()).unwrap();
        assert_eq!(result, sample_result());
    }

    #[test]
    fn test_parse_accepts_fenced_json() {
        let text = format!("```json\n{}\n```", scenario_payload());
        assert_eq!(parse_analysis(&text).unwrap(), sample_result());
    }

    #[test]
    fn test_missing_any_required_field_is_malformed() {
        for field in REQUIRED_FIELDS {
            let mut payload = scenario_payload();
            payload.as_object_mut().unwrap().remove(field);
            let err = parse_analysis(&payload.to_string()).unwrap_err();
            assert!(
                matches!(err, AnalysisError::MalformedResponse(_)),
                "removing {field} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_missing_nested_field_is_malformed() {
        let mut payload = scenario_payload();
        payload["feedback"][0].as_object_mut().unwrap().remove("comment");
        assert!(matches!(
            parse_analysis(&payload.to_string()),
            Err(AnalysisError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_null_collection_is_malformed() {
        let mut payload = scenario_payload();
        payload["atsTips"] = Value::Null;
        assert!(parse_analysis(&payload.to_string()).is_err());
    }

    #[test]
    fn test_out_of_range_score_is_malformed() {
        let mut payload = scenario_payload();
        payload["score"] = json!(11);
        let err = parse_analysis(&payload.to_string()).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(msg) if msg.contains("score")));
    }

    #[test]
    fn test_unknown_rating_is_malformed() {
        let mut payload = scenario_payload();
        payload["feedback"][0]["rating"] = json!("Excellent");
        assert!(matches!(
            parse_analysis(&payload.to_string()),
            Err(AnalysisError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_non_json_is_malformed() {
        assert!(matches!(
            parse_analysis("I think this resume is great!"),
            Err(AnalysisError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_llm_error_mapping() {
        assert!(matches!(
            AnalysisError::from(LlmError::MissingApiKey),
            AnalysisError::Auth(_)
        ));
        assert!(matches!(
            AnalysisError::from(LlmError::RateLimited {
                message: "quota".to_string()
            }),
            AnalysisError::Upstream(_)
        ));
        assert!(matches!(
            AnalysisError::from(LlmError::EmptyContent),
            AnalysisError::Upstream(_)
        ));
    }

    #[tokio::test]
    async fn test_analyze_end_to_end() {
        let (base_url, captured) =
            spawn_backend(200, text_reply(&scenario_payload().to_string())).await;
        let analyzer = analyzer(base_url, Some("secret"));

        let result = analyzer.analyze("John Doe, Skills: Python").await.unwrap();
        assert_eq!(result, sample_result());

        let requests = captured.requests();
        assert_eq!(requests.len(), 1);
        let body = &requests[0].1;
        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            build_prompt("John Doe, Skills: Python")
        );
        assert_eq!(body["generationConfig"]["responseSchema"], response_schema());
    }

    #[tokio::test]
    async fn test_analyze_without_key_is_auth_error() {
        let (base_url, captured) = spawn_backend(200, text_reply("{}")).await;
        let err = analyzer(base_url, None).analyze("text").await.unwrap_err();
        assert!(matches!(err, AnalysisError::Auth(_)));
        assert!(captured.requests().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_server_error_is_upstream() {
        let reply = json!({ "error": { "code": 500, "message": "internal", "status": "INTERNAL" } });
        let (base_url, _) = spawn_backend(500, reply).await;
        let err = analyzer(base_url, Some("secret"))
            .analyze("text")
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Upstream(msg) if msg.contains("internal")));
    }

    #[tokio::test]
    async fn test_analyze_incomplete_reply_is_malformed() {
        let (base_url, _) = spawn_backend(200, text_reply("{\"score\": 5}")).await;
        let err = analyzer(base_url, Some("secret"))
            .analyze("text")
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }
}
