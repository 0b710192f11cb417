//! Shared fixtures for unit tests: an in-process stand-in for the generative
//! backend and a scriptable `ResumeAnalyzer`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{extract::State, http::HeaderMap, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use tokio::sync::Notify;

use crate::analysis::{AnalysisError, ResumeAnalyzer};
use crate::models::analysis::{AnalysisResult, FeedbackItem, Rating};

/// Requests seen by the fake backend: headers and decoded JSON body.
#[derive(Clone, Default)]
pub struct Captured(Arc<Mutex<Vec<(HeaderMap, Value)>>>);

impl Captured {
    pub fn requests(&self) -> Vec<(HeaderMap, Value)> {
        self.0.lock().unwrap().clone()
    }
}

/// Serves one canned reply for every `generateContent` call.
/// Returns the base URL to point an `LlmClient` at.
pub async fn spawn_backend(status: u16, reply: Value) -> (String, Captured) {
    let status = StatusCode::from_u16(status).unwrap();
    let captured = Captured::default();
    let app = Router::new()
        .route(
            "/v1beta/models/:model",
            post(
                move |State(captured): State<Captured>,
                      headers: HeaderMap,
                      Json(body): Json<Value>| {
                    let reply = reply.clone();
                    async move {
                        captured.0.lock().unwrap().push((headers, body));
                        (status, Json(reply))
                    }
                },
            ),
        )
        .with_state(captured.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), captured)
}

/// A successful `generateContent` body whose single part carries `text`.
pub fn text_reply(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 10, "candidatesTokenCount": 5 }
    })
}

/// The result used throughout the controller scenarios.
pub fn sample_result() -> AnalysisResult {
    AnalysisResult {
        score: 7.0,
        summary: "Decent start".to_string(),
        feedback: vec![FeedbackItem {
            section: "Skills".to_string(),
            rating: Rating::Fair,
            comment: "Add more detail".to_string(),
        }],
        improved_bullets: vec![],
        missing_sections: vec!["Projects".to_string()],
        ats_tips: vec!["Add quantifiable metrics".to_string()],
    }
}

/// Analyzer double: returns a fixed outcome, counts calls, and can be held
/// at a gate until the test releases it.
pub struct StubAnalyzer {
    outcome: Result<AnalysisResult, AnalysisError>,
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl StubAnalyzer {
    pub fn returning(outcome: Result<AnalysisResult, AnalysisError>) -> Self {
        Self {
            outcome,
            gate: None,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn gated(outcome: Result<AnalysisResult, AnalysisError>, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::returning(outcome)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResumeAnalyzer for StubAnalyzer {
    async fn analyze(&self, resume_text: &str) -> Result<AnalysisResult, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(resume_text.to_string());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.outcome.clone()
    }
}
