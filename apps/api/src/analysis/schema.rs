//! Structured-output schema sent with every analysis request.
//!
//! Mirrors `models::analysis::AnalysisResult` in the OpenAPI subset the
//! Gemini API accepts for `responseSchema`.

use serde_json::{json, Value};

use crate::models::analysis::Rating;

/// Top-level fields the model must always emit.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "score",
    "summary",
    "feedback",
    "improvedBullets",
    "missingSections",
    "atsTips",
];

pub fn response_schema() -> Value {
    let ratings: Vec<&str> = Rating::ALL.iter().map(|r| r.label()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "score": {
                "type": "NUMBER",
                "description": "Overall score out of 10"
            },
            "summary": {
                "type": "STRING",
                "description": "One paragraph overview of the resume quality"
            },
            "feedback": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "section": { "type": "STRING" },
                        "rating": { "type": "STRING", "enum": ratings },
                        "comment": { "type": "STRING" }
                    },
                    "required": ["section", "rating", "comment"]
                }
            },
            "improvedBullets": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "original": { "type": "STRING" },
                        "improved": { "type": "STRING" },
                        "reason": { "type": "STRING" }
                    },
                    "required": ["original", "improved", "reason"]
                }
            },
            "missingSections": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "atsTips": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        },
        "required": REQUIRED_FIELDS
    })
}
