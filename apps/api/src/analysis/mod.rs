// Resume analysis: prompt, response schema and the analyzer that talks to
// the model. All model calls go through llm_client.

pub mod analyzer;
pub mod prompts;
pub mod schema;

pub use analyzer::{AnalysisError, LlmAnalyzer, ResumeAnalyzer};
