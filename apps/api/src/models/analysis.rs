use serde::{Deserialize, Serialize};

/// Upper bound of the overall resume score.
pub const MAX_SCORE: f64 = 10.0;

/// Rating the model assigns to one resume section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Good,
    Fair,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl Rating {
    /// All ratings in the order they appear in the response schema.
    pub const ALL: [Rating; 3] = [Rating::Good, Rating::Fair, Rating::NeedsImprovement];

    /// Wire spelling, identical to the serde representation.
    pub fn label(self) -> &'static str {
        match self {
            Rating::Good => "Good",
            Rating::Fair => "Fair",
            Rating::NeedsImprovement => "Needs Improvement",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub section: String,
    pub rating: Rating,
    pub comment: String,
}

/// A resume bullet rewritten as Action Verb + Task + Result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovedBullet {
    pub original: String,
    pub improved: String,
    pub reason: String,
}

/// The structured critique produced by one analysis run.
///
/// Every field is required on the wire. Collection fields may be empty
/// arrays but must be present, so none of them carry `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub score: f64,
    pub summary: String,
    pub feedback: Vec<FeedbackItem>,
    pub improved_bullets: Vec<ImprovedBullet>,
    pub missing_sections: Vec<String>,
    pub ats_tips: Vec<String>,
}

impl AnalysisResult {
    /// Checks the constraints JSON deserialization cannot express.
    /// Returns a description of the first violation found.
    pub fn validate(&self) -> Result<(), String> {
        if !self.score.is_finite() || !(0.0..=MAX_SCORE).contains(&self.score) {
            return Err(format!(
                "score {} is outside the range 0-{MAX_SCORE}",
                self.score
            ));
        }
        if self.summary.trim().is_empty() {
            return Err("summary is empty".to_string());
        }
        for (idx, item) in self.feedback.iter().enumerate() {
            if item.section.trim().is_empty() {
                return Err(format!("feedback[{idx}].section is empty"));
            }
            if item.comment.trim().is_empty() {
                return Err(format!("feedback[{idx}].comment is empty"));
            }
        }
        Ok(())
    }
}
