use crate::models::analysis::MAX_SCORE;

/// Colour band of the score gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Strong,
    Moderate,
    Weak,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            ScoreBand::Strong
        } else if score >= 5.0 {
            ScoreBand::Moderate
        } else {
            ScoreBand::Weak
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ScoreBand::Strong => "band-strong",
            ScoreBand::Moderate => "band-moderate",
            ScoreBand::Weak => "band-weak",
        }
    }
}

/// Gauge fill, 0–100.
pub fn score_percent(score: f64) -> u32 {
    ((score / MAX_SCORE) * 100.0).clamp(0.0, 100.0).round() as u32
}

/// "7" for whole scores, "8.5" otherwise.
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.0}")
    } else {
        format!("{score:.1}")
    }
}
