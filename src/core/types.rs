use serde::{Deserialize, Serialize};

/// Presentation-level classification of a final score (0-100 scale).
///
/// Thresholds are display guidance only; ordering always uses the
/// full-precision final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrength {
    Weak,
    Fair,
    Good,
    Strong,
}

impl MatchStrength {
    #[must_use]
    pub fn from_score(final_score: f64) -> Self {
        if final_score >= 90.0 {
            Self::Strong
        } else if final_score >= 70.0 {
            Self::Good
        } else if final_score >= 40.0 {
            Self::Fair
        } else {
            Self::Weak
        }
    }
}

impl std::fmt::Display for MatchStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weak => write!(f, "weak"),
            Self::Fair => write!(f, "fair"),
            Self::Good => write!(f, "good"),
            Self::Strong => write!(f, "strong"),
        }
    }
}
