use serde::{Deserialize, Serialize};
use super::dimensions::ExtendedDimensions;

/// Ordinal confidence in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Signal strength of the raw dimensions, discounted by interference.
pub struct ConfidenceClassifier;

impl ConfidenceClassifier {
    pub const HIGH_THRESHOLD: f64 = 0.6;
    pub const MEDIUM_THRESHOLD: f64 = 0.35;

    pub fn adjusted_signal(extended: &ExtendedDimensions) -> f64 {
        let signal = extended.raw().mean();
        signal * (1.0 - extended.interference * 0.5)
    }

    pub fn classify(extended: &ExtendedDimensions) -> Confidence {
        Self::from_adjusted(Self::adjusted_signal(extended))
    }

    pub fn from_adjusted(adjusted: f64) -> Confidence {
        if adjusted >= Self::HIGH_THRESHOLD {
            Confidence::High
        } else if adjusted >= Self::MEDIUM_THRESHOLD {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}
