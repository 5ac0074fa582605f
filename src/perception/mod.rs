//! Perception Module
//!
//! The dimensional perception engine: extended-dimension estimation,
//! biological optimization of activation, composite coherence, pattern and
//! warning tagging, and confidence classification.

pub mod dimensions;
pub mod kinetics;
pub mod coherence;
pub mod rules;
pub mod patterns;
pub mod warnings;
pub mod confidence;
mod engine;

pub use coherence::{CoherenceCalculator, CoherenceScore, MAX_COHERENCE};
pub use confidence::{Confidence, ConfidenceClassifier};
pub use dimensions::{DimensionPolicy, ExtendedDimensionEstimator, ExtendedDimensions, RawDimensions};
pub use engine::PerceptionEngine;
pub use kinetics::BiologicalOptimizer;
pub use patterns::PatternDetector;
pub use warnings::WarningGenerator;

use serde::{Deserialize, Serialize};

/// Output of one perception.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerceptionReport {
    /// Lens the reading was perceived through
    pub lens_id: String,
    pub dimensions: ExtendedDimensions,
    /// Composite coherence in [0, 4]
    pub coherence: f64,
    pub optimized_activation: f64,
    pub confidence: Confidence,
    pub patterns: Vec<String>,
    pub warnings: Vec<String>,
}

impl PerceptionReport {
    pub fn has_pattern(&self, tag: &str) -> bool {
        self.patterns.iter().any(|p| p == tag)
    }

    pub fn has_warning(&self, tag: &str) -> bool {
        self.warnings.iter().any(|w| w == tag)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
