//! Lens Module
//!
//! Calibrations ("lenses") and the registry that resolves them by id.

mod registry;

pub use registry::LensRegistry;

use serde::{Deserialize, Serialize};

use crate::error::{PerceptionError, PerceptionResult};

/// Id of the lens used when no lens is requested.
pub const DEFAULT_LENS: &str = "balanced";

/// A named calibration for a particular assessment context.
///
/// `weights` are ordered consistency, wisdom, activation, belonging. They are
/// carried with the lens but the coherence formula only reads the two
/// kinetic constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LensCalibration {
    pub id: String,
    pub description: String,
    pub weights: [f64; 4],
    /// Km, the saturation constant of the activation optimizer
    pub saturation_constant: f64,
    /// Ki, the self-inhibition constant of the activation optimizer
    pub inhibition_constant: f64,
    /// Descriptive labels, documentation only
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl LensCalibration {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        weights: [f64; 4],
        saturation_constant: f64,
        inhibition_constant: f64,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            weights,
            saturation_constant,
            inhibition_constant,
            patterns: Vec::new(),
        }
    }

    pub fn with_pattern(mut self, label: impl Into<String>) -> Self {
        self.patterns.push(label.into());
        self
    }

    /// Weights must be finite and non-negative.
    ///
    /// Kinetic constants are not checked here; a lens with bad constants is
    /// accepted and fails when a report is computed through it.
    pub fn validate(&self) -> PerceptionResult<()> {
        if self.weights.iter().all(|w| w.is_finite() && *w >= 0.0) {
            Ok(())
        } else {
            Err(PerceptionError::InvalidWeights {
                lens: self.id.clone(),
                weights: self.weights,
            })
        }
    }

    /// The built-in lens set. `balanced` is the default.
    pub fn builtin() -> Vec<LensCalibration> {
        vec![
            LensCalibration::new(DEFAULT_LENS, "Balanced translation lens", [0.25, 0.25, 0.25, 0.25], 0.2, 0.8)
                .with_pattern("general_purpose"),
            LensCalibration::new("academic", "Evidence-based structured argumentation", [0.30, 0.35, 0.10, 0.25], 0.25, 0.9)
                .with_pattern("citation_dense")
                .with_pattern("methodical"),
            LensCalibration::new("digital_native", "Rapid networked communication", [0.20, 0.15, 0.35, 0.30], 0.15, 1.2)
                .with_pattern("fast_iteration")
                .with_pattern("network_effects"),
            LensCalibration::new("contemplative", "Paradoxical wisdom traditions", [0.35, 0.40, 0.15, 0.10], 0.3, 0.6)
                .with_pattern("slow_maturation"),
            LensCalibration::new("activist", "Justice-oriented collective action", [0.15, 0.20, 0.35, 0.30], 0.18, 1.0)
                .with_pattern("mobilization")
                .with_pattern("collective_voice"),
            LensCalibration::new("trauma_informed", "Crisis and high-distress contexts", [0.20, 0.15, 0.40, 0.25], 0.35, 0.5)
                .with_pattern("heightened_activation"),
        ]
    }
}
