//! Warning generation
//!
//! Qualitative risk tags over the extended dimensions and the coherence
//! scalar. Each rule is evaluated on its own; several may co-occur.

use super::dimensions::ExtendedDimensions;
use super::rules::{evaluate, Rule};

/// What a warning rule can see.
#[derive(Debug, Clone, Copy)]
pub struct WarningContext {
    pub dimensions: ExtendedDimensions,
    pub coherence: f64,
}

pub const WARNING_RULES: &[Rule<WarningContext>] = &[
    Rule::new("low_coherence", |c| c.coherence < 1.0),
    Rule::new("chaotic_activation", |c| c.dimensions.activation >= 0.7 && c.dimensions.consistency <= 0.3),
    Rule::new("isolated_wisdom", |c| c.dimensions.belonging <= 0.3 && c.dimensions.wisdom >= 0.5),
    Rule::new("high_interference", |c| c.dimensions.interference >= 0.6),
    // Already damped by the optimizer; tagged so the damping is visible.
    Rule::new("activation_damped", |c| c.dimensions.activation >= 0.9),
    // High wisdom normally implies at least moderate temporal depth.
    Rule::new("temporal_anomaly", |c| c.dimensions.temporal_depth <= 0.2 && c.dimensions.wisdom >= 0.5),
];

pub struct WarningGenerator;

impl WarningGenerator {
    pub fn generate(extended: &ExtendedDimensions, coherence: f64) -> Vec<String> {
        let context = WarningContext { dimensions: *extended, coherence };
        evaluate(WARNING_RULES, &context)
    }
}
