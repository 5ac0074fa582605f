//! Pattern detection
//!
//! Per-dimension high/low tags followed by cross-dimensional combinations.
//! High fires at >= 0.7 and low at <= 0.3 (activation: <= 0.2), so the two
//! can never fire together for one dimension.

use super::dimensions::ExtendedDimensions;
use super::rules::{evaluate, Rule};

pub const HIGH: f64 = 0.7;
pub const LOW: f64 = 0.3;
pub const DORMANT: f64 = 0.2;
pub const FRICTION: f64 = 0.5;

pub const PATTERN_RULES: &[Rule<ExtendedDimensions>] = &[
    Rule::new("internally_consistent", |d| d.consistency >= HIGH),
    Rule::new("internally_fragmented", |d| d.consistency <= LOW),
    Rule::new("battle_tested", |d| d.wisdom >= HIGH),
    Rule::new("untested", |d| d.wisdom <= LOW),
    Rule::new("highly_active", |d| d.activation >= HIGH),
    Rule::new("dormant", |d| d.activation <= DORMANT),
    Rule::new("ecosystem_native", |d| d.belonging >= HIGH),
    Rule::new("ecosystem_isolated", |d| d.belonging <= LOW),
    Rule::new("enduring", |d| d.temporal_depth >= HIGH),
    Rule::new("ephemeral", |d| d.temporal_depth <= LOW),
    Rule::new("observer_friction", |d| d.interference >= FRICTION),
    // Cross-dimensional
    Rule::new("mature_core", |d| d.wisdom >= HIGH && d.consistency >= HIGH),
    Rule::new("volatile_growth", |d| d.activation >= HIGH && d.consistency <= LOW),
    Rule::new("rooted_integration", |d| d.belonging >= HIGH && d.temporal_depth >= HIGH),
];

pub struct PatternDetector;

impl PatternDetector {
    pub fn detect(extended: &ExtendedDimensions) -> Vec<String> {
        evaluate(PATTERN_RULES, extended)
    }
}
