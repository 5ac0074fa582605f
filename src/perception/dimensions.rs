//! Raw and extended dimensions
//!
//! Raw dimensions are supplied by external analyzers. The two extended
//! dimensions (temporal depth and interference) have no direct signal and are
//! estimated from the raw four on every invocation.

use serde::{Deserialize, Serialize};
use crate::error::{PerceptionError, PerceptionResult};

/// Clamp a value into [0, 1].
pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// How out-of-range raw values are handled before estimation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionPolicy {
    /// Clamp into [0, 1] and proceed.
    #[default]
    Clamp,
    /// Reject anything outside [0, 1].
    Strict,
}

/// The four externally observed signals, each expected in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawDimensions {
    /// Internal coherence of the artifact
    pub consistency: f64,
    /// Accumulated maturity / battle-testing
    pub wisdom: f64,
    /// Current energy or activity level
    pub activation: f64,
    /// Fit with the surrounding ecosystem
    pub belonging: f64,
}

impl RawDimensions {
    pub fn new(consistency: f64, wisdom: f64, activation: f64, belonging: f64) -> Self {
        Self { consistency, wisdom, activation, belonging }
    }

    /// Neutral reading used when a host wants to substitute for a missing one.
    pub fn neutral() -> Self {
        Self::new(0.5, 0.5, 0.5, 0.5)
    }

    fn named(&self) -> [(&'static str, f64); 4] {
        [
            ("consistency", self.consistency),
            ("wisdom", self.wisdom),
            ("activation", self.activation),
            ("belonging", self.belonging),
        ]
    }

    /// Bring every value into [0, 1] according to `policy`.
    ///
    /// NaN cannot be clamped meaningfully and is rejected under both policies.
    pub fn normalized(&self, policy: DimensionPolicy) -> PerceptionResult<Self> {
        for (dimension, value) in self.named() {
            if value.is_nan() {
                return Err(PerceptionError::MalformedDimensions { dimension, value });
            }
            if policy == DimensionPolicy::Strict && !(0.0..=1.0).contains(&value) {
                return Err(PerceptionError::MalformedDimensions { dimension, value });
            }
        }

        Ok(Self {
            consistency: clamp01(self.consistency),
            wisdom: clamp01(self.wisdom),
            activation: clamp01(self.activation),
            belonging: clamp01(self.belonging),
        })
    }

    /// Arithmetic mean of the four raw signals.
    pub fn mean(&self) -> f64 {
        (self.consistency + self.wisdom + self.activation + self.belonging) / 4.0
    }
}

/// Raw dimensions plus the two estimated ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtendedDimensions {
    pub consistency: f64,
    pub wisdom: f64,
    pub activation: f64,
    pub belonging: f64,
    /// Estimated longevity / resilience
    pub temporal_depth: f64,
    /// Estimated friction the observer introduces
    pub interference: f64,
}

impl ExtendedDimensions {
    pub fn raw(&self) -> RawDimensions {
        RawDimensions::new(self.consistency, self.wisdom, self.activation, self.belonging)
    }
}

/// The two estimated dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub temporal_depth: f64,
    pub interference: f64,
}

/// Derives temporal depth and interference from the raw four.
///
/// The coefficients are fixed: wisdom dominates temporal depth with
/// consistency as a secondary proxy, and interference only rises when an
/// artifact is both inconsistent and active.
pub struct ExtendedDimensionEstimator;

impl ExtendedDimensionEstimator {
    pub const DEPTH_WISDOM_WEIGHT: f64 = 0.6;
    pub const DEPTH_CONSISTENCY_WEIGHT: f64 = 0.4;
    pub const INTERFERENCE_SCALE: f64 = 0.5;

    pub fn estimate(raw: &RawDimensions) -> Estimate {
        let temporal_depth = clamp01(
            Self::DEPTH_WISDOM_WEIGHT * raw.wisdom + Self::DEPTH_CONSISTENCY_WEIGHT * raw.consistency,
        );
        let interference =
            clamp01(Self::INTERFERENCE_SCALE * (1.0 - raw.consistency) * raw.activation);

        Estimate { temporal_depth, interference }
    }

    /// Estimate and attach the derived dimensions to a copy of `raw`.
    pub fn extend(raw: &RawDimensions) -> ExtendedDimensions {
        let Estimate { temporal_depth, interference } = Self::estimate(raw);
        ExtendedDimensions {
            consistency: raw.consistency,
            wisdom: raw.wisdom,
            activation: raw.activation,
            belonging: raw.belonging,
            temporal_depth,
            interference,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_temporal_depth_weights_wisdom() {
        let est = ExtendedDimensionEstimator::estimate(&RawDimensions::new(0.5, 1.0, 0.0, 0.0));
        assert!(approx(est.temporal_depth, 0.8));
        let est = ExtendedDimensionEstimator::estimate(&RawDimensions::new(1.0, 0.5, 0.0, 0.0));
        assert!(approx(est.temporal_depth, 0.7));
    }

    #[test]
    fn test_interference_needs_inconsistency_and_activity() {
        // Calm but inconsistent
        let calm = ExtendedDimensionEstimator::estimate(&RawDimensions::new(0.0, 0.5, 0.0, 0.5));
        assert!(approx(calm.interference, 0.0));
        // Busy but consistent
        let busy = ExtendedDimensionEstimator::estimate(&RawDimensions::new(1.0, 0.5, 1.0, 0.5));
        assert!(approx(busy.interference, 0.0));
        // Both
        let chaotic = ExtendedDimensionEstimator::estimate(&RawDimensions::new(0.0, 0.5, 1.0, 0.5));
        assert!(approx(chaotic.interference, 0.5));
    }

    #[test]
    fn test_clamp_policy() {
        let raw = RawDimensions::new(1.4, -0.2, 0.5, f64::INFINITY);
        let norm = raw.normalized(DimensionPolicy::Clamp).unwrap();
        assert_eq!(norm, RawDimensions::new(1.0, 0.0, 0.5, 1.0));
    }

    #[test]
    fn test_strict_policy_rejects_out_of_range() {
        let raw = RawDimensions::new(0.5, 1.2, 0.5, 0.5);
        match raw.normalized(DimensionPolicy::Strict) {
            Err(PerceptionError::MalformedDimensions { dimension, .. }) => assert_eq!(dimension, "wisdom"),
            other => panic!("expected malformed dimensions, got {:?}", other),
        }
        assert!(RawDimensions::new(0.0, 1.0, 0.3, 0.7).normalized(DimensionPolicy::Strict).is_ok());
    }

    #[test]
    fn test_nan_rejected_under_both_policies() {
        let raw = RawDimensions::new(0.5, 0.5, f64::NAN, 0.5);
        assert!(raw.normalized(DimensionPolicy::Clamp).is_err());
        assert!(raw.normalized(DimensionPolicy::Strict).is_err());
    }
}
