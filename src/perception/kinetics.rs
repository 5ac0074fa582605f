//! Biological optimization of the activation dimension
//!
//! Substrate-inhibition kinetics: response saturates with activation and is
//! then pulled back down by a quadratic self-inhibition term, so extreme
//! activation is damped rather than amplified.
//!
//! ```text
//! v(a) = a / (Km + a + a² / Ki)
//! ```
//!
//! The curve peaks at `a = sqrt(Km · Ki)` and declines afterwards. The
//! response is below the input whenever `Km + a + a²/Ki > 1`; with the
//! default lens (Km = 0.2, Ki = 0.8) that holds for every `a` above ~0.495.
//! Low activation can come out higher than it went in.
//!
//! Reference points for the default lens: `v(0.5) = 0.49383` and, with
//! activation held at the ceiling, `v(1.0) = v(0.999) = 0.40834`.

use thiserror::Error;

/// Activation is held just below 1 to stay clear of the boundary.
pub const ACTIVATION_CEILING: f64 = 0.999;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("invalid kinetic constants: saturation={saturation}, inhibition={inhibition}")]
pub struct KineticsError {
    pub saturation: f64,
    pub inhibition: f64,
}

pub struct BiologicalOptimizer;

impl BiologicalOptimizer {
    /// Damp `activation` with saturation constant `saturation` (Km) and
    /// inhibition constant `inhibition` (Ki).
    ///
    /// Zero or negative activation returns 0 before the constants are looked at.
    pub fn optimize(activation: f64, saturation: f64, inhibition: f64) -> Result<f64, KineticsError> {
        if activation <= 0.0 {
            return Ok(0.0);
        }
        if !Self::valid_constants(saturation, inhibition) {
            return Err(KineticsError { saturation, inhibition });
        }

        let a = if activation >= 1.0 { ACTIVATION_CEILING } else { activation };
        let denominator = saturation + a + (a * a) / inhibition;
        Ok(a / denominator)
    }

    pub fn valid_constants(saturation: f64, inhibition: f64) -> bool {
        saturation.is_finite() && inhibition.is_finite() && saturation > 0.0 && inhibition > 0.0
    }

    /// Activation at which the optimized response peaks.
    pub fn peak_activation(saturation: f64, inhibition: f64) -> Option<f64> {
        Self::valid_constants(saturation, inhibition).then(|| (saturation * inhibition).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_values() {
        let mid = BiologicalOptimizer::optimize(0.5, 0.2, 0.8).unwrap();
        assert!((mid - 0.4938).abs() < 1e-4);

        // 0.999 / (0.2 + 0.999 + 0.999² / 0.8)
        let top = BiologicalOptimizer::optimize(1.0, 0.2, 0.8).unwrap();
        assert!((top - 0.40834).abs() < 1e-5);
        assert!((top - 0.4085).abs() < 5e-4);
    }

    #[test]
    fn test_zero_activation_short_circuits() {
        assert_eq!(BiologicalOptimizer::optimize(0.0, 0.2, 0.8), Ok(0.0));
        assert_eq!(BiologicalOptimizer::optimize(-0.3, 0.2, 0.8), Ok(0.0));
        // Takes precedence over invalid constants
        assert_eq!(BiologicalOptimizer::optimize(0.0, 0.0, -1.0), Ok(0.0));
    }

    #[test]
    fn test_invalid_constants_fail() {
        assert!(BiologicalOptimizer::optimize(0.5, 0.0, 0.8).is_err());
        assert!(BiologicalOptimizer::optimize(0.5, 0.2, -0.1).is_err());
        assert!(BiologicalOptimizer::optimize(0.5, f64::NAN, 0.8).is_err());
    }

    #[test]
    fn test_curve_is_not_monotonic() {
        let peak_at = BiologicalOptimizer::peak_activation(0.2, 0.8).unwrap();
        assert!((peak_at - 0.4).abs() < 1e-12);

        let peak = BiologicalOptimizer::optimize(peak_at, 0.2, 0.8).unwrap();
        let high = BiologicalOptimizer::optimize(0.95, 0.2, 0.8).unwrap();
        assert!(high < peak);
    }

    #[test]
    fn test_above_one_matches_ceiling() {
        let over = BiologicalOptimizer::optimize(3.0, 0.2, 0.8).unwrap();
        let ceiling = BiologicalOptimizer::optimize(ACTIVATION_CEILING, 0.2, 0.8).unwrap();
        assert_eq!(over, ceiling);
    }
}
