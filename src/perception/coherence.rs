use super::dimensions::ExtendedDimensions;
use super::kinetics::BiologicalOptimizer;
use crate::error::{PerceptionError, PerceptionResult};
use crate::lens::LensCalibration;

/// Upper bound of the coherence scalar.
pub const MAX_COHERENCE: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoherenceScore {
    pub coherence: f64,
    pub optimized_activation: f64,
}

/// Composite coherence over the extended dimensions.
///
/// Consistency multiplies wisdom and belonging, so an inconsistent artifact
/// cannot turn either into coherence. Optimized activation and the
/// depth/interference coupling are added unconditionally. Only the lens'
/// kinetic constants are read; its weights are not applied.
pub struct CoherenceCalculator;

impl CoherenceCalculator {
    pub fn coherence(extended: &ExtendedDimensions, lens: &LensCalibration) -> PerceptionResult<CoherenceScore> {
        let optimized_activation = BiologicalOptimizer::optimize(
            extended.activation,
            lens.saturation_constant,
            lens.inhibition_constant,
        )
        .map_err(|e| PerceptionError::InvalidKineticConstants {
            lens: lens.id.clone(),
            saturation: e.saturation,
            inhibition: e.inhibition,
        })?;

        let raw = extended.consistency
            + extended.wisdom * extended.consistency
            + optimized_activation
            + extended.belonging * extended.consistency
            + extended.temporal_depth * extended.interference;

        Ok(CoherenceScore {
            coherence: raw.clamp(0.0, MAX_COHERENCE),
            optimized_activation,
        })
    }
}
