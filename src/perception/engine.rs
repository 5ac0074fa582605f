//! Perception Engine
//!
//! Runs one invocation end to end: resolve lens → estimate extended
//! dimensions → coherence → patterns → warnings → confidence → report.
//! Nothing is retained between invocations.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::coherence::CoherenceCalculator;
use super::confidence::ConfidenceClassifier;
use super::dimensions::{DimensionPolicy, ExtendedDimensionEstimator, RawDimensions};
use super::patterns::PatternDetector;
use super::warnings::WarningGenerator;
use super::PerceptionReport;
use crate::error::PerceptionResult;
use crate::lens::{LensCalibration, LensRegistry};
use crate::sources::DimensionSource;

pub struct PerceptionEngine {
    registry: Arc<LensRegistry>,
    policy: DimensionPolicy,
}

impl PerceptionEngine {
    pub fn new(registry: Arc<LensRegistry>) -> Self {
        Self {
            registry,
            policy: DimensionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: DimensionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn registry(&self) -> &Arc<LensRegistry> {
        &self.registry
    }

    pub fn policy(&self) -> DimensionPolicy {
        self.policy
    }

    /// Perceive `raw` through the lens `lens`, or the default lens if `None`.
    pub fn perceive(&self, raw: &RawDimensions, lens: Option<&str>) -> PerceptionResult<PerceptionReport> {
        let calibration = self.registry.resolve(lens)?;
        self.perceive_with(raw, &calibration)
    }

    /// Perceive `raw` through an already resolved calibration.
    pub fn perceive_with(&self, raw: &RawDimensions, lens: &LensCalibration) -> PerceptionResult<PerceptionReport> {
        let raw = raw.normalized(self.policy)?;
        let dimensions = ExtendedDimensionEstimator::extend(&raw);
        let score = CoherenceCalculator::coherence(&dimensions, lens)?;
        let patterns = PatternDetector::detect(&dimensions);
        let warnings = WarningGenerator::generate(&dimensions, score.coherence);
        let confidence = ConfidenceClassifier::classify(&dimensions);

        debug!(
            lens = %lens.id,
            coherence = score.coherence,
            confidence = %confidence,
            "Perception complete ({} patterns, {} warnings)",
            patterns.len(),
            warnings.len()
        );

        Ok(PerceptionReport {
            lens_id: lens.id.clone(),
            dimensions,
            coherence: score.coherence,
            optimized_activation: score.optimized_activation,
            confidence,
            patterns,
            warnings,
        })
    }

    /// Perceive the same reading through every registered lens, keyed by lens id.
    pub fn perceive_all_lenses(&self, raw: &RawDimensions) -> BTreeMap<String, PerceptionResult<PerceptionReport>> {
        self.registry
            .ids()
            .into_iter()
            .map(|id| {
                let report = self.perceive(raw, Some(id.as_str()));
                (id, report)
            })
            .collect()
    }

    /// Perceive several readings through one lens, resolved once.
    pub fn perceive_batch(&self, readings: &[RawDimensions], lens: Option<&str>) -> PerceptionResult<Vec<PerceptionReport>> {
        let calibration = self.registry.resolve(lens)?;
        readings
            .iter()
            .map(|raw| self.perceive_with(raw, &calibration))
            .collect()
    }

    /// Read from an external producer and perceive the result.
    ///
    /// A producer failure means "no reading available" and yields `Ok(None)`;
    /// it is not an engine error.
    pub fn perceive_source(&self, source: &dyn DimensionSource, lens: Option<&str>) -> PerceptionResult<Option<PerceptionReport>> {
        let calibration = self.registry.resolve(lens)?;
        match source.read() {
            Ok(raw) => {
                info!("🔬 Perceiving '{}' through lens '{}'", source.name(), calibration.id);
                self.perceive_with(&raw, &calibration).map(Some)
            }
            Err(e) => {
                warn!("No reading available from '{}': {}", source.name(), e);
                Ok(None)
            }
        }
    }
}
