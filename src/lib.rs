//! Coherence Lens
//!
//! Dimensional perception engine for ranking candidate artifacts:
//! - Pluggable lens calibrations (registry, file loading)
//! - Extended dimension estimation (temporal depth, interference)
//! - Biological optimization of activation (substrate-inhibition kinetics)
//! - Composite coherence, pattern and warning tags, confidence
//! - Viability assessment and candidate ranking

pub mod error;
pub mod lens;
pub mod perception;
pub mod sources;
pub mod selection;
pub mod config;
pub mod utils;

// Re-exports for convenience
pub use error::{PerceptionError, PerceptionResult, SourceError};
pub use lens::{LensCalibration, LensRegistry};
pub use perception::{Confidence, PerceptionEngine, PerceptionReport, RawDimensions};
pub use sources::DimensionSource;
