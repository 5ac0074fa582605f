//! Dimension Sources
//!
//! The boundary to whatever produces raw dimensions. A source either returns
//! a complete reading or an explicit failure; the engine is never handed a
//! partial one. Timeouts, retries and process management stay with the host.

mod analyzer;
mod repository;

pub use analyzer::AnalyzerEnvelope;
pub use repository::{RepositoryHeuristics, RepositoryProfile};

use crate::error::SourceError;
use crate::perception::RawDimensions;

/// A producer of raw dimensions for one artifact.
pub trait DimensionSource: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Produce a reading or an explicit failure.
    fn read(&self) -> Result<RawDimensions, SourceError>;
}

/// A reading that was already obtained elsewhere.
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    reading: Result<RawDimensions, SourceError>,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, reading: RawDimensions) -> Self {
        Self { name: name.into(), reading: Ok(reading) }
    }

    pub fn failed(name: impl Into<String>, error: SourceError) -> Self {
        Self { name: name.into(), reading: Err(error) }
    }
}

impl DimensionSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> Result<RawDimensions, SourceError> {
        self.reading.clone()
    }
}
