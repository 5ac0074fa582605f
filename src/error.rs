//! Error types for the perception engine.

use thiserror::Error;

/// Result type for perception operations.
pub type PerceptionResult<T> = Result<T, PerceptionError>;

/// Errors raised while resolving lenses or computing a report.
#[derive(Debug, Error)]
pub enum PerceptionError {
    /// An explicitly requested lens is not registered.
    #[error("calibration not found: {0}")]
    UnknownLens(String),

    /// A lens carries a saturation or inhibition constant that is not strictly positive.
    #[error("invalid kinetic constants on lens '{lens}': saturation={saturation}, inhibition={inhibition}")]
    InvalidKineticConstants {
        /// Lens that carried the constants.
        lens: String,
        /// Saturation constant (Km).
        saturation: f64,
        /// Inhibition constant (Ki).
        inhibition: f64,
    },

    /// A lens carries a weight that is negative or not a number.
    #[error("invalid weights on lens '{lens}': {weights:?}")]
    InvalidWeights {
        lens: String,
        weights: [f64; 4],
    },

    /// A raw dimension was not a number or fell outside [0, 1] under strict validation.
    #[error("malformed dimensions: {dimension}={value}")]
    MalformedDimensions {
        /// Name of the offending dimension.
        dimension: &'static str,
        /// Value as supplied.
        value: f64,
    },

    /// Invalid engine configuration.
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Failure reported by a raw-dimension producer.
///
/// These never surface as [`PerceptionError`]; the engine treats them as
/// "no reading available".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    #[error("source unavailable: {0}")]
    Unavailable(String),

    #[error("source timed out after {0} ms")]
    Timeout(u64),

    #[error("source returned malformed data: {0}")]
    Malformed(String),
}
