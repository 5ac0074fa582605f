//! Output of an out-of-process analyzer.
//!
//! Analyzers print a JSON envelope on stdout:
//!
//! ```json
//! { "success": true,  "reading": { "consistency": 0.8, "wisdom": 0.6, "activation": 0.4, "belonging": 0.7 } }
//! { "success": false, "error": "not enough samples", "type": "ValueError" }
//! ```

use serde::Deserialize;

use super::DimensionSource;
use crate::error::SourceError;
use crate::perception::RawDimensions;

#[derive(Debug, Clone, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    reading: Option<RawDimensions>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

/// Captured stdout of one analyzer run.
#[derive(Debug, Clone)]
pub struct AnalyzerEnvelope {
    analyzer: String,
    stdout: String,
}

impl AnalyzerEnvelope {
    pub fn new(analyzer: impl Into<String>, stdout: impl Into<String>) -> Self {
        Self {
            analyzer: analyzer.into(),
            stdout: stdout.into(),
        }
    }

    fn parse(&self) -> Result<RawDimensions, SourceError> {
        let envelope: Envelope = serde_json::from_str(self.stdout.trim())
            .map_err(|e| SourceError::Malformed(format!("{}: {}", self.analyzer, e)))?;

        if !envelope.success {
            let error = envelope.error.unwrap_or_else(|| "unknown failure".to_string());
            return Err(match envelope.kind {
                Some(kind) => SourceError::Unavailable(format!("{} ({})", error, kind)),
                None => SourceError::Unavailable(error),
            });
        }

        let reading = envelope
            .reading
            .ok_or_else(|| SourceError::Malformed(format!("{}: success without reading", self.analyzer)))?;

        let values = [reading.consistency, reading.wisdom, reading.activation, reading.belonging];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(SourceError::Malformed(format!("{}: non-finite dimension", self.analyzer)));
        }
        Ok(reading)
    }
}

impl DimensionSource for AnalyzerEnvelope {
    fn name(&self) -> &str {
        &self.analyzer
    }

    fn read(&self) -> Result<RawDimensions, SourceError> {
        self.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_envelope() {
        let out = r#"{"success": true, "reading": {"consistency": 0.8, "wisdom": 0.6, "activation": 0.4, "belonging": 0.7}}"#;
        let raw = AnalyzerEnvelope::new("numeric", out).read().unwrap();
        assert_eq!(raw, RawDimensions::new(0.8, 0.6, 0.4, 0.7));
    }

    #[test]
    fn test_failed_envelope() {
        let out = r#"{"success": false, "error": "not enough samples", "type": "ValueError"}"#;
        match AnalyzerEnvelope::new("numeric", out).read() {
            Err(SourceError::Unavailable(msg)) => assert!(msg.contains("ValueError")),
            other => panic!("expected unavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_partial_reading_is_malformed() {
        let out = r#"{"success": true, "reading": {"consistency": 0.8}}"#;
        assert!(matches!(AnalyzerEnvelope::new("graph", out).read(), Err(SourceError::Malformed(_))));

        let garbage = "Traceback (most recent call last):";
        assert!(matches!(AnalyzerEnvelope::new("graph", garbage).read(), Err(SourceError::Malformed(_))));
    }
}
