//! Metadata heuristics for code repositories
//!
//! Turns counts and flags the host already collected about a repository into
//! raw dimensions. No file access happens here.

use serde::{Deserialize, Serialize};

use super::DimensionSource;
use crate::error::SourceError;
use crate::perception::RawDimensions;

/// Structure and quality indicators for one repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryProfile {
    pub name: String,
    pub code_files: u32,
    pub test_files: u32,
    pub doc_files: u32,
    pub config_files: u32,
    pub total_lines: u32,
    pub comment_lines: u32,
    pub docstring_count: u32,
    pub function_count: u32,
    pub class_count: u32,
    pub type_hint_count: u32,
    pub has_readme: bool,
    pub has_tests: bool,
    pub has_ci: bool,
    pub has_license: bool,
    pub has_manifest: bool,
    /// Conventional source root (`src/` or `lib/`) present
    pub has_source_root: bool,
    /// Activity reading from history analysis, if the host has one
    pub activity: Option<f64>,
}

/// Additive heuristics over a [`RepositoryProfile`].
#[derive(Debug, Clone)]
pub struct RepositoryHeuristics {
    profile: RepositoryProfile,
}

impl RepositoryHeuristics {
    /// Activation used when no history analysis is available.
    pub const DEFAULT_ACTIVATION: f64 = 0.5;

    pub fn new(profile: RepositoryProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &RepositoryProfile {
        &self.profile
    }

    fn consistency(p: &RepositoryProfile) -> f64 {
        let mut psi = 0.4;
        if p.has_readme { psi += 0.15; }
        if p.has_tests { psi += 0.15; }
        if p.has_license { psi += 0.1; }
        if p.doc_files > 0 { psi += 0.1; }
        if p.function_count > 0 && p.class_count > 0 { psi += 0.1; }
        psi
    }

    fn wisdom(p: &RepositoryProfile) -> f64 {
        let mut rho = 0.3;
        if p.has_tests { rho += 0.2; }
        if p.has_ci { rho += 0.15; }
        if p.test_files > 5 { rho += 0.1; }
        if p.docstring_count > 10 { rho += 0.1; }
        if f64::from(p.comment_lines) / f64::from(p.total_lines.max(1)) > 0.1 { rho += 0.1; }
        if p.type_hint_count > 5 { rho += 0.05; }
        rho
    }

    fn belonging(p: &RepositoryProfile) -> f64 {
        let mut f = 0.4;
        if p.has_readme { f += 0.15; }
        if p.has_manifest { f += 0.15; }
        if p.code_files > 0 { f += 0.15; }
        if p.config_files > 0 { f += 0.1; }
        if p.has_source_root { f += 0.05; }
        f
    }

    pub fn dimensions(&self) -> Result<RawDimensions, SourceError> {
        let p = &self.profile;
        let activation = match p.activity {
            Some(a) if !a.is_finite() => {
                return Err(SourceError::Malformed(format!("{}: activity is not a number", p.name)));
            }
            Some(a) => a.clamp(0.0, 1.0),
            None => Self::DEFAULT_ACTIVATION,
        };

        Ok(RawDimensions::new(
            Self::consistency(p).min(1.0),
            Self::wisdom(p).min(1.0),
            activation,
            Self::belonging(p).min(1.0),
        ))
    }
}

impl DimensionSource for RepositoryHeuristics {
    fn name(&self) -> &str {
        &self.profile.name
    }

    fn read(&self) -> Result<RawDimensions, SourceError> {
        self.dimensions()
    }
}
