//! Candidate selection
//!
//! Viability ratings and ranking over perception reports, for hosts that
//! choose among several candidate artifacts.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::perception::PerceptionReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Viability {
    Unfit,
    Marginal,
    Viable,
    Prime,
}

impl Viability {
    pub fn from_report(report: &PerceptionReport) -> Self {
        let c = report.coherence;
        if c > 2.5 && report.dimensions.consistency > 0.7 {
            Viability::Prime
        } else if c > 1.8 {
            Viability::Viable
        } else if c > 1.2 {
            Viability::Marginal
        } else {
            Viability::Unfit
        }
    }

    pub fn proceed(&self) -> bool {
        !matches!(self, Viability::Unfit)
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Viability::Prime => "Adopt. High coherence and clean internal structure.",
            Viability::Viable => "Adopt with standard caution. Good integration potential.",
            Viability::Marginal => "Extract specific components only. Full adoption is risky.",
            Viability::Unfit => "Reject. Low coherence indicates integration difficulties.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViabilityAssessment {
    pub viability: Viability,
    pub proceed: bool,
    pub recommendation: String,
    pub cautions: Vec<String>,
}

impl ViabilityAssessment {
    pub fn assess(report: &PerceptionReport) -> Self {
        let viability = Viability::from_report(report);
        let d = &report.dimensions;

        let mut cautions = Vec::new();
        if d.consistency < 0.5 {
            cautions.push("Low internal consistency; expect fragmentation on integration".to_string());
        }
        if d.wisdom < 0.4 {
            cautions.push("Low accumulated wisdom; patterns are largely untested".to_string());
        }
        if d.belonging < 0.4 {
            cautions.push("Poor ecosystem fit; heavy adaptation likely".to_string());
        }

        Self {
            viability,
            proceed: viability.proceed(),
            recommendation: viability.recommendation().to_string(),
            cautions,
        }
    }
}

/// A named report competing for selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub report: PerceptionReport,
}

impl Candidate {
    pub fn new(name: impl Into<String>, report: PerceptionReport) -> Self {
        Self { name: name.into(), report }
    }

    pub fn assessment(&self) -> ViabilityAssessment {
        ViabilityAssessment::assess(&self.report)
    }
}

/// Sort best first: coherence, then confidence, then name.
pub fn rank_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| {
        b.report
            .coherence
            .partial_cmp(&a.report.coherence)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.report.confidence.cmp(&a.report.confidence))
            .then_with(|| a.name.cmp(&b.name))
    });
}
