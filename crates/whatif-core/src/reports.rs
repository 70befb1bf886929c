//! Derived records returned by the engine and printed by `whatif`.
//!
//! None of these carry identity. They are recomputed from the knowledge base
//! and the current hypothesis on every call and never updated in place.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Level;

// ---------------------------------------------------------------------------
// Coverage
// ---------------------------------------------------------------------------

/// Mitigation coverage of a single threat under one hypothesis.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ThreatCoverage {
    pub threat: String,
    /// Mitigating controls, in KB declaration order.
    pub controls: Vec<String>,
    pub mitigated: bool,
    pub count: usize,
}

/// Coverage of every threat, with `disabled_control` excluded.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CoverageReport {
    /// `None` for the baseline (fully active) report.
    pub disabled_control: Option<String>,
    /// One entry per threat, in KB declaration order.
    pub threats: Vec<ThreatCoverage>,
}

impl CoverageReport {
    #[must_use]
    pub fn get(&self, threat: &str) -> Option<&ThreatCoverage> {
        self.threats.iter().find(|entry| entry.threat == threat)
    }

    #[must_use]
    pub fn is_baseline(&self) -> bool {
        self.disabled_control.is_none()
    }

    /// Threats left without any mitigating control.
    pub fn unmitigated(&self) -> impl Iterator<Item = &ThreatCoverage> {
        self.threats.iter().filter(|entry| !entry.mitigated)
    }
}

/// Baseline vs. counterfactual control count for one threat.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CoverageChange {
    pub threat: String,
    pub baseline: usize,
    pub counterfactual: usize,
    /// `counterfactual - baseline`; zero or negative.
    pub delta: i64,
    pub mitigated: bool,
}

/// Threat × control grid; `cells[t][c]` is true when control `c` mitigates threat `t`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CoverageMatrix {
    pub threats: Vec<String>,
    pub controls: Vec<String>,
    pub cells: Vec<Vec<bool>>,
}

// ---------------------------------------------------------------------------
// ExpectedImpact
// ---------------------------------------------------------------------------

/// Controls still mitigating one affected threat once the hypothesis holds.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RemainingCoverage {
    pub threat: String,
    /// In KB declaration order; empty when the threat is left unprotected.
    pub controls: Vec<String>,
}

/// Ground truth a correct analysis of one disabled control must agree with.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExpectedImpact {
    pub disabled_control: String,
    /// The control's `mitigates` list, in declared order.
    pub threats_should_mention: Vec<String>,
    /// Union of the targets of `threats_should_mention`, deduplicated, first-seen order.
    pub assets_should_mention: Vec<String>,
    /// One entry per threat in `threats_should_mention`, in the same order.
    pub remaining_controls: Vec<RemainingCoverage>,
    /// Every other threat, in KB declaration order.
    pub threats_should_not_mention: Vec<String>,
    pub control_effectiveness: Level,
}

impl ExpectedImpact {
    /// Backup controls for `threat`, empty when none remain or the threat is unaffected.
    #[must_use]
    pub fn remaining_for(&self, threat: &str) -> &[String] {
        self.remaining_controls
            .iter()
            .find(|entry| entry.threat == threat)
            .map_or(&[], |entry| entry.controls.as_slice())
    }

    /// Affected threats that lose their last mitigating control.
    #[must_use]
    pub fn unprotected_threats(&self) -> Vec<&str> {
        self.threats_should_mention
            .iter()
            .filter(|threat| self.remaining_for(threat).is_empty())
            .map(String::as_str)
            .collect()
    }

    /// Number of facts a response is scored against.
    #[must_use]
    pub fn total_expected(&self) -> usize {
        self.threats_should_mention.len() + self.assets_should_mention.len()
    }
}

// ---------------------------------------------------------------------------
// ValidationResult
// ---------------------------------------------------------------------------

/// Outcome of checking one analysis text against an [`ExpectedImpact`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ValidationResult {
    pub threats_mentioned: Vec<String>,
    pub threats_missed: Vec<String>,
    pub threats_hallucinated: Vec<String>,
    pub assets_mentioned: Vec<String>,
    pub assets_missed: Vec<String>,
    /// 0–100.
    pub score: f64,
    /// Omissions for threats, then hallucinations, then omissions for assets.
    pub issues: Vec<String>,
}

impl ValidationResult {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}
