//! Counterfactual mitigation coverage.
//!
//! For each threat, coverage is the set of controls whose `mitigates` list
//! names it, minus the control being hypothetically disabled. Cost is
//! O(|controls| × |threats|) per report.

use whatif_core::errors::CoreError;
use whatif_core::reports::{CoverageChange, CoverageMatrix, CoverageReport, ThreatCoverage};

use crate::kb::KnowledgeBase;

/// Compute coverage for every threat with `disabled_control` excluded.
///
/// `None` yields the baseline. A name that is not a known control excludes
/// nothing, so the result is the baseline as well (logged at `warn`).
#[must_use]
pub fn compute_coverage(kb: &KnowledgeBase, disabled_control: Option<&str>) -> CoverageReport {
    let disabled_control = disabled_control.filter(|name| {
        let known = kb.has_control(name);
        if !known {
            tracing::warn!(
                control = name,
                "unknown control in coverage hypothesis; reporting baseline"
            );
        }
        known
    });

    let threats = kb
        .threat_names()
        .map(|threat| {
            let controls = mitigating_controls(kb, threat, disabled_control);
            ThreatCoverage {
                threat: threat.to_string(),
                mitigated: !controls.is_empty(),
                count: controls.len(),
                controls,
            }
        })
        .collect();

    CoverageReport {
        disabled_control: disabled_control.map(str::to_string),
        threats,
    }
}

/// Baseline and counterfactual control counts for every threat.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] if `disabled_control` is not a known control.
pub fn coverage_delta(
    kb: &KnowledgeBase,
    disabled_control: &str,
) -> Result<Vec<CoverageChange>, CoreError> {
    kb.get_control(disabled_control)?;

    let baseline = compute_coverage(kb, None);
    let counterfactual = compute_coverage(kb, Some(disabled_control));

    Ok(baseline
        .threats
        .iter()
        .zip(&counterfactual.threats)
        .map(|(before, after)| {
            let lost = before.count.saturating_sub(after.count);
            CoverageChange {
                threat: before.threat.clone(),
                baseline: before.count,
                counterfactual: after.count,
                delta: -i64::try_from(lost).unwrap_or(i64::MAX),
                mitigated: after.mitigated,
            }
        })
        .collect())
}

/// Which control mitigates which threat, as a threat × control grid.
#[must_use]
pub fn coverage_matrix(kb: &KnowledgeBase) -> CoverageMatrix {
    let cells = kb
        .threats()
        .iter()
        .map(|threat| {
            kb.controls()
                .iter()
                .map(|control| control.mitigates(&threat.name))
                .collect()
        })
        .collect();

    CoverageMatrix {
        threats: kb.threat_names().map(str::to_string).collect(),
        controls: kb.control_names().map(str::to_string).collect(),
        cells,
    }
}

/// Controls mitigating `threat`, skipping `excluded`, in declaration order.
///
/// Shared by the coverage report and the expectation deriver so both agree
/// on what "remaining" means.
pub(crate) fn mitigating_controls(
    kb: &KnowledgeBase,
    threat: &str,
    excluded: Option<&str>,
) -> Vec<String> {
    kb.controls()
        .iter()
        .filter(|control| excluded != Some(control.name.as_str()))
        .filter(|control| control.mitigates(threat))
        .map(|control| control.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::embedded().expect("embedded ontology should validate")
    }

    #[test]
    fn baseline_counts_every_mitigating_control() {
        let report = compute_coverage(&kb(), None);
        assert!(report.is_baseline());

        let counts: Vec<_> = report
            .threats
            .iter()
            .map(|entry| (entry.threat.as_str(), entry.count))
            .collect();
        assert_eq!(
            counts,
            vec![
                ("Ransomware", 3),
                ("Phishing", 2),
                ("Insider Threat", 3),
                ("DDoS Attack", 1),
            ]
        );
        assert_eq!(report.unmitigated().count(), 0);
    }

    #[test]
    fn disabling_firewall_leaves_ddos_unmitigated() {
        let report = compute_coverage(&kb(), Some("Network Firewall"));
        let ddos = report.get("DDoS Attack").unwrap();
        assert!(!ddos.mitigated);
        assert_eq!(ddos.count, 0);
        assert_eq!(
            report.get("Ransomware").unwrap().controls,
            vec!["Endpoint Detection & Response", "Offline Backups"]
        );
    }

    #[test]
    fn unknown_control_reports_baseline() {
        let kb = kb();
        let report = compute_coverage(&kb, Some("Air Gap"));
        assert!(report.is_baseline());
        assert_eq!(report, compute_coverage(&kb, None));
    }

    #[test]
    fn delta_reports_lost_controls() {
        let changes = coverage_delta(&kb(), "Multi-Factor Authentication").unwrap();
        let deltas: Vec<_> = changes
            .iter()
            .map(|change| (change.threat.as_str(), change.delta))
            .collect();
        assert_eq!(
            deltas,
            vec![
                ("Ransomware", 0),
                ("Phishing", -1),
                ("Insider Threat", -1),
                ("DDoS Attack", 0),
            ]
        );
    }

    #[test]
    fn delta_rejects_unknown_control() {
        assert!(matches!(
            coverage_delta(&kb(), "Air Gap"),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn matrix_marks_mitigations() {
        let matrix = coverage_matrix(&kb());
        assert_eq!(matrix.threats.len(), 4);
        assert_eq!(matrix.controls.len(), 5);
        // DDoS Attack row: only Network Firewall.
        assert_eq!(matrix.cells[3], vec![false, false, true, false, false]);
        let marked: usize = matrix
            .cells
            .iter()
            .map(|row| row.iter().filter(|cell| **cell).count())
            .sum();
        assert_eq!(marked, 9);
    }
}
