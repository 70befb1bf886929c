//! Ground-truth facts for one disabled control.

use std::collections::HashSet;

use whatif_core::errors::CoreError;
use whatif_core::reports::{ExpectedImpact, RemainingCoverage};

use crate::coverage::mitigating_controls;
use crate::kb::KnowledgeBase;

/// Derive what a correct analysis of disabling `disabled_control` must and
/// must not say.
///
/// Pure function of the KB and one name. `threats_should_mention` and
/// `threats_should_not_mention` partition the KB's threats;
/// `remaining_controls` matches [`crate::compute_coverage`] for the same
/// hypothesis.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] if `disabled_control` is not a known control.
pub fn derive_expected_impact(
    kb: &KnowledgeBase,
    disabled_control: &str,
) -> Result<ExpectedImpact, CoreError> {
    let control = kb.get_control(disabled_control)?;
    let threats_should_mention = control.mitigates.clone();

    let mut seen = HashSet::new();
    let mut assets_should_mention = Vec::new();
    for threat in &threats_should_mention {
        for asset in &kb.get_threat(threat)?.targets {
            if seen.insert(asset.as_str()) {
                assets_should_mention.push(asset.clone());
            }
        }
    }

    let remaining_controls = threats_should_mention
        .iter()
        .map(|threat| RemainingCoverage {
            threat: threat.clone(),
            controls: mitigating_controls(kb, threat, Some(disabled_control)),
        })
        .collect();

    let threats_should_not_mention = kb
        .threat_names()
        .filter(|threat| !control.mitigates(threat))
        .map(str::to_string)
        .collect();

    Ok(ExpectedImpact {
        disabled_control: control.name.clone(),
        threats_should_mention,
        assets_should_mention,
        remaining_controls,
        threats_should_not_mention,
        control_effectiveness: control.effectiveness,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use whatif_core::enums::Level;

    use super::*;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::embedded().expect("embedded ontology should validate")
    }

    #[test]
    fn offline_backups_leave_ransomware_with_two_backups() {
        let expected = derive_expected_impact(&kb(), "Offline Backups").unwrap();
        assert_eq!(expected.threats_should_mention, vec!["Ransomware"]);
        assert_eq!(
            expected.assets_should_mention,
            vec!["Customer Data", "Internal Systems"]
        );
        assert_eq!(
            expected.remaining_for("Ransomware"),
            ["Endpoint Detection & Response", "Network Firewall"]
        );
        assert_eq!(
            expected.threats_should_not_mention,
            vec!["Phishing", "Insider Threat", "DDoS Attack"]
        );
        assert_eq!(expected.control_effectiveness, Level::High);
        assert!(expected.unprotected_threats().is_empty());
    }

    #[test]
    fn firewall_leaves_ddos_without_backup() {
        let expected = derive_expected_impact(&kb(), "Network Firewall").unwrap();
        assert_eq!(expected.unprotected_threats(), vec!["DDoS Attack"]);
        assert_eq!(
            expected.assets_should_mention,
            vec!["Customer Data", "Internal Systems", "Network Infrastructure"]
        );
        assert_eq!(expected.control_effectiveness, Level::Medium);
    }

    #[test]
    fn remaining_controls_follow_mitigates_order() {
        let expected = derive_expected_impact(&kb(), "Multi-Factor Authentication").unwrap();
        let threats: Vec<&str> = expected
            .remaining_controls
            .iter()
            .map(|entry| entry.threat.as_str())
            .collect();
        assert_eq!(threats, vec!["Phishing", "Insider Threat"]);
        assert_eq!(threats, expected.threats_should_mention);

        let json = serde_json::to_value(&expected).unwrap();
        assert_eq!(json["remaining_controls"][0]["threat"], "Phishing");
        assert_eq!(
            json["remaining_controls"][0]["controls"],
            serde_json::json!(["Security Awareness Training"])
        );
    }

    #[test]
    fn unknown_control_is_not_found() {
        let err = derive_expected_impact(&kb(), "Air Gap").unwrap_err();
        assert_eq!(err.to_string(), "control not found: 'Air Gap'");
    }
}
