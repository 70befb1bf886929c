//! Serde roundtrip and JsonSchema validation for the records `whatif` emits.

use schemars::schema_for;
use whatif_core::entities::*;
use whatif_core::enums::*;
use whatif_core::reports::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

roundtrip_and_validate!(
    control_roundtrip,
    Control,
    Control {
        name: "Multi-Factor Authentication".into(),
        description: "Requires multiple forms of identity verification".into(),
        mitigates: vec!["Phishing".into(), "Insider Threat".into()],
        effectiveness: Level::High,
        status: ControlStatus::Active,
    }
);

roundtrip_and_validate!(
    relationship_state_roundtrip,
    RelationshipState,
    RelationshipState {
        source: "Offline Backups".into(),
        target: "Ransomware".into(),
        kind: RelationKind::Mitigates,
        active: false,
    }
);

roundtrip_and_validate!(
    expected_impact_roundtrip,
    ExpectedImpact,
    ExpectedImpact {
        disabled_control: "Offline Backups".into(),
        threats_should_mention: vec!["Ransomware".into()],
        assets_should_mention: vec!["Customer Data".into(), "Internal Systems".into()],
        remaining_controls: vec![RemainingCoverage {
            threat: "Ransomware".into(),
            controls: vec![
                "Endpoint Detection & Response".into(),
                "Network Firewall".into(),
            ],
        }],
        threats_should_not_mention: vec![
            "Phishing".into(),
            "Insider Threat".into(),
            "DDoS Attack".into(),
        ],
        control_effectiveness: Level::High,
    }
);

roundtrip_and_validate!(
    validation_result_roundtrip,
    ValidationResult,
    ValidationResult {
        threats_mentioned: vec!["Ransomware".into()],
        threats_missed: Vec::new(),
        threats_hallucinated: Vec::new(),
        assets_mentioned: vec!["Customer Data".into()],
        assets_missed: vec!["Internal Systems".into()],
        score: 200.0 / 3.0,
        issues: vec!["OMISSION: Should have mentioned 'Internal Systems' at risk but didn't".into()],
    }
);

#[test]
fn control_status_defaults_to_active() {
    let control: Control = serde_json::from_value(serde_json::json!({
        "name": "Offline Backups",
        "description": "Air-gapped copies of critical data",
        "mitigates": ["Ransomware"],
        "effectiveness": "high"
    }))
    .expect("status is optional");
    assert_eq!(control.status, ControlStatus::Active);
}

#[test]
fn unknown_rating_is_rejected() {
    let parsed = serde_json::from_value::<Asset>(serde_json::json!({
        "name": "Customer Data",
        "description": "PII",
        "criticality": "extreme"
    }));
    assert!(parsed.is_err());
}
