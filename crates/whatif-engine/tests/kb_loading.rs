//! Knowledge base loading: file formats, integrity checks, derived edges.

use std::io::Write;

use pretty_assertions::assert_eq;
use schemars::schema_for;
use whatif_core::entities::Relationship;
use whatif_core::enums::{EntityKind, RelationKind};
use whatif_core::errors::SchemaIssue;
use whatif_engine::kb::EMBEDDED_ONTOLOGY;
use whatif_engine::{KbError, KnowledgeBase, OntologyDocument};

const BROKEN: &str = r#"
[[assets]]
name = "Customer Data"
description = "PII"
criticality = "high"

[[threats]]
name = "Phishing"
description = "Credential theft"
targets = ["Customer Data", "Mailboxes", "Laptops"]
likelihood = "high"
impact = "moderate"

[[controls]]
name = "Multi-Factor Authentication"
description = "Second factor"
mitigates = ["Phishing", "Credential Stuffing"]
effectiveness = "high"

[[controls]]
name = "Multi-Factor Authentication"
description = "Declared twice"
mitigates = ["Phishing", "Phishing"]
effectiveness = "low"
"#;

fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn schema_error_lists_every_dangling_reference() {
    let Err(KbError::Schema(err)) = KnowledgeBase::from_toml_str(BROKEN) else {
        panic!("broken document must fail schema validation");
    };

    let dangling: Vec<_> = err.dangling_references().cloned().collect();
    assert_eq!(
        dangling,
        vec![
            SchemaIssue::DanglingReference {
                relation: RelationKind::Targets,
                source: "Phishing".into(),
                target: "Mailboxes".into(),
            },
            SchemaIssue::DanglingReference {
                relation: RelationKind::Targets,
                source: "Phishing".into(),
                target: "Laptops".into(),
            },
            SchemaIssue::DanglingReference {
                relation: RelationKind::Mitigates,
                source: "Multi-Factor Authentication".into(),
                target: "Credential Stuffing".into(),
            },
        ]
    );

    assert!(err.issues.contains(&SchemaIssue::DuplicateEntity {
        entity_kind: EntityKind::Control,
        name: "Multi-Factor Authentication".into(),
    }));
    assert!(err.issues.contains(&SchemaIssue::DuplicateReference {
        relation: RelationKind::Mitigates,
        source: "Multi-Factor Authentication".into(),
        target: "Phishing".into(),
    }));
    assert_eq!(err.issues.len(), 5);
}

#[test]
fn blank_names_are_schema_issues() {
    let source = r#"
[[assets]]
name = ""
description = "Nameless"
criticality = "low"

[[threats]]
name = "   "
description = "Whitespace only"
targets = []
likelihood = "low"
impact = "minor"
"#;
    let Err(KbError::Schema(err)) = KnowledgeBase::from_toml_str(source) else {
        panic!("blank names must fail schema validation");
    };
    assert_eq!(
        err.issues,
        vec![
            SchemaIssue::BlankName {
                entity_kind: EntityKind::Asset,
                position: 0,
            },
            SchemaIssue::BlankName {
                entity_kind: EntityKind::Threat,
                position: 0,
            },
        ]
    );
    assert!(err.to_string().contains("asset #0 has a blank name"));
}

#[test]
fn loads_toml_and_json_files_by_extension() {
    let toml_file = write_temp(".toml", EMBEDDED_ONTOLOGY);
    let from_toml = KnowledgeBase::from_path(toml_file.path()).expect("toml loads");

    let json = serde_json::to_string_pretty(&from_toml.document()).unwrap();
    let json_file = write_temp(".json", &json);
    let from_json = KnowledgeBase::from_path(json_file.path()).expect("json loads");

    assert_eq!(from_json.document(), from_toml.document());
    assert_eq!(from_json.relationships(), from_toml.relationships());
}

#[test]
fn rejects_unknown_extension() {
    let file = write_temp(".yaml", "assets: []");
    assert!(matches!(
        KnowledgeBase::from_path(file.path()),
        Err(KbError::UnsupportedFormat(_))
    ));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = KnowledgeBase::from_path(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, KbError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn malformed_toml_is_parse_error() {
    let err = KnowledgeBase::from_toml_str("[[assets]]\nname = ").unwrap_err();
    assert!(matches!(err, KbError::Toml(_)));
}

#[test]
fn empty_document_is_a_valid_empty_kb() {
    let kb = KnowledgeBase::from_toml_str("").expect("all sections are optional");
    assert!(kb.threats().is_empty());
    assert!(kb.relationships().is_empty());
}

#[test]
fn embedded_document_matches_generated_schema() {
    let document: OntologyDocument = toml::from_str(EMBEDDED_ONTOLOGY).unwrap();
    let schema = serde_json::to_value(schema_for!(OntologyDocument)).unwrap();
    let instance = serde_json::to_value(&document).unwrap();

    let validator = jsonschema::validator_for(&schema).expect("schema should be valid");
    let errors: Vec<String> = validator
        .iter_errors(&instance)
        .map(|e| format!("{e}"))
        .collect();
    assert!(errors.is_empty(), "schema errors: {errors:?}");
}

/// The hand-maintained edge list the embedded ontology was drawn up from.
fn authored_edges() -> Vec<Relationship> {
    let edge = |source: &str, target: &str, kind| Relationship {
        source: source.into(),
        target: target.into(),
        kind,
    };
    use RelationKind::{Mitigates, Targets};
    vec![
        edge("Ransomware", "Customer Data", Targets),
        edge("Ransomware", "Internal Systems", Targets),
        edge("Phishing", "Customer Data", Targets),
        edge("Phishing", "Internal Systems", Targets),
        edge("Insider Threat", "Customer Data", Targets),
        edge("Insider Threat", "Internal Systems", Targets),
        edge("DDoS Attack", "Network Infrastructure", Targets),
        edge("DDoS Attack", "Internal Systems", Targets),
        edge("Multi-Factor Authentication", "Phishing", Mitigates),
        edge("Multi-Factor Authentication", "Insider Threat", Mitigates),
        edge("Endpoint Detection & Response", "Ransomware", Mitigates),
        edge("Endpoint Detection & Response", "Insider Threat", Mitigates),
        edge("Network Firewall", "Ransomware", Mitigates),
        edge("Network Firewall", "DDoS Attack", Mitigates),
        edge("Security Awareness Training", "Phishing", Mitigates),
        edge("Security Awareness Training", "Insider Threat", Mitigates),
        edge("Offline Backups", "Ransomware", Mitigates),
    ]
}

#[test]
fn derived_edges_match_authored_list() {
    let kb = KnowledgeBase::embedded().unwrap();
    assert_eq!(kb.relationships(), authored_edges());
}

#[test]
fn derived_edges_are_consistent_with_records() {
    let kb = KnowledgeBase::embedded().unwrap();
    let edges = kb.relationships();

    for edge in &edges {
        match edge.kind {
            RelationKind::Targets => {
                let threat = kb.get_threat(&edge.source).expect("source is a threat");
                kb.get_asset(&edge.target).expect("target is an asset");
                assert!(threat.targets(&edge.target));
            }
            RelationKind::Mitigates => {
                let control = kb.get_control(&edge.source).expect("source is a control");
                kb.get_threat(&edge.target).expect("target is a threat");
                assert!(control.mitigates(&edge.target));
            }
        }
    }

    let expected_count: usize = kb.threats().iter().map(|t| t.targets.len()).sum::<usize>()
        + kb.controls().iter().map(|c| c.mitigates.len()).sum::<usize>();
    assert_eq!(edges.len(), expected_count);
}
