//! The knowledge base: a fixed three-layer ontology of assets, threats and
//! controls.
//!
//! A [`KnowledgeBase`] is only ever produced by [`KnowledgeBase::from_document`]
//! (or one of the loaders that feed it), which checks referential integrity
//! once, up front, and reports every problem it finds in a single
//! [`SchemaError`]. After that the value is read-only: there are no mutation
//! methods, and lookups never need to re-validate.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use whatif_core::entities::{Asset, Control, Relationship, RelationshipState, Threat};
use whatif_core::enums::{EntityKind, RelationKind};
use whatif_core::errors::{CoreError, SchemaError, SchemaIssue};

use crate::error::KbError;

/// The ontology shipped with `whatif`.
pub const EMBEDDED_ONTOLOGY: &str = include_str!("../data/ontology.toml");

/// Serialized shape of a KB document (TOML or JSON).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct OntologyDocument {
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub threats: Vec<Threat>,
    #[serde(default)]
    pub controls: Vec<Control>,
}

/// Validated, immutable ontology.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    assets: Vec<Asset>,
    threats: Vec<Threat>,
    controls: Vec<Control>,
    asset_index: HashMap<String, usize>,
    threat_index: HashMap<String, usize>,
    control_index: HashMap<String, usize>,
}

impl KnowledgeBase {
    /// Load the ontology embedded in the binary.
    ///
    /// # Errors
    ///
    /// Returns [`KbError`] only if the embedded document has been edited into
    /// an invalid state.
    pub fn embedded() -> Result<Self, KbError> {
        Self::from_toml_str(EMBEDDED_ONTOLOGY)
    }

    /// Parse and validate a TOML KB document.
    ///
    /// # Errors
    ///
    /// Returns [`KbError::Toml`] on parse failure or [`KbError::Schema`] when
    /// references do not resolve.
    pub fn from_toml_str(source: &str) -> Result<Self, KbError> {
        let document: OntologyDocument = toml::from_str(source)?;
        Ok(Self::from_document(document)?)
    }

    /// Parse and validate a JSON KB document.
    ///
    /// # Errors
    ///
    /// Returns [`KbError::Json`] on parse failure or [`KbError::Schema`] when
    /// references do not resolve.
    pub fn from_json_str(source: &str) -> Result<Self, KbError> {
        let document: OntologyDocument = serde_json::from_str(source)?;
        Ok(Self::from_document(document)?)
    }

    /// Load a KB document from disk. The format follows the file extension.
    ///
    /// # Errors
    ///
    /// Returns [`KbError::Io`] if the file cannot be read,
    /// [`KbError::UnsupportedFormat`] for extensions other than `.toml` and
    /// `.json`, and the parse or schema errors of the matching loader.
    pub fn from_path(path: &Path) -> Result<Self, KbError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if !matches!(extension.as_str(), "toml" | "json") {
            return Err(KbError::UnsupportedFormat(path.display().to_string()));
        }

        let source = std::fs::read_to_string(path).map_err(|source| KbError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let kb = if extension == "json" {
            Self::from_json_str(&source)?
        } else {
            Self::from_toml_str(&source)?
        };
        tracing::debug!(path = %path.display(), "loaded knowledge base from file");
        Ok(kb)
    }

    /// Validate a parsed document and build the lookup indexes.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] listing every dangling `targets`/`mitigates`
    /// reference, every duplicated entity name and every name repeated inside
    /// one reference set.
    pub fn from_document(document: OntologyDocument) -> Result<Self, SchemaError> {
        let mut issues = Vec::new();

        let asset_index = index_names(
            document.assets.iter().map(|asset| asset.name.as_str()),
            EntityKind::Asset,
            &mut issues,
        );
        let threat_index = index_names(
            document.threats.iter().map(|threat| threat.name.as_str()),
            EntityKind::Threat,
            &mut issues,
        );
        let control_index = index_names(
            document.controls.iter().map(|control| control.name.as_str()),
            EntityKind::Control,
            &mut issues,
        );

        for threat in &document.threats {
            check_references(
                RelationKind::Targets,
                &threat.name,
                &threat.targets,
                &asset_index,
                &mut issues,
            );
        }
        for control in &document.controls {
            check_references(
                RelationKind::Mitigates,
                &control.name,
                &control.mitigates,
                &threat_index,
                &mut issues,
            );
        }

        if !issues.is_empty() {
            return Err(SchemaError { issues });
        }

        tracing::debug!(
            assets = document.assets.len(),
            threats = document.threats.len(),
            controls = document.controls.len(),
            "knowledge base validated"
        );

        Ok(Self {
            assets: document.assets,
            threats: document.threats,
            controls: document.controls,
            asset_index,
            threat_index,
            control_index,
        })
    }

    /// Look up an asset by name.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if no asset has that name.
    pub fn get_asset(&self, name: &str) -> Result<&Asset, CoreError> {
        self.asset_index
            .get(name)
            .map(|&index| &self.assets[index])
            .ok_or_else(|| CoreError::not_found(EntityKind::Asset, name))
    }

    /// Look up a threat by name.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if no threat has that name.
    pub fn get_threat(&self, name: &str) -> Result<&Threat, CoreError> {
        self.threat_index
            .get(name)
            .map(|&index| &self.threats[index])
            .ok_or_else(|| CoreError::not_found(EntityKind::Threat, name))
    }

    /// Look up a control by name.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if no control has that name.
    pub fn get_control(&self, name: &str) -> Result<&Control, CoreError> {
        self.control_index
            .get(name)
            .map(|&index| &self.controls[index])
            .ok_or_else(|| CoreError::not_found(EntityKind::Control, name))
    }

    #[must_use]
    pub fn has_control(&self, name: &str) -> bool {
        self.control_index.contains_key(name)
    }

    /// Assets in declaration order.
    #[must_use]
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Threats in declaration order.
    #[must_use]
    pub fn threats(&self) -> &[Threat] {
        &self.threats
    }

    /// Controls in declaration order.
    #[must_use]
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn threat_names(&self) -> impl Iterator<Item = &str> {
        self.threats.iter().map(|threat| threat.name.as_str())
    }

    pub fn control_names(&self) -> impl Iterator<Item = &str> {
        self.controls.iter().map(|control| control.name.as_str())
    }

    /// Rebuild the typed edge list from the authoritative records.
    ///
    /// `targets` edges come first, in threat order, followed by `mitigates`
    /// edges in control order.
    #[must_use]
    pub fn relationships(&self) -> Vec<Relationship> {
        let targets = self.threats.iter().flat_map(|threat| {
            threat.targets.iter().map(|asset| Relationship {
                source: threat.name.clone(),
                target: asset.clone(),
                kind: RelationKind::Targets,
            })
        });
        let mitigates = self.controls.iter().flat_map(|control| {
            control.mitigates.iter().map(|threat| Relationship {
                source: control.name.clone(),
                target: threat.clone(),
                kind: RelationKind::Mitigates,
            })
        });
        targets.chain(mitigates).collect()
    }

    /// Edge list with each edge marked inactive when it touches `disabled_control`.
    #[must_use]
    pub fn relationship_states(&self, disabled_control: Option<&str>) -> Vec<RelationshipState> {
        self.relationships()
            .into_iter()
            .map(|edge| {
                let active = disabled_control.is_none_or(|name| !edge.touches(name));
                RelationshipState {
                    source: edge.source,
                    target: edge.target,
                    kind: edge.kind,
                    active,
                }
            })
            .collect()
    }

    /// Re-export as a document, e.g. to externalize the embedded ontology.
    #[must_use]
    pub fn document(&self) -> OntologyDocument {
        OntologyDocument {
            assets: self.assets.clone(),
            threats: self.threats.clone(),
            controls: self.controls.clone(),
        }
    }
}

fn index_names<'a>(
    names: impl Iterator<Item = &'a str>,
    entity_kind: EntityKind,
    issues: &mut Vec<SchemaIssue>,
) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for (position, name) in names.enumerate() {
        if name.trim().is_empty() {
            issues.push(SchemaIssue::BlankName {
                entity_kind,
                position,
            });
        } else if index.contains_key(name) {
            issues.push(SchemaIssue::DuplicateEntity {
                entity_kind,
                name: name.to_string(),
            });
        } else {
            index.insert(name.to_string(), position);
        }
    }
    index
}

fn check_references(
    relation: RelationKind,
    source: &str,
    references: &[String],
    declared: &HashMap<String, usize>,
    issues: &mut Vec<SchemaIssue>,
) {
    let mut seen = HashSet::new();
    for target in references {
        if !declared.contains_key(target) {
            issues.push(SchemaIssue::DanglingReference {
                relation,
                source: source.to_string(),
                target: target.clone(),
            });
        }
        if !seen.insert(target.as_str()) {
            issues.push(SchemaIssue::DuplicateReference {
                relation,
                source: source.to_string(),
                target: target.clone(),
            });
        }
    }
}
