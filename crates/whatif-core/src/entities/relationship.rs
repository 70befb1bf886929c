use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::RelationKind;

/// A typed edge between two entities, derived from the authoritative records.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct Relationship {
    pub source: String,
    pub target: String,
    pub kind: RelationKind,
}

impl Relationship {
    #[must_use]
    pub fn touches(&self, name: &str) -> bool {
        self.source == name || self.target == name
    }
}

/// An edge annotated with whether it survives a counterfactual hypothesis.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RelationshipState {
    pub source: String,
    pub target: String,
    pub kind: RelationKind,
    /// `false` when the edge touches the hypothetically disabled control.
    pub active: bool,
}
