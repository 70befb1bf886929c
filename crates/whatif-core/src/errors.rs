//! Cross-cutting error types for whatif.
//!
//! `CoreError` is what callers of the knowledge base see. `SchemaError` is
//! raised exactly once, while a KB document is being turned into a
//! `KnowledgeBase`, and lists every integrity problem found rather than
//! stopping at the first. Loader, config and HTTP errors live in their own
//! crates and converge in `whatif-cli` through `anyhow`.

use std::fmt;

use thiserror::Error;

use crate::enums::{EntityKind, RelationKind};

/// Errors raised by knowledge base lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("{entity_kind} not found: '{name}'")]
    NotFound {
        entity_kind: EntityKind,
        name: String,
    },
}

impl CoreError {
    #[must_use]
    pub fn not_found(entity_kind: EntityKind, name: impl Into<String>) -> Self {
        Self::NotFound {
            entity_kind,
            name: name.into(),
        }
    }
}

/// One integrity problem in a KB document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaIssue {
    /// A `targets`/`mitigates` entry names an entity that was never declared.
    DanglingReference {
        relation: RelationKind,
        source: String,
        target: String,
    },
    /// An entity's name is empty or whitespace; `position` is its declaration index.
    BlankName {
        entity_kind: EntityKind,
        position: usize,
    },
    /// Two entities of the same kind share a name.
    DuplicateEntity { entity_kind: EntityKind, name: String },
    /// The same name appears twice inside one `targets`/`mitigates` set.
    DuplicateReference {
        relation: RelationKind,
        source: String,
        target: String,
    },
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingReference {
                relation,
                source,
                target,
            } => {
                let (source_kind, target_kind) = relation.endpoints();
                write!(
                    f,
                    "{source_kind} '{source}' {relation} undeclared {target_kind} '{target}'"
                )
            }
            Self::BlankName {
                entity_kind,
                position,
            } => write!(f, "{entity_kind} #{position} has a blank name"),
            Self::DuplicateEntity { entity_kind, name } => {
                write!(f, "{entity_kind} '{name}' is declared more than once")
            }
            Self::DuplicateReference {
                relation,
                source,
                target,
            } => {
                let (source_kind, _) = relation.endpoints();
                write!(
                    f,
                    "{source_kind} '{source}' lists '{target}' more than once in {relation}"
                )
            }
        }
    }
}

/// Every integrity problem found while loading a KB document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("knowledge base failed validation with {} issue(s): {}", .issues.len(), join_issues(.issues))]
pub struct SchemaError {
    pub issues: Vec<SchemaIssue>,
}

impl SchemaError {
    /// Only the dangling-reference issues.
    pub fn dangling_references(&self) -> impl Iterator<Item = &SchemaIssue> {
        self.issues
            .iter()
            .filter(|issue| matches!(issue, SchemaIssue::DanglingReference { .. }))
    }
}

fn join_issues(issues: &[SchemaIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
