//! Ratings, statuses, entity kinds, and relation kinds for the ontology.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`,
//! so KB documents spell them `"high"`, `"moderate"`, `"word_boundary"`, etc.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Level
// ---------------------------------------------------------------------------

/// Three-step rating shared by asset criticality, threat likelihood, and
/// control effectiveness.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Impact
// ---------------------------------------------------------------------------

/// Consequence of a threat succeeding.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Minor,
    Moderate,
    Severe,
}

impl Impact {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minor => "minor",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ControlStatus
// ---------------------------------------------------------------------------

/// Operational status recorded on a control in the KB document.
///
/// This is descriptive data carried through unchanged. Counterfactual
/// hypotheses never rewrite it; they are expressed as a separate
/// `disabled_control` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ControlStatus {
    Active,
    Disabled,
}

impl ControlStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Disabled => "disabled",
        }
    }
}

impl fmt::Display for ControlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// The three layers of the ontology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Asset,
    Threat,
    Control,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Threat => "threat",
            Self::Control => "control",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RelationKind
// ---------------------------------------------------------------------------

/// Typed edge between two ontology layers.
///
/// ```text
/// control --mitigates--> threat --targets--> asset
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    Targets,
    Mitigates,
}

impl RelationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Targets => "targets",
            Self::Mitigates => "mitigates",
        }
    }

    /// Entity kinds at the (source, target) ends of this relation.
    #[must_use]
    pub const fn endpoints(self) -> (EntityKind, EntityKind) {
        match self {
            Self::Targets => (EntityKind::Threat, EntityKind::Asset),
            Self::Mitigates => (EntityKind::Control, EntityKind::Threat),
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MatchMode
// ---------------------------------------------------------------------------

/// How the response validator decides that a name "is mentioned".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Case-insensitive substring containment. A name embedded in a longer
    /// word still counts.
    #[default]
    Substring,
    /// Case-insensitive match that must start and end on a word boundary.
    WordBoundary,
}

impl MatchMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Substring => "substring",
            Self::WordBoundary => "word_boundary",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(level_high, Level, Level::High, "high");
    test_serde_roundtrip!(impact_moderate, Impact, Impact::Moderate, "moderate");
    test_serde_roundtrip!(
        control_disabled,
        ControlStatus,
        ControlStatus::Disabled,
        "disabled"
    );
    test_serde_roundtrip!(
        match_word_boundary,
        MatchMode,
        MatchMode::WordBoundary,
        "word_boundary"
    );

    #[test]
    fn display_matches_serde_spelling() {
        assert_eq!(Level::Medium.to_string(), "medium");
        assert_eq!(Impact::Severe.to_string(), "severe");
        assert_eq!(EntityKind::Control.to_string(), "control");
        assert_eq!(RelationKind::Mitigates.to_string(), "mitigates");
        assert_eq!(MatchMode::Substring.to_string(), "substring");
    }

    #[test]
    fn levels_are_ordered() {
        assert!(Level::Low < Level::Medium);
        assert!(Level::Medium < Level::High);
        assert!(Impact::Minor < Impact::Severe);
    }

    #[test]
    fn relation_endpoints_follow_layering() {
        assert_eq!(
            RelationKind::Targets.endpoints(),
            (EntityKind::Threat, EntityKind::Asset)
        );
        assert_eq!(
            RelationKind::Mitigates.endpoints(),
            (EntityKind::Control, EntityKind::Threat)
        );
    }

    #[test]
    fn match_mode_defaults_to_substring() {
        assert_eq!(MatchMode::default(), MatchMode::Substring);
    }
}
