use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Impact, Level};

/// An adverse event that targets one or more assets.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Threat {
    pub name: String,
    pub description: String,
    /// Asset names, in declared order.
    pub targets: Vec<String>,
    pub likelihood: Level,
    pub impact: Impact,
}

impl Threat {
    #[must_use]
    pub fn targets(&self, asset: &str) -> bool {
        self.targets.iter().any(|name| name == asset)
    }
}
