use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ControlStatus, Level};

/// A safeguard that mitigates one or more threats.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Control {
    pub name: String,
    pub description: String,
    /// Threat names, in declared order.
    pub mitigates: Vec<String>,
    pub effectiveness: Level,
    #[serde(default = "default_status")]
    pub status: ControlStatus,
}

const fn default_status() -> ControlStatus {
    ControlStatus::Active
}

impl Control {
    #[must_use]
    pub fn mitigates(&self, threat: &str) -> bool {
        self.mitigates.iter().any(|name| name == threat)
    }
}
