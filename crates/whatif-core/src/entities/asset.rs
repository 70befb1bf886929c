use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Level;

/// Something of value that threats target.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Asset {
    pub name: String,
    pub description: String,
    pub criticality: Level,
    #[serde(default)]
    pub examples: Vec<String>,
}
