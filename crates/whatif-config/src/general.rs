//! General application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Path to a TOML or JSON knowledge base document. Empty means the
    /// ontology embedded in the binary.
    #[serde(default)]
    pub kb_path: String,
}

impl GeneralConfig {
    /// The external KB document, if one is configured.
    #[must_use]
    pub fn kb_path(&self) -> Option<PathBuf> {
        (!self.kb_path.is_empty()).then(|| PathBuf::from(&self.kb_path))
    }
}
