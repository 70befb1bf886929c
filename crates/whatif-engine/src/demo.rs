//! Pre-written analyses with deliberate mistakes.
//!
//! Each fixture pretends to be model output for one disabled control and
//! records the mistakes it contains, so the validator can be demonstrated
//! without calling a text-generation service.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use whatif_core::enums::EntityKind;
use whatif_core::errors::CoreError;

use crate::error::KbError;
use crate::kb::KnowledgeBase;

/// Fixtures shipped with `whatif`.
pub const EMBEDDED_DEMOS: &str = include_str!("../data/demo_responses.toml");

/// A canned analysis for one control.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DemoResponse {
    pub control: String,
    pub response: String,
    /// Mistakes planted in `response`, described for a human reader.
    #[serde(default)]
    pub known_errors: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DemoDocument {
    #[serde(default)]
    responses: Vec<DemoResponse>,
}

#[derive(Debug, Clone)]
pub struct DemoLibrary {
    responses: Vec<DemoResponse>,
}

impl DemoLibrary {
    /// Load the fixtures embedded in the binary.
    ///
    /// # Errors
    ///
    /// Returns [`KbError::Toml`] if the embedded document does not parse.
    pub fn embedded() -> Result<Self, KbError> {
        Self::from_toml_str(EMBEDDED_DEMOS)
    }

    /// # Errors
    ///
    /// Returns [`KbError::Toml`] if `source` does not parse.
    pub fn from_toml_str(source: &str) -> Result<Self, KbError> {
        let document: DemoDocument = toml::from_str(source)?;
        Ok(Self {
            responses: document.responses,
        })
    }

    #[must_use]
    pub fn for_control(&self, control: &str) -> Option<&DemoResponse> {
        self.responses
            .iter()
            .find(|response| response.control == control)
    }

    #[must_use]
    pub fn responses(&self) -> &[DemoResponse] {
        &self.responses
    }

    /// Make sure every fixture belongs to a control in `kb`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] for the first fixture naming an unknown control.
    pub fn check_against(&self, kb: &KnowledgeBase) -> Result<(), CoreError> {
        match self
            .responses
            .iter()
            .find(|response| !kb.has_control(&response.control))
        {
            Some(orphan) => Err(CoreError::not_found(EntityKind::Control, &orphan.control)),
            None => Ok(()),
        }
    }
}
