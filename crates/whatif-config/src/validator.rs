//! Response validator tuning.

use serde::{Deserialize, Serialize};
use whatif_core::defaults::{DEFAULT_CONTEXT_WINDOW, DEFAULT_RISK_KEYWORDS};
use whatif_core::enums::MatchMode;

use crate::ConfigError;

const fn default_context_window() -> usize {
    DEFAULT_CONTEXT_WINDOW
}

fn default_risk_keywords() -> Vec<String> {
    DEFAULT_RISK_KEYWORDS
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ValidatorConfig {
    /// How entity names are located in a response.
    #[serde(default)]
    pub match_mode: MatchMode,

    /// Context window, in characters, used for hallucination detection.
    #[serde(default = "default_context_window")]
    pub context_window: usize,

    /// Words that mark an unrelated threat as claimed to be affected.
    #[serde(default = "default_risk_keywords")]
    pub risk_keywords: Vec<String>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::default(),
            context_window: default_context_window(),
            risk_keywords: default_risk_keywords(),
        }
    }
}

impl ValidatorConfig {
    /// Reject settings that would make hallucination detection meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `risk_keywords` is empty or
    /// contains a blank entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.risk_keywords.is_empty() {
            return Err(ConfigError::invalid(
                "validator.risk_keywords",
                "at least one keyword is required",
            ));
        }
        if self.risk_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::invalid(
                "validator.risk_keywords",
                "keywords must not be blank",
            ));
        }
        Ok(())
    }
}
