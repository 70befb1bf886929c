//! Text-generation service configuration (OpenAI-compatible chat completions).

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

const fn default_timeout_secs() -> u64 {
    60
}

const fn default_temperature() -> f32 {
    0.7
}

const fn default_max_tokens() -> u32 {
    500
}

const fn default_challenge_temperature() -> f32 {
    0.9
}

const fn default_challenge_max_tokens() -> u32 {
    600
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    /// Bearer token. Falls back to `OPENAI_API_KEY` when unset.
    #[serde(default)]
    pub api_key: String,

    /// Base URL of the chat completions API, without a trailing `/chat/completions`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Sampling temperature for standard analyses.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Completion token cap for standard analyses.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature for challenge analyses.
    #[serde(default = "default_challenge_temperature")]
    pub challenge_temperature: f32,

    /// Completion token cap for challenge analyses.
    #[serde(default = "default_challenge_max_tokens")]
    pub challenge_max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            challenge_temperature: default_challenge_temperature(),
            challenge_max_tokens: default_challenge_max_tokens(),
        }
    }
}

impl LlmConfig {
    /// Check if an API key is available.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Chat completions endpoint derived from `base_url`.
    #[must_use]
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a temperature outside `[0, 2]`,
    /// a zero token cap, or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("llm.temperature", self.temperature),
            ("llm.challenge_temperature", self.challenge_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(ConfigError::invalid(field, format!("{value} is outside 0.0..=2.0")));
            }
        }
        for (field, value) in [
            ("llm.max_tokens", self.max_tokens),
            ("llm.challenge_max_tokens", self.challenge_max_tokens),
        ] {
            if value == 0 {
                return Err(ConfigError::invalid(field, "must be greater than zero"));
            }
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid("llm.timeout_secs", "must be greater than zero"));
        }
        Ok(())
    }

    /// Fill `api_key` from `OPENAI_API_KEY` if nothing else provided one.
    pub(crate) fn apply_openai_fallback(&mut self) {
        if self.is_configured() {
            return;
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.api_key = key;
        }
    }
}
