//! # whatif-config
//!
//! Layered configuration loading for whatif using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`WHATIF_*` prefix, `__` as separator)
//! 2. Project-level `.whatif/config.toml`
//! 3. User-level `~/.config/whatif/config.toml`
//! 4. Built-in defaults
//!
//! `OPENAI_API_KEY` is consulted last, and only when no layer set `llm.api_key`.
//!
//! # Environment Variable Mapping
//!
//! Figment maps `WHATIF_LLM__MODEL` -> `llm.model`, `WHATIF_VALIDATOR__MATCH_MODE` ->
//! `validator.match_mode`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use whatif_config::WhatIfConfig;
//!
//! let config = WhatIfConfig::load_with_dotenv().expect("config");
//!
//! if config.llm.is_configured() {
//!     println!("model: {}", config.llm.model);
//! }
//! ```

mod error;
mod general;
mod llm;
mod validator;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use llm::LlmConfig;
pub use validator::ValidatorConfig;

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Project-local config file, relative to the working directory.
pub const LOCAL_CONFIG_PATH: &str = ".whatif/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WhatIfConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub validator: ValidatorConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

impl WhatIfConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy`. Use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a layer fails to parse or extract, or
    /// [`ConfigError::InvalidValue`] if the merged values are out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support. This is the CLI entry point.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Dotenv`] if a `.env` file exists but does not parse,
    /// otherwise the same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv()?;
        Self::load()
    }

    /// Extract from an arbitrary figment, then apply the `OPENAI_API_KEY`
    /// fallback and validate.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let mut config: Self = figment.extract()?;
        config.llm.apply_openai_fallback();
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("WHATIF_").split("__"))
    }

    /// # Errors
    ///
    /// Returns the first [`ConfigError::InvalidValue`] found in any section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validator.validate()?;
        self.llm.validate()
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("whatif").join("config.toml"))
    }

    /// Load `.env` from the nearest ancestor of the current directory that has one.
    /// A missing file is not an error.
    fn load_dotenv() -> Result<(), ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => Ok(()),
            Err(error) if error.not_found() => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}
