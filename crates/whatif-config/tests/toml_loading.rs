//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed working directories and env vars.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use whatif_config::{ConfigError, WhatIfConfig};
use whatif_core::enums::MatchMode;

/// Write `.whatif/config.toml` inside the jail's working directory.
fn project_config(jail: &Jail, contents: &str) -> figment::error::Result<()> {
    std::fs::create_dir_all(jail.directory().join(".whatif")).map_err(|e| e.to_string())?;
    jail.create_file(".whatif/config.toml", contents)?;
    Ok(())
}

#[test]
fn loads_every_section_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
kb_path = "ontology/acme.toml"

[validator]
match_mode = "word_boundary"
context_window = 80
risk_keywords = ["risk", "exposed"]

[llm]
api_key = "sk-toml"
base_url = "http://localhost:11434/v1"
model = "llama3"
timeout_secs = 15
temperature = 0.2
max_tokens = 256
"#,
        )?;

        let config: WhatIfConfig = Figment::from(Serialized::defaults(WhatIfConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.general.kb_path, "ontology/acme.toml");
        assert_eq!(config.validator.match_mode, MatchMode::WordBoundary);
        assert_eq!(config.validator.context_window, 80);
        assert_eq!(config.validator.risk_keywords, vec!["risk", "exposed"]);
        assert_eq!(config.llm.api_key, "sk-toml");
        assert_eq!(config.llm.model, "llama3");
        assert_eq!(config.llm.timeout_secs, 15);
        assert_eq!(config.llm.max_tokens, 256);
        // Untouched keys keep their defaults.
        assert_eq!(config.llm.challenge_max_tokens, 600);
        assert!(config.llm.is_configured());
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        project_config(
            jail,
            r#"
[validator]
context_window = 30
"#,
        )?;

        let config = WhatIfConfig::load().expect("config loads");
        assert_eq!(config.validator.context_window, 30);
        assert_eq!(config.validator.match_mode, MatchMode::Substring);
        Ok(())
    });
}

#[test]
fn invalid_values_fail_load() {
    Jail::expect_with(|jail| {
        project_config(
            jail,
            r#"
[validator]
risk_keywords = []
"#,
        )?;

        let err = WhatIfConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }), "{err}");
        Ok(())
    });
}

#[test]
fn unknown_match_mode_is_a_figment_error() {
    Jail::expect_with(|jail| {
        project_config(
            jail,
            r#"
[validator]
match_mode = "fuzzy"
"#,
        )?;

        assert!(matches!(
            WhatIfConfig::load(),
            Err(ConfigError::Figment(_))
        ));
        Ok(())
    });
}
