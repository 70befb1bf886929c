use std::path::PathBuf;

use anyhow::Context;
use whatif_config::{ValidatorConfig, WhatIfConfig};
use whatif_core::enums::MatchMode;
use whatif_engine::{DemoLibrary, KnowledgeBase, Validator};

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub kb: KnowledgeBase,
    pub demos: DemoLibrary,
    pub validator: Validator,
    pub config: WhatIfConfig,
}

impl AppContext {
    /// Load the knowledge base named by `--kb`, then `general.kb_path`, falling
    /// back to the embedded ontology.
    pub fn init(config: WhatIfConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let kb = match kb_path(&config, flags) {
            Some(path) => KnowledgeBase::from_path(&path)
                .with_context(|| format!("failed to load knowledge base {}", path.display()))?,
            None => KnowledgeBase::embedded().context("embedded knowledge base is invalid")?,
        };

        let demos = DemoLibrary::embedded().context("embedded demo responses are invalid")?;
        if let Err(error) = demos.check_against(&kb) {
            tracing::warn!(%error, "demo responses do not match the loaded knowledge base");
        }

        let validator = build_validator(&config.validator, flags.strict);

        Ok(Self {
            kb,
            demos,
            validator,
            config,
        })
    }
}

fn kb_path(config: &WhatIfConfig, flags: &GlobalFlags) -> Option<PathBuf> {
    flags.kb.clone().or_else(|| config.general.kb_path())
}

fn build_validator(config: &ValidatorConfig, strict: bool) -> Validator {
    let match_mode = if strict {
        MatchMode::WordBoundary
    } else {
        config.match_mode
    };
    Validator::new()
        .with_match_mode(match_mode)
        .with_context_window(config.context_window)
        .with_risk_keywords(&config.risk_keywords)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use whatif_config::GeneralConfig;

    use super::*;
    use crate::cli::OutputFormat;

    fn flags(kb: Option<&str>, strict: bool) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            quiet: true,
            verbose: false,
            kb: kb.map(PathBuf::from),
            strict,
        }
    }

    #[test]
    fn flag_overrides_configured_kb_path() {
        let config = WhatIfConfig {
            general: GeneralConfig {
                kb_path: "from-config.toml".into(),
            },
            ..WhatIfConfig::default()
        };
        assert_eq!(
            kb_path(&config, &flags(Some("from-flag.json"), false)).as_deref(),
            Some(Path::new("from-flag.json"))
        );
        assert_eq!(
            kb_path(&config, &flags(None, false)).as_deref(),
            Some(Path::new("from-config.toml"))
        );
        assert!(kb_path(&WhatIfConfig::default(), &flags(None, false)).is_none());
    }

    #[test]
    fn strict_flag_forces_word_boundaries() {
        let config = ValidatorConfig::default();
        assert_eq!(build_validator(&config, false).match_mode(), MatchMode::Substring);
        assert_eq!(build_validator(&config, true).match_mode(), MatchMode::WordBoundary);
    }

    #[test]
    fn default_config_builds_the_default_validator() {
        let validator = build_validator(&ValidatorConfig::default(), false);
        assert_eq!(validator, Validator::default());
        assert_eq!(validator.context_window(), 50);
        assert_eq!(validator.risk_keywords().len(), 6);
    }

    #[test]
    fn defaults_load_embedded_kb() {
        let ctx = AppContext::init(WhatIfConfig::default(), &flags(None, false)).unwrap();
        assert_eq!(ctx.kb.controls().len(), 5);
        assert_eq!(ctx.demos.responses().len(), 5);
    }

    #[test]
    fn missing_kb_file_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = AppContext::init(
            WhatIfConfig::default(),
            &flags(path.to_str(), false),
        )
        .err()
        .expect("init should fail");
        assert!(format!("{err:#}").contains("absent.toml"));
    }
}
