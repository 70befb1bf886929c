use whatif_config::WhatIfConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &WhatIfConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &WhatIfConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.llm.is_configured() && has_env_prefix(&env_keys, "WHATIF_LLM") {
        warnings.push(
            "LLM config has no API key while WHATIF_LLM* env vars exist. Use double underscores (example: WHATIF_LLM__API_KEY)."
                .to_string(),
        );
    }

    if config.general.kb_path.is_empty() && has_env_prefix(&env_keys, "WHATIF_GENERAL") {
        warnings.push(
            "general.kb_path is empty while WHATIF_GENERAL* env vars exist. Use double underscores (example: WHATIF_GENERAL__KB_PATH)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}
