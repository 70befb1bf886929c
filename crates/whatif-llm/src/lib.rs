//! # whatif-llm
//!
//! Asks an OpenAI-compatible chat completions service for a counterfactual
//! analysis of a disabled control. The text it returns is meant to be scored
//! with `whatif_engine::validate_response`; nothing here interprets it.
//!
//! A single request is made per call. Rate limits and failures are reported,
//! never retried.

mod error;
mod http;
pub mod prompts;
pub mod types;

pub use error::LlmError;
pub use prompts::{AnalysisMode, build_messages};

use std::time::Duration;

use whatif_config::LlmConfig;
use whatif_core::reports::ExpectedImpact;
use whatif_engine::KnowledgeBase;

use crate::types::{ChatRequest, parse_completion};

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for the configured chat completions endpoint.
pub struct AnalysisClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl AnalysisClient {
    /// Build a client from the `[llm]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::NotConfigured`] if no API key is set, or
    /// [`LlmError::Http`] if the underlying `reqwest::Client` fails to build.
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        if !config.is_configured() {
            return Err(LlmError::NotConfigured);
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("whatif/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Request an analysis of disabling `expected.disabled_control`.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Prompt`] if the prompt cannot be built from `kb`,
    /// and otherwise any transport, status, or body error from the service.
    pub async fn analyze(
        &self,
        kb: &KnowledgeBase,
        expected: &ExpectedImpact,
        mode: AnalysisMode,
    ) -> Result<String, LlmError> {
        let messages = build_messages(kb, expected, mode)?;
        let request = self.request(messages, mode);
        let url = self.config.completions_url();

        tracing::debug!(
            %url,
            model = %request.model,
            %mode,
            control = %expected.disabled_control,
            "requesting analysis"
        );

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;
        let resp = crate::http::check_response(resp).await.inspect_err(|e| {
            tracing::warn!(%e, "analysis request rejected");
        })?;

        let body = resp.text().await?;
        parse_completion(&body)
    }

    fn request(&self, messages: Vec<types::ChatMessage>, mode: AnalysisMode) -> ChatRequest {
        let (temperature, max_tokens) = match mode {
            AnalysisMode::Standard => (self.config.temperature, self.config.max_tokens),
            AnalysisMode::Challenge => (
                self.config.challenge_temperature,
                self.config.challenge_max_tokens,
            ),
        };
        ChatRequest {
            model: self.config.model.clone(),
            messages,
            temperature,
            max_tokens,
        }
    }
}
