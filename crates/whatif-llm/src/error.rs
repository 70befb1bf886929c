//! Text-generation client error types.

use thiserror::Error;
use whatif_core::errors::CoreError;

/// Errors that can occur while requesting an analysis.
#[derive(Debug, Error)]
pub enum LlmError {
    /// No API key was found in any configuration layer.
    #[error("no API key configured (set WHATIF_LLM__API_KEY or OPENAI_API_KEY)")]
    NotConfigured,

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The service returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The response body was not a chat completion.
    #[error("parse error: {0}")]
    Parse(String),

    /// The expected impact names something the knowledge base does not have.
    #[error("cannot build prompt: {0}")]
    Prompt(#[from] CoreError),

    /// The completion carried no text.
    #[error("the service returned an empty completion")]
    EmptyResponse,
}
