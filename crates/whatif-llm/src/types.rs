//! Wire types for the OpenAI-compatible chat completions API.

use serde::{Deserialize, Serialize};

use crate::error::LlmError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Extract the first choice's text from a raw completion body.
///
/// # Errors
///
/// Returns [`LlmError::Parse`] when `body` is not a chat completion, and
/// [`LlmError::EmptyResponse`] when it has no choice or only blank text.
pub fn parse_completion(body: &str) -> Result<String, LlmError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| LlmError::Parse(e.to_string()))?;
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(LlmError::EmptyResponse)?;
    if choice.finish_reason.as_deref() == Some("length") {
        tracing::debug!("completion was truncated at the token cap");
    }
    match choice.message.content {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(LlmError::EmptyResponse),
    }
}
