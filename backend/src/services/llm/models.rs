//! Chat-completion wire types and upstream outcomes

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub temperature: f32,
    pub messages: Vec<ChatMessage>,
}

/// 2xx reply body. Only `choices[0].message.content` is read, so extra or
/// oddly shaped entries elsewhere never fail the decode.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(transparent)]
pub struct ChatCompletionResponse(pub Value);

impl ChatCompletionResponse {
    /// `choices[0].message.content`, ignoring an empty string
    pub fn answer_text(&self) -> Option<String> {
        self.0
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// What came back from a completed HTTP exchange with the completion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResult {
    /// Upstream answered with a 2xx status
    pub ok: bool,
    pub status: u16,
    pub answer_text: Option<String>,
    /// Raw response body of a non-2xx reply
    pub raw_error: Option<String>,
}

impl UpstreamResult {
    pub fn answered(status: u16, answer_text: Option<String>) -> Self {
        Self { ok: true, status, answer_text, raw_error: None }
    }

    pub fn failed(status: u16, raw_error: impl Into<String>) -> Self {
        Self { ok: false, status, answer_text: None, raw_error: Some(raw_error.into()) }
    }
}

/// Failures that prevented an HTTP exchange from producing an `UpstreamResult`.
#[derive(Debug, Error)]
pub enum LLMError {
    #[error("OPENAI_API_KEY is not configured")]
    NotConfigured,

    #[error("Request to completion service failed: {0}")]
    Transport(String),

    #[error("Invalid completion response: {0}")]
    Decode(String),
}

impl LLMError {
    /// Short class name used in diagnostic notes
    pub fn class(&self) -> &'static str {
        match self {
            Self::NotConfigured => "config",
            Self::Transport(_) => "transport",
            Self::Decode(_) => "decode",
        }
    }
}

impl From<reqwest::Error> for LLMError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LLMError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
