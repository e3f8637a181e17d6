//! Completion client abstraction.
//!
//! The pipeline talks to the model provider through this trait so stages
//! can be scripted in tests and the transport lives in the infrastructure
//! layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// One message in a completion request, in the provider's wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Model id, token limit and temperature for one pipeline stage.
///
/// Configuration surface, not business logic: callers may override any of
/// these; the defaults mirror the service's production settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl StageConfig {
    /// Default stage-1 (image classification) settings.
    pub fn classification_default() -> Self {
        Self {
            model: "openai/gpt-4o".to_string(),
            max_tokens: 10_000,
            temperature: 0.7,
        }
    }

    /// Default stage-2 (content generation) settings.
    pub fn generation_default() -> Self {
        Self {
            model: "anthropic/claude-3.5-sonnet".to_string(),
            max_tokens: 8_192,
            temperature: 1.0,
        }
    }
}

/// An abstract client for JSON-mode chat completions.
///
/// Implementations send `messages` to the configured model requesting a
/// JSON object response and return the raw content string of the first
/// choice. Transport failures surface as
/// [`PagesmithError::ChatRequestFailed`](crate::PagesmithError::ChatRequestFailed);
/// no retries are performed at this layer.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete_json(&self, config: &StageConfig, messages: &[ChatMessage]) -> Result<String>;
}
