//! Error types for the Pagesmith application.

use serde::Serialize;
use thiserror::Error;

/// A shared error type for the entire Pagesmith application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize)]
pub enum PagesmithError {
    /// Malformed request input (missing or invalid fields)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Stage-1 (image classification) response was not valid JSON or was
    /// missing required fields
    #[error("Classification parse error: {0}")]
    ClassificationParse(String),

    /// Stage-2 (content generation) response was not valid JSON or did not
    /// match the expected shape for the agent kind
    #[error("Generation parse error: {0}")]
    GenerationParse(String),

    /// Transport-level failure while calling the model provider
    #[error("Chat request failed: {0}")]
    ChatRequestFailed(String),

    /// A change record carried an action outside create/update/delete
    #[error("Unsupported change action: '{action}'")]
    UnsupportedAction { action: String },

    /// Error propagated opaquely from the external site store
    #[error("Site store error: {0}")]
    SiteStore(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PagesmithError {
    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a ClassificationParse error
    pub fn classification_parse(message: impl Into<String>) -> Self {
        Self::ClassificationParse(message.into())
    }

    /// Creates a GenerationParse error
    pub fn generation_parse(message: impl Into<String>) -> Self {
        Self::GenerationParse(message.into())
    }

    /// Creates a ChatRequestFailed error
    pub fn chat_request_failed(message: impl Into<String>) -> Self {
        Self::ChatRequestFailed(message.into())
    }

    /// Creates an UnsupportedAction error
    pub fn unsupported_action(action: impl Into<String>) -> Self {
        Self::UnsupportedAction {
            action: action.into(),
        }
    }

    /// Creates a SiteStore error
    pub fn site_store(message: impl Into<String>) -> Self {
        Self::SiteStore(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// A short, user-facing message that leaks no upstream payloads or
    /// internal detail. Used at the HTTP boundary.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Invalid request",
            Self::ClassificationParse(_) | Self::GenerationParse(_) | Self::ChatRequestFailed(_) => {
                "Failed to process chat request"
            }
            Self::UnsupportedAction { .. } => "Failed to apply page changes",
            Self::SiteStore(_) => "Site storage operation failed",
            Self::NotFound { .. } => "Not found",
            Self::Config(_) => "Server configuration error",
            Self::Internal(_) => "Internal server error",
        }
    }
}

impl From<serde_json::Error> for PagesmithError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON error: {err}"))
    }
}

/// Conversion from anyhow::Error (used at repository seams)
impl From<anyhow::Error> for PagesmithError {
    fn from(err: anyhow::Error) -> Self {
        Self::SiteStore(err.to_string())
    }
}

/// A type alias for `Result<T, PagesmithError>`.
pub type Result<T> = std::result::Result<T, PagesmithError>;
