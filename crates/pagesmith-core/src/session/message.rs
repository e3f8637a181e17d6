//! Conversation message types.

use serde::{Deserialize, Serialize};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptRole {
    /// Message from the user.
    User,
    /// Message from the AI assistant.
    Assistant,
    /// System-generated message.
    System,
}

/// A single message in a conversation history.
///
/// Each message has a role, the free-text label of the agent that produced
/// it, content, and a timestamp indicating when it was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptEntry {
    /// The role of the message sender.
    pub role: TranscriptRole,
    /// Display label of the sender ("WebAppAgent", the user's name, ...).
    #[serde(default)]
    pub agent_name: String,
    /// The content of the message.
    pub content: String,
    /// Timestamp when the message was created (RFC 3339 format).
    #[serde(default)]
    pub timestamp: String,
}

impl TranscriptEntry {
    /// Creates an entry stamped with the current time.
    pub fn now(role: TranscriptRole, agent_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role,
            agent_name: agent_name.into(),
            content: content.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
