//! Conversation message types.

use super::id;
use super::model::Language;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the AI assistant.
    Assistant,
    /// System-generated message.
    System,
}

/// A single message in a conversation history.
///
/// Content may embed multi-line text and code fences. The optional model
/// and language fields are carried for display attribution only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message identifier (opaque string)
    pub id: String,
    /// The role of the message sender
    pub role: MessageRole,
    /// The content of the message
    pub content: String,
    /// Timestamp when the message was created
    pub timestamp: DateTime<Utc>,
    /// Model that produced the message, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Language the message was written in, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
}

impl ChatMessage {
    /// Creates a message with a generated id and the current timestamp.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: id::generate("msg"),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            model: None,
            language: None,
        }
    }

    /// Attaches the producing model for display attribution.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Attaches the message language for display attribution.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }
}
