//! Chat session domain model.
//!
//! This module contains the core ChatSession entity along with the
//! request/patch types used by the store contract.

use super::id;
use super::message::ChatMessage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Interface language of a chat session.
///
/// The assistant answers in this language; it is also carried on messages
/// for display attribution.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Language {
    /// Italian (the deployment default)
    #[default]
    It,
    /// English
    En,
}

/// One chat conversation thread with its own model, language and history.
///
/// Sessions are created through [`ChatSession::new`], mutated through
/// partial-field patches that always refresh `updated_at`, and deleted
/// explicitly. The message list is append-only from the API surface:
/// insertion order is chronological order, and no reordering or in-place
/// edit is exposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    /// Unique session identifier (opaque string)
    pub id: String,
    /// Human-readable session title
    pub title: String,
    /// Identifier of the completion-provider model in use
    pub model: String,
    /// Interface language of the conversation
    pub language: Language,
    /// Owning group. Referential integrity is enforced on group deletion,
    /// not re-validated here.
    pub group_id: String,
    /// Timestamp when the session was created
    pub created_at: DateTime<Utc>,
    /// Timestamp when the session was last updated
    pub updated_at: DateTime<Utc>,
    /// Conversation history, insertion order = chronological order
    pub messages: Vec<ChatMessage>,
}

impl ChatSession {
    /// Creates a fresh session with a generated id, empty history, and
    /// `created_at == updated_at == now`.
    pub fn new(request: NewSession) -> Self {
        let now = Utc::now();
        Self {
            id: id::generate("session"),
            title: request.title,
            model: request.model,
            language: request.language,
            group_id: request.group_id,
            created_at: now,
            updated_at: now,
            messages: Vec::new(),
        }
    }

    /// Merges the provided fields of `patch` into the session and
    /// refreshes `updated_at`.
    pub fn apply(&mut self, patch: SessionPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(model) = patch.model {
            self.model = model;
        }
        if let Some(language) = patch.language {
            self.language = language;
        }
        if let Some(group_id) = patch.group_id {
            self.group_id = group_id;
        }
        self.updated_at = Utc::now();
    }

    /// Appends a message and refreshes `updated_at`.
    pub fn push_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.updated_at = Utc::now();
    }
}

/// Input for creating a session.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub title: String,
    pub model: String,
    pub language: Language,
    pub group_id: String,
}

/// Partial update of a session. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct SessionPatch {
    pub title: Option<String>,
    pub model: Option<String>,
    pub language: Option<Language>,
    pub group_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::message::MessageRole;
    use std::str::FromStr;

    fn new_request() -> NewSession {
        NewSession {
            title: "Conveyor control".to_string(),
            model: "magicoder:7b-s-cl".to_string(),
            language: Language::En,
            group_id: "group_automation".to_string(),
        }
    }

    #[test]
    fn test_new_session_is_empty_and_timestamps_match() {
        let session = ChatSession::new(new_request());
        assert!(session.id.starts_with("session_"));
        assert!(session.messages.is_empty());
        assert_eq!(session.created_at, session.updated_at);
    }

    #[test]
    fn test_apply_merges_only_provided_fields() {
        let mut session = ChatSession::new(new_request());
        let before = session.updated_at;

        session.apply(SessionPatch {
            title: Some("Renamed".to_string()),
            ..Default::default()
        });

        assert_eq!(session.title, "Renamed");
        assert_eq!(session.model, "magicoder:7b-s-cl");
        assert_eq!(session.language, Language::En);
        assert!(session.updated_at >= before);
    }

    #[test]
    fn test_push_message_appends_in_order() {
        let mut session = ChatSession::new(new_request());
        session.push_message(ChatMessage::new(MessageRole::User, "first"));
        session.push_message(ChatMessage::new(MessageRole::Assistant, "second"));

        assert_eq!(session.messages.len(), 2);
        assert_eq!(session.messages[0].content, "first");
        assert_eq!(session.messages[1].content, "second");
    }

    #[test]
    fn test_language_round_trip() {
        assert_eq!(Language::from_str("it").unwrap(), Language::It);
        assert_eq!(Language::from_str("en").unwrap(), Language::En);
        assert_eq!(Language::It.to_string(), "it");
        assert!(Language::from_str("de").is_err());
    }

    #[test]
    fn test_session_serializes_timestamps_as_iso8601() {
        let session = ChatSession::new(new_request());
        let json = serde_json::to_string(&session).unwrap();

        // RFC 3339 timestamps and lowercase language tags on the wire.
        assert!(json.contains("\"language\":\"en\""));
        let parsed: ChatSession = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, session);
    }
}
