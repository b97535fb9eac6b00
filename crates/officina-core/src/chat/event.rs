//! Change events emitted by the reactive binding layer.
//!
//! Every successful mutation of the chat store is mirrored into one of
//! these events so UI consumers can subscribe instead of polling. All
//! variants are Clone + Send + Sync for use with tokio broadcast channels.

use super::group::ChatGroup;
use super::message::ChatMessage;
use super::model::ChatSession;
use serde::{Deserialize, Serialize};

/// High-level change notifications for chat state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    /// A new session was created.
    SessionCreated { session: ChatSession },
    /// Session fields were patched.
    SessionUpdated { session: ChatSession },
    /// A session was removed. Terminal for that id.
    SessionDeleted { id: String },
    /// A message was appended to a session's history.
    MessageAppended {
        session_id: String,
        message: ChatMessage,
    },
    /// A new group was created.
    GroupCreated { group: ChatGroup },
    /// Group fields were patched.
    GroupUpdated { group: ChatGroup },
    /// A group was removed.
    GroupDeleted { id: String },
    /// The current-session pointer moved (or was cleared).
    CurrentSessionChanged { id: Option<String> },
}
