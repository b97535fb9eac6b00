//! Chat store trait.
//!
//! Defines the interface for session and group persistence operations.

use super::group::{ChatGroup, GroupPatch};
use super::message::ChatMessage;
use super::model::{ChatSession, NewSession, SessionPatch};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Whole-store backup envelope used by export/import.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatExport {
    #[serde(default)]
    pub sessions: Vec<ChatSession>,
    #[serde(default)]
    pub groups: Vec<ChatGroup>,
    #[serde(default)]
    pub current_session_id: Option<String>,
}

/// An abstract repository for chat sessions, chat groups, and the
/// current-session pointer.
///
/// This trait defines the contract for persisting and retrieving chat
/// state, decoupling the application's core logic from the specific
/// storage mechanism. All list-returning operations hand out defensive
/// copies; mutating a returned value never changes the backing store
/// until an explicit call.
///
/// # Implementation Notes
///
/// Implementations should handle:
/// - Timestamp reconstruction on every read
/// - Recovery from corrupted partitions (reset to empty, never crash)
/// - Write failures as logged no-ops rather than hard errors
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// Lists all sessions in stored (insertion) order.
    async fn list_sessions(&self) -> Result<Vec<ChatSession>>;

    /// Creates a session from `request` and persists it.
    ///
    /// The group id is trusted at creation time; no existence check is
    /// performed here.
    async fn create_session(&self, request: NewSession) -> Result<ChatSession>;

    /// Merges the provided fields into the session and refreshes its
    /// `updated_at`.
    ///
    /// # Errors
    ///
    /// - `NotFound("session")` if `id` is absent
    /// - `NotFound("group")` if the patch retargets the session to a
    ///   group that does not exist
    async fn update_session(&self, id: &str, patch: SessionPatch) -> Result<ChatSession>;

    /// Removes a session by id.
    ///
    /// Clears the current-session pointer when it referenced the removed
    /// session.
    ///
    /// # Returns
    ///
    /// Whether a removal occurred.
    async fn delete_session(&self, id: &str) -> Result<bool>;

    /// Appends a message to a session's history and refreshes the
    /// session's `updated_at`.
    ///
    /// This is a best-effort fire-and-forget path called frequently from
    /// the UI: a missing session yields `Ok(false)`, not an error.
    async fn add_message(&self, session_id: &str, message: ChatMessage) -> Result<bool>;

    /// Seeds the three fixed default groups into an empty groups
    /// partition.
    ///
    /// Idempotent: a non-empty partition is left untouched.
    async fn ensure_default_groups(&self) -> Result<()>;

    /// Lists all groups. Pure read; call [`Self::ensure_default_groups`]
    /// once at startup for the bootstrap behavior.
    async fn list_groups(&self) -> Result<Vec<ChatGroup>>;

    /// Creates a group and persists it.
    async fn create_group(
        &self,
        name: &str,
        color: &str,
        description: Option<String>,
    ) -> Result<ChatGroup>;

    /// Merges the provided fields into the group and refreshes its
    /// `updated_at`.
    ///
    /// # Errors
    ///
    /// - `NotFound("group")` if `id` is absent
    async fn update_group(&self, id: &str, patch: GroupPatch) -> Result<ChatGroup>;

    /// Removes a group by id.
    ///
    /// # Errors
    ///
    /// - `GroupInUse` if any session still references the group; the
    ///   error names the blocking sessions
    ///
    /// # Returns
    ///
    /// `false` if the group did not exist, `true` after a removal.
    async fn delete_group(&self, id: &str) -> Result<bool>;

    /// Returns the persisted current-session id, if any.
    async fn current_session_id(&self) -> Result<Option<String>>;

    /// Persists (or clears, with `None`) the current-session pointer.
    async fn set_current_session_id(&self, id: Option<&str>) -> Result<()>;

    /// Resolves the current-session pointer against the live session
    /// list.
    ///
    /// A pointer referencing a now-deleted session yields `None` rather
    /// than an error.
    async fn current_session(&self) -> Result<Option<ChatSession>>;

    /// Removes all sessions, groups, and the current-session pointer.
    async fn clear_all(&self) -> Result<()>;

    /// Snapshots the whole store into a backup envelope.
    async fn export_data(&self) -> Result<ChatExport>;

    /// Replaces store contents with the envelope's collections.
    ///
    /// Empty collections in the envelope are skipped so a partial backup
    /// does not wipe existing data.
    async fn import_data(&self, data: ChatExport) -> Result<()>;
}
