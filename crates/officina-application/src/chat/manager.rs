//! Reactive binding layer over the chat store.
//!
//! `ChatManager` keeps an in-memory mirror of the store (sessions, groups,
//! current session) and broadcasts a [`ChatEvent`] after every successful
//! mutation. Mutations are applied to the mirror directly rather than by
//! re-fetching, so concurrent local edits are never discarded.

use chrono::Utc;
use officina_core::chat::{
    ChatEvent, ChatGroup, ChatMessage, ChatSession, ChatStore, GroupPatch, NewSession,
    SessionPatch,
};
use officina_core::error::{OfficinaError, Result};
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

/// Buffer size for the change-event broadcast channel.
const EVENT_BUFFER: usize = 64;

/// Manages chat state for UI consumers.
///
/// `ChatManager` is responsible for:
/// - One-time initialization (default-group bootstrap, mirror load)
/// - Mirroring every store mutation into in-memory state
/// - Tracking the current-session selection
/// - Broadcasting change events to subscribers
pub struct ChatManager {
    /// Persistent storage backend for chat state
    store: Arc<dyn ChatStore>,
    /// In-memory mirror of the session collection
    sessions: RwLock<Vec<ChatSession>>,
    /// In-memory mirror of the group collection
    groups: RwLock<Vec<ChatGroup>>,
    /// In-memory mirror of the current session
    current: RwLock<Option<ChatSession>>,
    /// Change-event fan-out
    events: broadcast::Sender<ChatEvent>,
}

impl ChatManager {
    /// Creates a manager over a store backend. Call [`Self::init`] before
    /// first use.
    pub fn new(store: Arc<dyn ChatStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            store,
            sessions: RwLock::new(Vec::new()),
            groups: RwLock::new(Vec::new()),
            current: RwLock::new(None),
            events,
        }
    }

    /// One-time initialization: seeds the default groups and loads the
    /// mirror from storage.
    pub async fn init(&self) -> Result<()> {
        self.store.ensure_default_groups().await?;

        let sessions = self.store.list_sessions().await?;
        let groups = self.store.list_groups().await?;
        let current = self.store.current_session().await?;

        *self.sessions.write().await = sessions;
        *self.groups.write().await = groups;
        *self.current.write().await = current;
        Ok(())
    }

    /// Subscribes to change events.
    ///
    /// Slow subscribers that fall more than the channel buffer behind
    /// observe a `Lagged` error and should re-read the snapshots.
    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: ChatEvent) {
        // Send only fails when nobody is subscribed.
        let _ = self.events.send(event);
    }

    /// Snapshot of all sessions (defensive copy).
    pub async fn sessions(&self) -> Vec<ChatSession> {
        self.sessions.read().await.clone()
    }

    /// Snapshot of all groups (defensive copy).
    pub async fn groups(&self) -> Vec<ChatGroup> {
        self.groups.read().await.clone()
    }

    /// Snapshot of the current session, if one is selected.
    pub async fn current_session(&self) -> Option<ChatSession> {
        self.current.read().await.clone()
    }

    /// Creates a session and mirrors it.
    pub async fn create_session(&self, request: NewSession) -> Result<ChatSession> {
        let session = self.store.create_session(request).await?;
        self.sessions.write().await.push(session.clone());
        self.emit(ChatEvent::SessionCreated {
            session: session.clone(),
        });
        Ok(session)
    }

    /// Patches a session, mirroring the result (and the current-session
    /// mirror when it is the one being patched).
    pub async fn update_session(&self, id: &str, patch: SessionPatch) -> Result<ChatSession> {
        let updated = self.store.update_session(id, patch).await?;

        {
            let mut sessions = self.sessions.write().await;
            if let Some(slot) = sessions.iter_mut().find(|s| s.id == id) {
                *slot = updated.clone();
            }
        }
        {
            let mut current = self.current.write().await;
            if current.as_ref().is_some_and(|c| c.id == id) {
                *current = Some(updated.clone());
            }
        }

        self.emit(ChatEvent::SessionUpdated {
            session: updated.clone(),
        });
        Ok(updated)
    }

    /// Deletes a session.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is absent.
    pub async fn delete_session(&self, id: &str) -> Result<()> {
        let removed = self.store.delete_session(id).await?;
        if !removed {
            return Err(OfficinaError::not_found("session", id));
        }

        self.sessions.write().await.retain(|s| s.id != id);
        let was_current = {
            let mut current = self.current.write().await;
            if current.as_ref().is_some_and(|c| c.id == id) {
                *current = None;
                true
            } else {
                false
            }
        };

        self.emit(ChatEvent::SessionDeleted { id: id.to_string() });
        if was_current {
            self.emit(ChatEvent::CurrentSessionChanged { id: None });
        }
        Ok(())
    }

    /// Switches the current session.
    ///
    /// Resolves against the in-memory mirror; an unknown id is a silent
    /// no-op. On a hit the pointer is persisted as well.
    pub async fn switch_session(&self, id: &str) {
        let session = self.sessions.read().await.iter().find(|s| s.id == id).cloned();
        let Some(session) = session else {
            tracing::debug!("switch to unknown session '{}' ignored", id);
            return;
        };

        if let Err(e) = self.store.set_current_session_id(Some(id)).await {
            tracing::error!("failed to persist current-session pointer: {}", e);
        }
        *self.current.write().await = Some(session);
        self.emit(ChatEvent::CurrentSessionChanged {
            id: Some(id.to_string()),
        });
    }

    /// Appends a message to a session, mirroring the append.
    ///
    /// Best-effort: returns `false` (never errors) when the session is
    /// unknown or the store rejects the append.
    pub async fn add_message(&self, session_id: &str, message: ChatMessage) -> bool {
        let added = match self.store.add_message(session_id, message.clone()).await {
            Ok(added) => added,
            Err(e) => {
                tracing::error!("failed to append message: {}", e);
                false
            }
        };
        if !added {
            return false;
        }

        let now = Utc::now();
        {
            let mut sessions = self.sessions.write().await;
            if let Some(session) = sessions.iter_mut().find(|s| s.id == session_id) {
                session.messages.push(message.clone());
                session.updated_at = now;
            }
        }
        {
            let mut current = self.current.write().await;
            if let Some(session) = current.as_mut()
                && session.id == session_id
            {
                session.messages.push(message.clone());
                session.updated_at = now;
            }
        }

        self.emit(ChatEvent::MessageAppended {
            session_id: session_id.to_string(),
            message,
        });
        true
    }

    /// Creates a group and mirrors it.
    pub async fn create_group(
        &self,
        name: &str,
        color: &str,
        description: Option<String>,
    ) -> Result<ChatGroup> {
        let group = self.store.create_group(name, color, description).await?;
        self.groups.write().await.push(group.clone());
        self.emit(ChatEvent::GroupCreated {
            group: group.clone(),
        });
        Ok(group)
    }

    /// Patches a group and mirrors the result.
    pub async fn update_group(&self, id: &str, patch: GroupPatch) -> Result<ChatGroup> {
        let updated = self.store.update_group(id, patch).await?;

        {
            let mut groups = self.groups.write().await;
            if let Some(slot) = groups.iter_mut().find(|g| g.id == id) {
                *slot = updated.clone();
            }
        }

        self.emit(ChatEvent::GroupUpdated {
            group: updated.clone(),
        });
        Ok(updated)
    }

    /// Deletes a group.
    ///
    /// # Errors
    ///
    /// - `GroupInUse` when sessions still reference the group
    /// - `NotFound` when the id is absent
    pub async fn delete_group(&self, id: &str) -> Result<()> {
        let removed = self.store.delete_group(id).await?;
        if !removed {
            return Err(OfficinaError::not_found("group", id));
        }

        self.groups.write().await.retain(|g| g.id != id);
        self.emit(ChatEvent::GroupDeleted { id: id.to_string() });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use officina_core::chat::group::GROUP_GENERAL;
    use officina_core::chat::{Language, MessageRole};
    use officina_infrastructure::JsonChatStore;
    use tempfile::TempDir;

    fn new_request(title: &str, group_id: &str) -> NewSession {
        NewSession {
            title: title.to_string(),
            model: "magicoder:7b-s-cl".to_string(),
            language: Language::It,
            group_id: group_id.to_string(),
        }
    }

    async fn manager_in(temp_dir: &TempDir) -> ChatManager {
        let store = JsonChatStore::open(temp_dir.path()).unwrap();
        let manager = ChatManager::new(Arc::new(store));
        manager.init().await.unwrap();
        manager
    }

    #[tokio::test]
    async fn test_init_bootstraps_default_groups_into_mirror() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_in(&temp_dir).await;

        let groups = manager.groups().await;
        assert_eq!(groups.len(), 3);
        assert!(groups.iter().any(|g| g.id == GROUP_GENERAL));
        assert!(manager.sessions().await.is_empty());
        assert!(manager.current_session().await.is_none());
    }

    #[tokio::test]
    async fn test_create_session_mirrors_and_emits() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_in(&temp_dir).await;
        let mut events = manager.subscribe();

        let session = manager
            .create_session(new_request("Nastro trasportatore", GROUP_GENERAL))
            .await
            .unwrap();

        assert_eq!(manager.sessions().await, vec![session.clone()]);
        match events.try_recv().unwrap() {
            ChatEvent::SessionCreated { session: emitted } => assert_eq!(emitted, session),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_switch_session_persists_pointer() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_in(&temp_dir).await;
        let session = manager
            .create_session(new_request("S", GROUP_GENERAL))
            .await
            .unwrap();

        manager.switch_session(&session.id).await;
        assert_eq!(
            manager.current_session().await.map(|s| s.id),
            Some(session.id.clone())
        );

        // A fresh manager over the same directory restores the selection.
        let restored = manager_in(&temp_dir).await;
        assert_eq!(
            restored.current_session().await.map(|s| s.id),
            Some(session.id)
        );
    }

    #[tokio::test]
    async fn test_switch_to_unknown_session_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_in(&temp_dir).await;
        let session = manager
            .create_session(new_request("S", GROUP_GENERAL))
            .await
            .unwrap();
        manager.switch_session(&session.id).await;

        manager.switch_session("session_missing").await;
        assert_eq!(
            manager.current_session().await.map(|s| s.id),
            Some(session.id)
        );
    }

    #[tokio::test]
    async fn test_deleting_current_session_clears_selection() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_in(&temp_dir).await;
        let session = manager
            .create_session(new_request("S", GROUP_GENERAL))
            .await
            .unwrap();
        manager.switch_session(&session.id).await;

        manager.delete_session(&session.id).await.unwrap();
        assert!(manager.current_session().await.is_none());
        assert!(manager.sessions().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_session_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_in(&temp_dir).await;

        let err = manager.delete_session("session_missing").await.unwrap_err();
        assert!(matches!(err, OfficinaError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_session_refreshes_current_mirror() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_in(&temp_dir).await;
        let session = manager
            .create_session(new_request("Before", GROUP_GENERAL))
            .await
            .unwrap();
        manager.switch_session(&session.id).await;

        manager
            .update_session(
                &session.id,
                SessionPatch {
                    title: Some("After".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(
            manager.current_session().await.map(|s| s.title),
            Some("After".to_string())
        );
    }

    #[tokio::test]
    async fn test_add_message_updates_both_mirrors() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_in(&temp_dir).await;
        let session = manager
            .create_session(new_request("Chat", GROUP_GENERAL))
            .await
            .unwrap();
        manager.switch_session(&session.id).await;

        let message = ChatMessage::new(MessageRole::User, "come configuro OPC UA?");
        assert!(manager.add_message(&session.id, message.clone()).await);

        let mirrored = manager.sessions().await;
        assert_eq!(mirrored[0].messages, vec![message.clone()]);
        let current = manager.current_session().await.unwrap();
        assert_eq!(current.messages, vec![message]);
    }

    #[tokio::test]
    async fn test_add_message_to_unknown_session_is_false() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_in(&temp_dir).await;

        let message = ChatMessage::new(MessageRole::User, "x");
        assert!(!manager.add_message("session_missing", message).await);
    }

    #[tokio::test]
    async fn test_delete_group_in_use_propagates() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_in(&temp_dir).await;
        let group = manager.create_group("A", "#fff", None).await.unwrap();
        manager
            .create_session(new_request("S", &group.id))
            .await
            .unwrap();

        let err = manager.delete_group(&group.id).await.unwrap_err();
        assert!(matches!(err, OfficinaError::GroupInUse { .. }));
        // Mirror untouched on failure.
        assert!(manager.groups().await.iter().any(|g| g.id == group.id));
    }

    #[tokio::test]
    async fn test_snapshots_are_defensive_copies() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_in(&temp_dir).await;
        manager
            .create_session(new_request("S", GROUP_GENERAL))
            .await
            .unwrap();

        let mut snapshot = manager.sessions().await;
        snapshot.clear();
        assert_eq!(manager.sessions().await.len(), 1);
    }
}
