//! JSON-file-backed ChatStore implementation.
//!
//! Collections are persisted whole (read-modify-write at collection
//! granularity, last-writer-wins across processes). Corrupted partitions
//! are reset to empty on read; failed writes are logged and treated as
//! no-ops, so in-memory state may transiently diverge from disk until the
//! next successful write.

use crate::storage::{FileStorage, Partition};
use async_trait::async_trait;
use officina_core::chat::{
    ChatExport, ChatGroup, ChatMessage, ChatSession, ChatStore, GroupPatch, NewSession,
    SessionPatch, default_groups,
};
use officina_core::error::{OfficinaError, Result};
use std::path::Path;

/// A repository implementation storing chat state as JSON files.
pub struct JsonChatStore {
    storage: FileStorage,
}

impl JsonChatStore {
    /// Wraps an existing storage.
    pub fn new(storage: FileStorage) -> Self {
        Self { storage }
    }

    /// Opens (or creates) a store rooted at `base_dir`.
    pub fn open(base_dir: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(FileStorage::new(base_dir)?))
    }

    fn load_sessions(&self) -> Vec<ChatSession> {
        let Some(raw) = self.storage.read(Partition::Sessions) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(sessions) => sessions,
            Err(e) => {
                tracing::warn!("corrupted sessions partition, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    fn save_sessions(&self, sessions: &[ChatSession]) {
        match serde_json::to_string(sessions) {
            Ok(json) => {
                if let Err(e) = self.storage.write(Partition::Sessions, &json) {
                    tracing::error!("failed to persist sessions: {}", e);
                }
            }
            Err(e) => tracing::error!("failed to serialize sessions: {}", e),
        }
    }

    fn load_groups(&self) -> Vec<ChatGroup> {
        let Some(raw) = self.storage.read(Partition::Groups) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(groups) => groups,
            Err(e) => {
                tracing::warn!("corrupted groups partition, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    fn save_groups(&self, groups: &[ChatGroup]) {
        match serde_json::to_string(groups) {
            Ok(json) => {
                if let Err(e) = self.storage.write(Partition::Groups, &json) {
                    tracing::error!("failed to persist groups: {}", e);
                }
            }
            Err(e) => tracing::error!("failed to serialize groups: {}", e),
        }
    }

    fn read_pointer(&self) -> Option<String> {
        self.storage
            .read(Partition::CurrentSession)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn write_pointer(&self, id: Option<&str>) {
        let result = match id {
            Some(id) => self.storage.write(Partition::CurrentSession, id),
            None => self.storage.remove(Partition::CurrentSession),
        };
        if let Err(e) = result {
            tracing::error!("failed to persist current-session pointer: {}", e);
        }
    }
}

#[async_trait]
impl ChatStore for JsonChatStore {
    async fn list_sessions(&self) -> Result<Vec<ChatSession>> {
        Ok(self.load_sessions())
    }

    async fn create_session(&self, request: NewSession) -> Result<ChatSession> {
        let mut sessions = self.load_sessions();
        let session = ChatSession::new(request);
        sessions.push(session.clone());
        self.save_sessions(&sessions);
        Ok(session)
    }

    async fn update_session(&self, id: &str, patch: SessionPatch) -> Result<ChatSession> {
        let mut sessions = self.load_sessions();
        let index = sessions
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| OfficinaError::not_found("session", id))?;

        // Retargeting to a group that does not exist is rejected.
        if let Some(group_id) = &patch.group_id {
            let groups = self.load_groups();
            if !groups.iter().any(|g| &g.id == group_id) {
                return Err(OfficinaError::not_found("group", group_id.clone()));
            }
        }

        sessions[index].apply(patch);
        let updated = sessions[index].clone();
        self.save_sessions(&sessions);
        Ok(updated)
    }

    async fn delete_session(&self, id: &str) -> Result<bool> {
        let mut sessions = self.load_sessions();
        let before = sessions.len();
        sessions.retain(|s| s.id != id);
        if sessions.len() == before {
            return Ok(false);
        }
        self.save_sessions(&sessions);

        if self.read_pointer().as_deref() == Some(id) {
            self.write_pointer(None);
        }

        Ok(true)
    }

    async fn add_message(&self, session_id: &str, message: ChatMessage) -> Result<bool> {
        let mut sessions = self.load_sessions();
        let Some(session) = sessions.iter_mut().find(|s| s.id == session_id) else {
            return Ok(false);
        };
        session.push_message(message);
        self.save_sessions(&sessions);
        Ok(true)
    }

    async fn ensure_default_groups(&self) -> Result<()> {
        if self.load_groups().is_empty() {
            self.save_groups(&default_groups());
        }
        Ok(())
    }

    async fn list_groups(&self) -> Result<Vec<ChatGroup>> {
        Ok(self.load_groups())
    }

    async fn create_group(
        &self,
        name: &str,
        color: &str,
        description: Option<String>,
    ) -> Result<ChatGroup> {
        let mut groups = self.load_groups();
        let group = ChatGroup::new(name, color, description);
        groups.push(group.clone());
        self.save_groups(&groups);
        Ok(group)
    }

    async fn update_group(&self, id: &str, patch: GroupPatch) -> Result<ChatGroup> {
        let mut groups = self.load_groups();
        let index = groups
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| OfficinaError::not_found("group", id))?;

        groups[index].apply(patch);
        let updated = groups[index].clone();
        self.save_groups(&groups);
        Ok(updated)
    }

    async fn delete_group(&self, id: &str) -> Result<bool> {
        let mut groups = self.load_groups();
        let before = groups.len();
        groups.retain(|g| g.id != id);
        if groups.len() == before {
            return Ok(false);
        }

        let blocking: Vec<String> = self
            .load_sessions()
            .iter()
            .filter(|s| s.group_id == id)
            .map(|s| s.title.clone())
            .collect();
        if !blocking.is_empty() {
            return Err(OfficinaError::GroupInUse {
                id: id.to_string(),
                sessions: blocking,
            });
        }

        self.save_groups(&groups);
        Ok(true)
    }

    async fn current_session_id(&self) -> Result<Option<String>> {
        Ok(self.read_pointer())
    }

    async fn set_current_session_id(&self, id: Option<&str>) -> Result<()> {
        self.write_pointer(id);
        Ok(())
    }

    async fn current_session(&self) -> Result<Option<ChatSession>> {
        let Some(id) = self.read_pointer() else {
            return Ok(None);
        };
        Ok(self.load_sessions().into_iter().find(|s| s.id == id))
    }

    async fn clear_all(&self) -> Result<()> {
        self.storage.remove(Partition::Sessions)?;
        self.storage.remove(Partition::Groups)?;
        self.storage.remove(Partition::CurrentSession)?;
        Ok(())
    }

    async fn export_data(&self) -> Result<ChatExport> {
        Ok(ChatExport {
            sessions: self.load_sessions(),
            groups: self.load_groups(),
            current_session_id: self.read_pointer(),
        })
    }

    async fn import_data(&self, data: ChatExport) -> Result<()> {
        if !data.sessions.is_empty() {
            self.save_sessions(&data.sessions);
        }
        if !data.groups.is_empty() {
            self.save_groups(&data.groups);
        }
        if let Some(id) = &data.current_session_id {
            self.write_pointer(Some(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use officina_core::chat::group::{GROUP_AUTOMATION, GROUP_DOCUMENTATION, GROUP_GENERAL};
    use officina_core::chat::{Language, MessageRole};
    use std::collections::HashSet;
    use std::time::Duration;
    use tempfile::TempDir;

    fn new_request(title: &str, group_id: &str) -> NewSession {
        NewSession {
            title: title.to_string(),
            model: "magicoder:7b-s-cl".to_string(),
            language: Language::En,
            group_id: group_id.to_string(),
        }
    }

    fn open_store(temp_dir: &TempDir) -> JsonChatStore {
        JsonChatStore::open(temp_dir.path()).unwrap()
    }

    #[tokio::test]
    async fn test_create_session_ids_are_unique() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir);

        let mut ids = HashSet::new();
        for i in 0..50 {
            let session = store
                .create_session(new_request(&format!("S{}", i), GROUP_GENERAL))
                .await
                .unwrap();
            ids.insert(session.id);
        }
        assert_eq!(ids.len(), 50);
    }

    #[tokio::test]
    async fn test_sessions_persist_across_store_instances() {
        let temp_dir = TempDir::new().unwrap();
        let created = {
            let store = open_store(&temp_dir);
            store
                .create_session(new_request("Persisted", GROUP_GENERAL))
                .await
                .unwrap()
        };

        let store = open_store(&temp_dir);
        let sessions = store.list_sessions().await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0], created);
    }

    #[tokio::test]
    async fn test_update_session_merges_and_bumps_updated_at() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir);
        store.ensure_default_groups().await.unwrap();

        let session = store
            .create_session(new_request("Before", GROUP_GENERAL))
            .await
            .unwrap();

        std::thread::sleep(Duration::from_millis(2));
        let updated = store
            .update_session(
                &session.id,
                SessionPatch {
                    title: Some("After".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "After");
        assert_eq!(updated.model, session.model);
        assert!(updated.updated_at > session.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_session_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir);

        let err = store
            .update_session("session_missing", SessionPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, OfficinaError::NotFound { entity_type: "session", .. }));
    }

    #[tokio::test]
    async fn test_update_session_rejects_unknown_group() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir);
        store.ensure_default_groups().await.unwrap();

        let session = store
            .create_session(new_request("S", GROUP_GENERAL))
            .await
            .unwrap();

        let err = store
            .update_session(
                &session.id,
                SessionPatch {
                    group_id: Some("group_missing".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, OfficinaError::NotFound { entity_type: "group", .. }));
    }

    #[tokio::test]
    async fn test_add_message_appends_and_bumps_updated_at() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir);

        let session = store
            .create_session(new_request("Chat", GROUP_GENERAL))
            .await
            .unwrap();

        std::thread::sleep(Duration::from_millis(2));
        let message = ChatMessage::new(MessageRole::User, "hello plc");
        let added = store.add_message(&session.id, message.clone()).await.unwrap();
        assert!(added);

        let sessions = store.list_sessions().await.unwrap();
        let reloaded = sessions.iter().find(|s| s.id == session.id).unwrap();
        assert_eq!(reloaded.messages.len(), 1);
        assert_eq!(reloaded.messages.last().unwrap(), &message);
        assert!(reloaded.updated_at > session.updated_at);
    }

    #[tokio::test]
    async fn test_add_message_to_missing_session_is_false() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir);

        let added = store
            .add_message("session_missing", ChatMessage::new(MessageRole::User, "x"))
            .await
            .unwrap();
        assert!(!added);
    }

    #[tokio::test]
    async fn test_default_group_bootstrap_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir);

        store.ensure_default_groups().await.unwrap();
        let first = store.list_groups().await.unwrap();
        let ids: Vec<&str> = first.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec![GROUP_GENERAL, GROUP_AUTOMATION, GROUP_DOCUMENTATION]);

        store.ensure_default_groups().await.unwrap();
        let second = store.list_groups().await.unwrap();
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn test_list_groups_is_a_pure_read() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir);

        assert!(store.list_groups().await.unwrap().is_empty());
        assert!(store.list_groups().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_group_update_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir);

        let group = store.create_group("G", "#fff", None).await.unwrap();
        std::thread::sleep(Duration::from_millis(2));
        store
            .update_group(
                &group.id,
                GroupPatch {
                    name: Some("G2".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let groups = store.list_groups().await.unwrap();
        let matching: Vec<_> = groups.iter().filter(|g| g.id == group.id).collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].name, "G2");
        assert!(matching[0].updated_at > matching[0].created_at);
    }

    #[tokio::test]
    async fn test_delete_group_blocked_while_in_use() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir);

        let group = store.create_group("A", "#fff", None).await.unwrap();
        let session = store
            .create_session(new_request("Blocking session", &group.id))
            .await
            .unwrap();

        let err = store.delete_group(&group.id).await.unwrap_err();
        match err {
            OfficinaError::GroupInUse { id, sessions } => {
                assert_eq!(id, group.id);
                assert_eq!(sessions, vec!["Blocking session".to_string()]);
            }
            other => panic!("expected GroupInUse, got {:?}", other),
        }

        assert!(store.delete_session(&session.id).await.unwrap());
        assert!(store.delete_group(&group.id).await.unwrap());
        assert!(store.list_groups().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_group_is_false() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir);
        assert!(!store.delete_group("group_missing").await.unwrap());
    }

    #[tokio::test]
    async fn test_deleting_current_session_clears_pointer() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir);

        let session = store
            .create_session(new_request("Current", GROUP_GENERAL))
            .await
            .unwrap();
        store.set_current_session_id(Some(&session.id)).await.unwrap();
        assert_eq!(
            store.current_session().await.unwrap().map(|s| s.id),
            Some(session.id.clone())
        );

        assert!(store.delete_session(&session.id).await.unwrap());
        assert_eq!(store.current_session_id().await.unwrap(), None);
        assert_eq!(store.current_session().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_dangling_pointer_resolves_to_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir);

        store.set_current_session_id(Some("session_gone")).await.unwrap();
        assert_eq!(store.current_session().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupted_partition_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir);
        store
            .create_session(new_request("S", GROUP_GENERAL))
            .await
            .unwrap();

        std::fs::write(temp_dir.path().join("chat_sessions.json"), "{not json").unwrap();
        assert!(store.list_sessions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_export_clear_import_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir);
        store.ensure_default_groups().await.unwrap();

        let session = store
            .create_session(new_request("Backup me", GROUP_AUTOMATION))
            .await
            .unwrap();
        store.set_current_session_id(Some(&session.id)).await.unwrap();

        let export = store.export_data().await.unwrap();
        store.clear_all().await.unwrap();
        assert!(store.list_sessions().await.unwrap().is_empty());
        assert!(store.list_groups().await.unwrap().is_empty());

        store.import_data(export).await.unwrap();
        assert_eq!(store.list_sessions().await.unwrap(), vec![session.clone()]);
        assert_eq!(store.list_groups().await.unwrap().len(), 3);
        assert_eq!(
            store.current_session_id().await.unwrap(),
            Some(session.id)
        );
    }
}
