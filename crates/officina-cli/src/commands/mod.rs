//! CLI command implementations.

pub mod chat;
pub mod data;
pub mod git;
pub mod groups;
pub mod models;
pub mod sessions;
pub mod user;

use anyhow::Result;
use officina_application::ChatManager;
use officina_core::chat::ChatStore;
use officina_infrastructure::paths::OfficinaPaths;
use officina_infrastructure::{JsonChatStore, OfficinaConfig};
use std::sync::Arc;

/// Shared wiring for commands that touch the local chat store.
pub struct AppContext {
    pub config: OfficinaConfig,
    pub manager: ChatManager,
    /// Direct store handle for backup/restore paths that bypass the
    /// mirror.
    pub store: Arc<dyn ChatStore>,
}

/// Loads configuration, opens the store, and initializes the manager.
pub async fn app_context() -> Result<AppContext> {
    let paths = OfficinaPaths::default_location()?;
    let config = OfficinaConfig::load(&paths)?;
    let store: Arc<dyn ChatStore> = Arc::new(JsonChatStore::open(paths.chat_dir())?);
    let manager = ChatManager::new(store.clone());
    manager.init().await?;
    Ok(AppContext {
        config,
        manager,
        store,
    })
}

/// A cookie-carrying HTTP client for the authenticated backend routes.
pub fn backend_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder().cookie_store(true).build()?)
}
