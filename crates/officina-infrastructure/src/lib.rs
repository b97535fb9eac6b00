//! Infrastructure layer: durable storage, configuration, and the HTTP
//! clients for the external collaborators (completion, VCS, auth).

pub mod auth;
pub mod config;
pub mod json_chat_store;
pub mod ollama;
pub mod paths;
pub mod storage;
pub mod vcs;

pub use config::OfficinaConfig;
pub use json_chat_store::JsonChatStore;
pub use ollama::OllamaClient;
