//! Unified path management for Officina data files.
//!
//! All chat state and configuration live under the platform config
//! directory:
//!
//! ```text
//! ~/.config/officina/          # Config directory
//! ├── config.toml              # Application configuration
//! └── chat/                    # Chat store partitions
//!     ├── chat_sessions.json
//!     ├── chat_groups.json
//!     └── current_session
//! ```

use officina_core::error::{OfficinaError, Result};
use std::path::{Path, PathBuf};

/// Resolved base directory for Officina files.
#[derive(Debug, Clone)]
pub struct OfficinaPaths {
    base_dir: PathBuf,
}

impl OfficinaPaths {
    /// Creates a paths instance rooted at an explicit directory.
    ///
    /// Used by tests and by deployments that relocate state.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Creates a paths instance at the default platform location
    /// (e.g. `~/.config/officina`).
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the platform config directory cannot
    /// be determined.
    pub fn default_location() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| OfficinaError::Config("cannot find config directory".to_string()))?;
        Ok(Self::new(config_dir.join("officina")))
    }

    /// The base directory itself.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory holding the chat store partitions.
    pub fn chat_dir(&self) -> PathBuf {
        self.base_dir.join("chat")
    }

    /// Path to the main configuration file.
    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.toml")
    }
}
