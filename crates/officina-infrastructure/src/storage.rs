//! Durable key-value partitions backing the chat store.
//!
//! Three fixed partitions live as flat files in one directory. Absence is
//! a valid, expected state (first run). Reads never fail; writes are
//! best-effort and surface `Storage` errors for the caller to log and
//! treat as no-ops.

use officina_core::error::{OfficinaError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// The three logical partitions owned by the chat store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    /// JSON array of chat sessions
    Sessions,
    /// JSON array of chat groups
    Groups,
    /// Plain session-id string, not JSON
    CurrentSession,
}

impl Partition {
    /// File name of the partition inside the storage directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Partition::Sessions => "chat_sessions.json",
            Partition::Groups => "chat_groups.json",
            Partition::CurrentSession => "current_session",
        }
    }
}

/// File-backed storage for the chat partitions.
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    /// Creates the storage, ensuring the backing directory exists.
    ///
    /// # Errors
    ///
    /// Returns a `Storage` error if the directory cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(|e| {
            OfficinaError::storage(format!(
                "failed to create storage directory {:?}: {}",
                base_dir, e
            ))
        })?;
        Ok(Self { base_dir })
    }

    fn path(&self, partition: Partition) -> PathBuf {
        self.base_dir.join(partition.file_name())
    }

    /// Reads a partition's raw contents.
    ///
    /// Never fails: a missing file is `None`, and an unreadable file is
    /// logged and reported as `None` as well.
    pub fn read(&self, partition: Partition) -> Option<String> {
        let path = self.path(partition);
        match fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("failed to read {:?}: {}", path, e);
                None
            }
        }
    }

    /// Writes a partition's raw contents.
    ///
    /// # Errors
    ///
    /// Returns a `Storage` error on any filesystem failure. Callers log
    /// it and carry on; in-memory state is not rolled back.
    pub fn write(&self, partition: Partition, contents: &str) -> Result<()> {
        let path = self.path(partition);
        fs::write(&path, contents)
            .map_err(|e| OfficinaError::storage(format!("failed to write {:?}: {}", path, e)))
    }

    /// Removes a partition's file. Missing files are fine.
    pub fn remove(&self, partition: Partition) -> Result<()> {
        let path = self.path(partition);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(OfficinaError::storage(format!(
                "failed to remove {:?}: {}",
                path, e
            ))),
        }
    }
}
