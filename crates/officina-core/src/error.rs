//! Error types for the Officina application.

use thiserror::Error;

/// Convenience alias used across the workspace.
pub type Result<T> = std::result::Result<T, OfficinaError>;

/// A shared error type for the entire Officina application.
///
/// Invariant violations and not-found conditions are always surfaced to
/// the caller so the UI can show a message. Storage and parse failures are
/// recovered locally with best-effort fallbacks and normally never reach
/// callers as errors.
#[derive(Error, Debug, Clone)]
pub enum OfficinaError {
    /// Entity not found error with type information
    #[error("{entity_type} not found: '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// A group still referenced by one or more chat sessions was asked to
    /// be deleted. Carries the titles of the blocking sessions.
    #[error("group '{id}' is still used by {} session(s): {}", .sessions.len(), .sessions.join(", "))]
    GroupInUse { id: String, sessions: Vec<String> },

    /// Write-side storage failure (serialization, quota, filesystem)
    #[error("storage error: {message}")]
    Storage { message: String },

    /// A persisted partition could not be parsed
    #[error("parse error in partition '{partition}': {message}")]
    Parse { partition: String, message: String },

    /// External provider failure (completion, VCS, or auth backend)
    #[error("provider error: {0}")]
    Provider(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error (should not happen in normal operation)
    #[error("internal error: {0}")]
    Internal(String),
}

impl OfficinaError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates a Parse error for the given partition
    pub fn parse(partition: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            partition: partition.into(),
            message: message.into(),
        }
    }

    /// Creates a Provider error
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl From<std::io::Error> for OfficinaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = OfficinaError::not_found("session", "session_123");
        assert_eq!(err.to_string(), "session not found: 'session_123'");
    }

    #[test]
    fn test_group_in_use_display_names_blocking_sessions() {
        let err = OfficinaError::GroupInUse {
            id: "group_general".to_string(),
            sessions: vec!["Conveyor FB".to_string(), "Safety timer".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("group_general"));
        assert!(msg.contains("2 session(s)"));
        assert!(msg.contains("Conveyor FB"));
        assert!(msg.contains("Safety timer"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: OfficinaError = io.into();
        assert!(matches!(err, OfficinaError::Io { .. }));
    }
}
