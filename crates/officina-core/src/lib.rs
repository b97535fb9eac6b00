pub mod chat;
pub mod error;
pub mod models;
pub mod provider;

// Re-export common error type
pub use error::{OfficinaError, Result};
