//! Chat session and group domain types, change events, and the
//! persistence contract implemented by the infrastructure layer.

pub mod event;
pub mod group;
pub mod id;
pub mod message;
pub mod model;
pub mod store;

pub use event::ChatEvent;
pub use group::{ChatGroup, GroupPatch, default_groups};
pub use message::{ChatMessage, MessageRole};
pub use model::{ChatSession, Language, NewSession, SessionPatch};
pub use store::{ChatExport, ChatStore};
