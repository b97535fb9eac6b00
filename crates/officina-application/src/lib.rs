//! Application layer: bridges the pull-based chat store into the
//! push-based subscription model UI consumers expect.

pub mod chat;

pub use chat::ChatManager;
