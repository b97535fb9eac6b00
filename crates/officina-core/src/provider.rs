//! Completion provider contract.
//!
//! The external LLM inference service is an opaque collaborator: it turns
//! a message history into a response. Implementations live in the
//! infrastructure layer.

use crate::chat::{ChatMessage, Language, MessageRole};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The assistant's reply inside a [`Completion`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionMessage {
    pub role: MessageRole,
    pub content: String,
}

/// A completion returned by the provider, with timing metadata as
/// reported by the inference server (nanoseconds / token counts; absent
/// fields were not reported).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Completion {
    pub message: CompletionMessage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_duration: Option<u64>,
}

/// An abstract client for the completion provider.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends a conversation history to `model` and returns the
    /// assistant's reply.
    ///
    /// `language` selects the answer language when the history carries no
    /// system instruction of its own.
    async fn send_message(
        &self,
        model: &str,
        history: &[ChatMessage],
        language: Language,
    ) -> Result<Completion>;

    /// Whether the inference server is reachable.
    async fn check_health(&self) -> bool;

    /// Model identifiers installed on the inference server.
    async fn available_models(&self) -> Result<Vec<String>>;
}
