//! Ollama completion provider client.
//!
//! Talks to a locally hosted Ollama server over its REST API:
//! `POST /api/chat` for completions and `GET /api/tags` for the installed
//! model list (which doubles as the health probe).

use async_trait::async_trait;
use officina_core::chat::{ChatMessage, Language, MessageRole};
use officina_core::error::{OfficinaError, Result};
use officina_core::provider::{Completion, CompletionMessage, CompletionProvider};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SYSTEM_INSTRUCTION_IT: &str =
    "Sei un assistente AI per l'automazione industriale. Rispondi in italiano.";
const SYSTEM_INSTRUCTION_EN: &str =
    "You are an AI assistant for industrial automation work. Respond in English.";

fn system_instruction(language: Language) -> &'static str {
    match language {
        Language::It => SYSTEM_INSTRUCTION_IT,
        Language::En => SYSTEM_INSTRUCTION_EN,
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    stream: bool,
}

#[derive(Serialize, Deserialize)]
struct WireMessage {
    role: MessageRole,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: WireMessage,
    total_duration: Option<u64>,
    load_duration: Option<u64>,
    prompt_eval_count: Option<u64>,
    eval_count: Option<u64>,
    eval_duration: Option<u64>,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagModel>,
}

#[derive(Deserialize)]
struct TagModel {
    name: String,
}

/// Builds the wire history, prepending a language-matched system
/// instruction when the history carries none of its own.
fn wire_history(history: &[ChatMessage], language: Language) -> Vec<WireMessage> {
    let mut messages = Vec::with_capacity(history.len() + 1);
    if !history.iter().any(|m| m.role == MessageRole::System) {
        messages.push(WireMessage {
            role: MessageRole::System,
            content: system_instruction(language).to_string(),
        });
    }
    messages.extend(history.iter().map(|m| WireMessage {
        role: m.role,
        content: m.content.clone(),
    }));
    messages
}

/// HTTP client for the Ollama inference server.
#[derive(Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    /// Creates a client for `base_url` with the given per-request
    /// timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OfficinaError::provider(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl CompletionProvider for OllamaClient {
    async fn send_message(
        &self,
        model: &str,
        history: &[ChatMessage],
        language: Language,
    ) -> Result<Completion> {
        let url = format!("{}/api/chat", self.base_url);
        let request = ChatRequest {
            model,
            messages: wire_history(history, language),
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| OfficinaError::provider(format!("Ollama request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(OfficinaError::provider(format!(
                "Ollama request failed with status: {}. Make sure Ollama is running with: ollama serve",
                response.status()
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| OfficinaError::provider(format!("invalid Ollama response: {}", e)))?;

        Ok(Completion {
            message: CompletionMessage {
                role: chat.message.role,
                content: chat.message.content,
            },
            total_duration: chat.total_duration,
            load_duration: chat.load_duration,
            prompt_eval_count: chat.prompt_eval_count,
            eval_count: chat.eval_count,
            eval_duration: chat.eval_duration,
        })
    }

    async fn check_health(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn available_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| OfficinaError::provider(format!("failed to list models: {}", e)))?;

        if !response.status().is_success() {
            return Err(OfficinaError::provider(format!(
                "failed to list models: {}. Make sure Ollama is running with: ollama serve",
                response.status()
            )));
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| OfficinaError::provider(format!("invalid tags response: {}", e)))?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}
