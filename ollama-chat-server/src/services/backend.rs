//! The model backend seen by the chat relay.

use async_trait::async_trait;
use ollama_chat_client::{ChatMessage, ChatStream, OllamaClient, OllamaError};

use crate::entities::Message;

/// A model server that can stream chat completions.
#[async_trait]
pub trait ChatBackend: std::fmt::Debug + Send + Sync + 'static {
    /// Start a streaming completion of `messages` with `model`.
    async fn chat_stream(&self, model: &str, messages: &[Message]) -> Result<ChatStream, OllamaError>;

    /// Version of the backend, used for health reporting.
    async fn version(&self) -> Result<String, OllamaError>;
}

#[async_trait]
impl ChatBackend for OllamaClient {
    async fn chat_stream(&self, model: &str, messages: &[Message]) -> Result<ChatStream, OllamaError> {
        let messages: Vec<ChatMessage> = messages
            .iter()
            .map(|m| ChatMessage::new(m.role.as_str(), m.content.as_str()))
            .collect();
        OllamaClient::chat_stream(self, model, &messages).await
    }

    async fn version(&self) -> Result<String, OllamaError> {
        OllamaClient::version(self).await
    }
}
