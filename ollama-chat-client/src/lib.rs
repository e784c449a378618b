//! Async client for the chat endpoints of a local Ollama server.
//!
//! Only what the chat server needs is covered: streaming and non-streaming
//! `POST /api/chat`, plus `GET /api/version` for health reporting.

pub mod client;
pub mod error;
mod ndjson;
pub mod types;

pub use client::{ChatStream, DEFAULT_BASE_URL, OllamaClient};
pub use error::{OllamaError, Result};
pub use types::{ChatMessage, ChatResponse, ResponseMessage};
