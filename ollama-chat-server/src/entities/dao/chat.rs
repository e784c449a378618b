use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Message {
    /// `"user"`, `"assistant"`, or `"system"`; not enforced.
    pub role: String,
    pub content: String,
}

/// One saved conversation, stored as `<id>.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatRecord {
    pub id: String,
    pub title: String,
    /// Model key the conversation was held with.
    pub model: String,
    /// Local time of the last save, ISO-8601 without offset.
    pub timestamp: String,
    pub messages: Vec<Message>,
}

/// Listing entry for a saved conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatSummary {
    pub id: String,
    pub title: String,
    pub timestamp: String,
    pub model: String,
}

/// A conversation as submitted for saving; `id` and `title` are filled in
/// by the store when absent.
#[derive(Debug, Clone)]
pub struct NewChat {
    pub id: Option<String>,
    pub title: Option<String>,
    pub model: String,
    pub messages: Vec<Message>,
}
