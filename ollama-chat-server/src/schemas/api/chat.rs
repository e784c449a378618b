use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::Message;

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// Model key from `GET /api/models`; unknown keys use `general`.
    pub model_key: String,
    /// Conversation so far, oldest first. Only the most recent messages are
    /// forwarded to the model.
    pub messages: Vec<Message>,
}
