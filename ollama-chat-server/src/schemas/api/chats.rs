use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{ChatRecord, Message, NewChat};

/// Request body for `POST /api/chats`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaveChatRequest {
    /// Existing chat id to overwrite; a new id is minted when absent.
    #[serde(default)]
    pub id: Option<String>,
    /// Derived from the first user message when absent.
    #[serde(default)]
    pub title: Option<String>,
    pub model: String,
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaveChatResponse {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteChatResponse {
    /// Always `"success"`.
    pub status: String,
}

impl From<SaveChatRequest> for NewChat {
    fn from(req: SaveChatRequest) -> Self {
        NewChat {
            id: req.id,
            title: req.title,
            model: req.model,
            messages: req.messages,
        }
    }
}

impl ChatRecord {
    pub fn to_save_response(&self) -> SaveChatResponse {
        SaveChatResponse {
            id: self.id.clone(),
            title: self.title.clone(),
        }
    }
}
