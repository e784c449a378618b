use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::services::ModelEntry;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModelInfo {
    /// Key to send as `model_key`.
    pub key: String,
    /// Backend model identifier.
    pub name: String,
    /// Display label.
    pub label: String,
}

/// Response body for `GET /api/models`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModelsResponse {
    pub models: Vec<ModelInfo>,
}

impl From<&ModelEntry> for ModelInfo {
    fn from(entry: &ModelEntry) -> Self {
        Self {
            key: entry.key.clone(),
            name: entry.name.clone(),
            label: entry.label.clone(),
        }
    }
}
