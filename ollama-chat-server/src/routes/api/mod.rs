pub mod chat;
pub mod chats;
pub mod models;

use crate::state::AppState;
use utoipa::OpenApi;

use axum::Router;
use std::sync::Arc;

/// Routes nested under `/api`.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(models::router())
        .merge(chat::router())
        .merge(chats::router())
}

pub fn api_docs() -> utoipa::openapi::OpenApi {
    let mut doc = models::ModelsApi::openapi();
    doc.merge(chat::ChatApi::openapi());
    doc.merge(chats::ChatsApi::openapi());
    doc
}
