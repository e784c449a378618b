//! Saved-chat CRUD routes.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;
use utoipa::OpenApi;

use crate::entities::{ChatRecord, ChatStore, ChatSummary, Message};
use crate::error::ServerError;
use crate::schemas::api::chats::{DeleteChatResponse, SaveChatRequest, SaveChatResponse};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(list_chats, get_chat, save_chat, delete_chat),
    components(schemas(
        ChatSummary,
        ChatRecord,
        Message,
        SaveChatRequest,
        SaveChatResponse,
        DeleteChatResponse
    ))
)]
pub struct ChatsApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/chats", get(list_chats).post(save_chat))
        .route("/chats/{id}", get(get_chat).delete(delete_chat))
}

/// List saved chats, newest first (`GET /api/chats`).
///
/// Files that cannot be parsed are left out rather than failing the list.
#[utoipa::path(
    get,
    path = "/api/chats",
    tag = "chats",
    responses(
        (status = 200, description = "Saved chats, newest first", body = Vec<ChatSummary>),
        (status = 500, description = "Storage directory unreadable"),
    )
)]
pub async fn list_chats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ChatSummary>>, ServerError> {
    Ok(Json(state.store.list_chats().await?))
}

/// Load one chat (`GET /api/chats/{id}`).
#[utoipa::path(
    get,
    path = "/api/chats/{id}",
    tag = "chats",
    params(("id" = String, Path, description = "Chat id")),
    responses(
        (status = 200, description = "Full chat record", body = ChatRecord),
        (status = 404, description = "Chat not found"),
        (status = 500, description = "Chat file is corrupted"),
    )
)]
pub async fn get_chat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ChatRecord>, ServerError> {
    Ok(Json(state.store.get_chat(&id).await?))
}

/// Create or overwrite a chat (`POST /api/chats`).
#[utoipa::path(
    post,
    path = "/api/chats",
    tag = "chats",
    request_body = SaveChatRequest,
    responses(
        (status = 200, description = "Chat saved", body = SaveChatResponse),
        (status = 400, description = "Invalid chat id"),
        (status = 422, description = "Request body has the wrong shape"),
    )
)]
pub async fn save_chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SaveChatRequest>,
) -> Result<Json<SaveChatResponse>, ServerError> {
    let record = state.store.save_chat(req.into()).await?;
    info!(id = %record.id, title = %record.title, "chat saved");
    Ok(Json(record.to_save_response()))
}

/// Delete a chat (`DELETE /api/chats/{id}`).
#[utoipa::path(
    delete,
    path = "/api/chats/{id}",
    tag = "chats",
    params(("id" = String, Path, description = "Chat id")),
    responses(
        (status = 200, description = "Chat deleted", body = DeleteChatResponse),
        (status = 404, description = "Chat not found"),
    )
)]
pub async fn delete_chat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteChatResponse>, ServerError> {
    state.store.delete_chat(&id).await?;
    info!(id = %id, "chat deleted");
    Ok(Json(DeleteChatResponse {
        status: "success".into(),
    }))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
