//! Streaming chat route.
//!
//! The reply is a `text/plain` body written fragment by fragment as the model
//! produces them. A backend failure cannot change the status once streaming
//! has begun, so it shows up as a final `Error: <message>` fragment.

use std::convert::Infallible;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use bytes::Bytes;
use futures::StreamExt;
use tracing::info;
use utoipa::OpenApi;

use crate::entities::Message;
use crate::schemas::api::chat::ChatRequest;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(chat_stream), components(schemas(ChatRequest, Message)))]
pub struct ChatApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/chat", post(chat_stream))
}

/// Stream a model reply (`POST /api/chat`).
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Reply text, streamed; failures end with an `Error: ...` fragment", content_type = "text/plain", body = String),
        (status = 400, description = "Malformed request body"),
        (status = 422, description = "Request body has the wrong shape"),
    )
)]
pub async fn chat_stream(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Response {
    info!(model_key = %req.model_key, messages = req.messages.len(), "chat stream requested");

    let fragments = state
        .relay
        .stream_chat(&req.model_key, req.messages)
        .map(|event| Ok::<_, Infallible>(Bytes::from(event.into_text())));

    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from_stream(fragments),
    )
        .into_response()
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use axum::body::to_bytes;
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::testing::{ScriptedBackend, Step, test_state};

    use super::*;

    fn chat_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn streams_plain_text() {
        let tmp = tempfile::tempdir().unwrap();
        let backend = Arc::new(ScriptedBackend::new(vec![
            Step::Content("Hello"),
            Step::Content(", world"),
        ]));
        let app = crate::routes::build(test_state(tmp.path(), backend.clone()).await);

        let resp = app
            .oneshot(chat_request(json!({
                "model_key": "code",
                "messages": [{ "role": "user", "content": "hi" }]
            })))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(
            resp.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/plain")
        );
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Hello, world");
        assert_eq!(backend.calls()[0].0, "qwen2.5-coder:3b");
    }

    #[tokio::test]
    async fn backend_failure_is_in_band_with_200() {
        let tmp = tempfile::tempdir().unwrap();
        let backend = Arc::new(ScriptedBackend::new(vec![
            Step::Content("Hel"),
            Step::Content("lo"),
            Step::Fail("model crashed"),
        ]));
        let app = crate::routes::build(test_state(tmp.path(), backend).await);

        let resp = app
            .oneshot(chat_request(json!({
                "model_key": "general",
                "messages": [{ "role": "user", "content": "hi" }]
            })))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"HelloError: model crashed");
    }

    #[tokio::test]
    async fn unreachable_backend_is_in_band() {
        let tmp = tempfile::tempdir().unwrap();
        let backend = Arc::new(ScriptedBackend::failing_to_open("connection refused"));
        let app = crate::routes::build(test_state(tmp.path(), backend).await);

        let resp = app
            .oneshot(chat_request(json!({ "model_key": "general", "messages": [] })))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Error: connection refused");
    }

    #[tokio::test]
    async fn malformed_body_is_rejected_before_backend() {
        let tmp = tempfile::tempdir().unwrap();
        let backend = Arc::new(ScriptedBackend::new(vec![Step::Content("x")]));
        let app = crate::routes::build(test_state(tmp.path(), backend.clone()).await);

        let resp = app
            .oneshot(chat_request(json!({ "model_key": "general", "messages": "oops" })))
            .await
            .unwrap();

        assert!(resp.status().is_client_error());
        assert!(backend.calls().is_empty());
    }
}
