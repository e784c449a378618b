//! Frontend page.

use std::io::ErrorKind;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(serve_index))]
pub struct IndexApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(serve_index))
}

/// Serve the single-page frontend (`GET /`).
///
/// The file is read on every request so edits show up without a restart.
#[utoipa::path(
    get,
    path = "/",
    tag = "frontend",
    responses(
        (status = 200, description = "Frontend page", content_type = "text/html", body = String),
        (status = 404, description = "Frontend page not installed"),
    )
)]
pub async fn serve_index(State(state): State<Arc<AppState>>) -> Result<Html<String>, ServerError> {
    let path = &state.config.index_path;
    match tokio::fs::read_to_string(path).await {
        Ok(page) => Ok(Html(page)),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(ServerError::NotFound(format!(
            "frontend page {} not found",
            path.display()
        ))),
        Err(e) => Err(ServerError::Internal(format!(
            "failed to read {}: {e}",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::{ScriptedBackend, test_state};

    #[tokio::test]
    async fn serves_page_from_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path(), Arc::new(ScriptedBackend::default())).await;
        tokio::fs::write(&state.config.index_path, "<h1>chat</h1>").await.unwrap();

        let Html(page) = serve_index(State(state)).await.unwrap();
        assert_eq!(page, "<h1>chat</h1>");
    }

    #[tokio::test]
    async fn missing_page_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path(), Arc::new(ScriptedBackend::default())).await;
        assert!(matches!(serve_index(State(state)).await, Err(ServerError::NotFound(_))));
    }
}
