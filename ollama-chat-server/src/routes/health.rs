//! Health / heartbeat endpoint.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_health))]
pub struct HealthApi;

/// Register health-check routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}

/// Heartbeat endpoint.
///
/// Always answers 200 while the server is up; whether Ollama can be reached
/// is reported in the `backend` field.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Server is healthy", body = Value)
    )
)]
pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let backend = match state.backend.version().await {
        Ok(version) => json!({ "reachable": true, "version": version }),
        Err(e) => {
            debug!(error = %e, "backend version probe failed");
            json!({ "reachable": false, "error": e.to_string() })
        }
    };
    Json(json!({
        "status":  "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "backend": backend,
    }))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
