//! Model discovery route.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::schemas::api::models::{ModelInfo, ModelsResponse};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(list_models), components(schemas(ModelInfo, ModelsResponse)))]
pub struct ModelsApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/models", get(list_models))
}

/// List the selectable models (`GET /api/models`).
#[utoipa::path(
    get,
    path = "/api/models",
    tag = "models",
    responses(
        (status = 200, description = "Registered models in display order", body = ModelsResponse)
    )
)]
pub async fn list_models(State(state): State<Arc<AppState>>) -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: state.registry.list_models().iter().map(ModelInfo::from).collect(),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::{ScriptedBackend, test_state};

    #[tokio::test]
    async fn lists_general_then_code() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path(), Arc::new(ScriptedBackend::default())).await;

        let Json(body) = list_models(State(state)).await;
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["models"][0]["key"], "general");
        assert_eq!(value["models"][0]["name"], "qwen2.5:3b");
        assert_eq!(value["models"][0]["label"], "💬 General");
        assert_eq!(value["models"][1]["key"], "code");
        assert_eq!(value["models"][1]["name"], "qwen2.5-coder:3b");
    }
}
