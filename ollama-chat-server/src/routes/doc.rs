use crate::routes::{api, health, index};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "ollama-chat-server",
    description = "Chat proxy and transcript store for a local Ollama server",
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(index::IndexApi::openapi());
    root.merge(api::api_docs());
    root
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = get_docs();
        for path in ["/", "/health", "/api/models", "/api/chat", "/api/chats", "/api/chats/{id}"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
