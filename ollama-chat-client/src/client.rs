use std::time::Duration;

use futures::stream::{BoxStream, StreamExt};
use reqwest::{Client as ReqwestClient, Response};
use tracing::debug;
use url::Url;

use crate::error::{OllamaError, Result};
use crate::ndjson::decode_chat_stream;
use crate::types::{ChatMessage, ChatRequest, ChatResponse, ErrorBody, VersionResponse};

/// Where `ollama serve` listens unless told otherwise.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:11434";

// Only the connection is bounded; generation may legitimately take minutes.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Stream of chat increments as produced by [`OllamaClient::chat_stream`].
pub type ChatStream = BoxStream<'static, Result<ChatResponse>>;

/// Client for a local Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: ReqwestClient,
    base_url: Url,
}

impl OllamaClient {
    /// Create a client for the Ollama server at `base_url`.
    ///
    /// Accepts the same forms as `OLLAMA_HOST`: a full URL
    /// (`http://127.0.0.1:11434`) or a bare `host:port`.
    pub fn new(base_url: &str) -> Result<Self> {
        let http = ReqwestClient::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Self::with_http_client(base_url, http)
    }

    /// Create a client reusing an existing `reqwest` client.
    pub fn with_http_client(base_url: &str, http: ReqwestClient) -> Result<Self> {
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Run a chat completion and wait for the full reply.
    pub async fn chat(&self, model: &str, messages: &[ChatMessage]) -> Result<ChatResponse> {
        let response = self
            .post_chat(&ChatRequest {
                model,
                messages,
                stream: false,
            })
            .await?;
        let body: ChatResponse = response.json().await?;
        if let Some(error) = body.error {
            return Err(OllamaError::Api(error));
        }
        Ok(body)
    }

    /// Run a chat completion in streaming mode.
    ///
    /// Connection failures and non-2xx replies are returned directly; errors
    /// after the stream has started arrive as the final stream item.
    /// Dropping the stream closes the connection to Ollama.
    pub async fn chat_stream(&self, model: &str, messages: &[ChatMessage]) -> Result<ChatStream> {
        let response = self
            .post_chat(&ChatRequest {
                model,
                messages,
                stream: true,
            })
            .await?;
        Ok(decode_chat_stream(Box::pin(response.bytes_stream())).boxed())
    }

    /// Version string reported by `GET /api/version`.
    pub async fn version(&self) -> Result<String> {
        let response = self.http.get(self.base_url.join("api/version")?).send().await?;
        let body: VersionResponse = check_status(response).await?.json().await?;
        Ok(body.version)
    }

    async fn post_chat(&self, request: &ChatRequest<'_>) -> Result<Response> {
        let url = self.base_url.join("api/chat")?;
        debug!(
            url = %url,
            model = request.model,
            messages = request.messages.len(),
            stream = request.stream,
            "sending chat request"
        );
        let response = self.http.post(url).json(request).send().await?;
        check_status(response).await
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => parsed.error,
        Err(_) => body,
    };
    Err(OllamaError::Status {
        status: status.as_u16(),
        message,
    })
}

fn normalize_base_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let mut url = if raw.contains("://") {
        Url::parse(raw)?
    } else {
        Url::parse(&format!("http://{raw}"))?
    };
    // `Url::join` replaces the last path segment unless the base ends in '/'.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
