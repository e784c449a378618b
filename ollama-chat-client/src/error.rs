use thiserror::Error;

/// Errors that can be returned by the Ollama client.
#[derive(Debug, Error)]
pub enum OllamaError {
    /// The request could not be sent or the response body could not be read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Ollama answered with a non-2xx status code.
    #[error("backend returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Ollama reported an error inside an otherwise successful response,
    /// e.g. an `{"error": "..."}` line in the middle of a stream.
    #[error("{0}")]
    Api(String),

    /// A response line was not valid JSON of the expected shape.
    #[error("malformed backend response: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured base URL could not be parsed.
    #[error("invalid backend URL: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, OllamaError>;
