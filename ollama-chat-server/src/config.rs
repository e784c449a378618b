//! Server configuration, loaded from environment variables at startup.

use std::path::PathBuf;

/// Runtime configuration for ollama-chat-server.
///
/// Every field has a sensible default so the server works out-of-the-box
/// without any environment variables set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:8000"`).
    pub bind_address: String,

    /// Directory holding one `<id>.json` file per saved chat
    /// (default: `"./saved_chats"`). Created at startup if missing.
    pub storage_dir: PathBuf,

    /// Frontend page served at `/` (default: `"index.html"`).
    pub index_path: PathBuf,

    /// Base URL of the Ollama server. Read from `OLLAMA_HOST` so the same
    /// setting drives both Ollama and this server.
    pub ollama_host: String,

    /// Backend model behind the `general` key.
    pub general_model: String,

    /// Backend model behind the `code` key.
    pub code_model: String,

    /// How many of the most recent messages are forwarded to the model.
    pub context_messages: usize,

    /// Comma-separated list of allowed CORS origins; `None` allows any.
    pub cors_allowed_origins: Option<String>,

    /// Serve Swagger UI and the OpenAPI document.
    pub enable_swagger: bool,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_owned(),
            storage_dir: PathBuf::from("./saved_chats"),
            index_path: PathBuf::from("index.html"),
            ollama_host: ollama_chat_client::DEFAULT_BASE_URL.to_owned(),
            general_model: "qwen2.5:3b".to_owned(),
            code_model: "qwen2.5-coder:3b".to_owned(),
            context_messages: 20,
            cors_allowed_origins: None,
            enable_swagger: true,
            log_level: "info".to_owned(),
            log_json: false,
        }
    }
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_address: env_or("OLLAMA_CHAT_BIND", &defaults.bind_address),
            storage_dir: std::env::var_os("OLLAMA_CHAT_STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_dir),
            index_path: std::env::var_os("OLLAMA_CHAT_INDEX")
                .map(PathBuf::from)
                .unwrap_or(defaults.index_path),
            ollama_host: env_or("OLLAMA_HOST", &defaults.ollama_host),
            general_model: env_or("OLLAMA_CHAT_GENERAL_MODEL", &defaults.general_model),
            code_model: env_or("OLLAMA_CHAT_CODE_MODEL", &defaults.code_model),
            context_messages: parse_env::<usize>("OLLAMA_CHAT_CONTEXT_MESSAGES")
                .filter(|n| *n > 0)
                .unwrap_or(defaults.context_messages),
            cors_allowed_origins: std::env::var("OLLAMA_CHAT_CORS_ORIGINS")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            enable_swagger: env_flag("OLLAMA_CHAT_ENABLE_SWAGGER").unwrap_or(defaults.enable_swagger),
            log_level: env_or("OLLAMA_CHAT_LOG", &defaults.log_level),
            log_json: env_flag("OLLAMA_CHAT_LOG_JSON").unwrap_or(defaults.log_json),
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn env_flag(key: &str) -> Option<bool> {
    std::env::var(key).ok().and_then(|v| parse_flag(&v))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
