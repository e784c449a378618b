//! ollama-chat-server – entry point.
//!
//! Startup order:
//! 1. Parse configuration from environment variables.
//! 2. Initialise structured tracing (JSON or human-readable).
//! 3. Open the chat store, creating the storage directory if needed.
//! 4. Build the model registry, the Ollama client, and the chat relay.
//! 5. Assemble the shared application state.
//! 6. Build the Axum router and start the HTTP server with graceful shutdown.

mod config;
mod entities;
mod error;
mod middleware;
mod routes;
mod schemas;
mod services;
mod state;
#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;

use ollama_chat_client::OllamaClient;
use tracing::{info, warn};

use crate::config::Config;
use crate::entities::FileStore;
use crate::services::{ChatBackend, ChatRelay, ModelRegistry};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Configuration ───────────────────────────────────────────────────────
    let cfg = Config::from_env();

    // ── 2. Tracing ─────────────────────────────────────────────────────────────
    // Build the log-level filter, warning loudly if the configured value is
    // not a valid tracing filter expression.
    let env_filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => match cfg.log_level.parse::<tracing_subscriber::EnvFilter>() {
            Ok(f) => f,
            Err(e) => {
                eprintln!(
                    "WARN: OLLAMA_CHAT_LOG='{}' is not a valid tracing filter ({}); \
                     falling back to 'info'",
                    cfg.log_level, e
                );
                tracing_subscriber::EnvFilter::new("info")
            }
        },
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true);

    if cfg.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    info!(version = env!("CARGO_PKG_VERSION"), "ollama-chat-server starting");

    // ── 3. Chat store ──────────────────────────────────────────────────────────
    let store = FileStore::open(&cfg.storage_dir).await?;
    info!(storage_dir = %cfg.storage_dir.display(), "chat store ready");

    // ── 4. Model registry, backend, relay ──────────────────────────────────────
    let registry = Arc::new(ModelRegistry::from_config(&cfg));
    let backend: Arc<dyn ChatBackend> = Arc::new(OllamaClient::new(&cfg.ollama_host)?);
    for entry in registry.list_models() {
        info!(key = %entry.key, model = %entry.name, "model registered");
    }
    match backend.version().await {
        Ok(version) => info!(host = %cfg.ollama_host, %version, "ollama reachable"),
        Err(e) => warn!(
            host = %cfg.ollama_host,
            error = %e,
            "ollama not reachable yet; chat requests will fail until it is"
        ),
    }
    let relay = ChatRelay::new(
        Arc::clone(&registry),
        Arc::clone(&backend),
        cfg.context_messages,
    );

    // ── 5. Shared application state ────────────────────────────────────────────
    let state = Arc::new(AppState {
        config: Arc::new(cfg.clone()),
        store: Arc::new(store),
        registry,
        relay: Arc::new(relay),
        backend,
    });

    // ── 6. HTTP server with graceful shutdown ──────────────────────────────────
    let app = routes::build(state);
    let addr: SocketAddr = cfg.bind_address.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("ollama-chat-server stopped");
    Ok(())
}

/// Returns a future that resolves when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install CTRL+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => warn!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c    => {}
        _ = terminate => {}
    }

    info!("shutdown signal received; starting graceful shutdown");
}
