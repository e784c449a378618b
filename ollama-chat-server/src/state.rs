//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::config::Config;
use crate::entities::FileStore;
use crate::services::{ChatBackend, ChatRelay, ModelRegistry};

/// State shared across all HTTP handlers. Nothing in here is mutated after
/// startup; the only shared mutable resource is the storage directory.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Saved chat transcripts.
    pub store: Arc<FileStore>,
    /// Model key → backend model table.
    pub registry: Arc<ModelRegistry>,
    /// Streaming relay to the model backend.
    pub relay: Arc<ChatRelay>,
    /// The backend itself, for health reporting.
    pub backend: Arc<dyn ChatBackend>,
}
