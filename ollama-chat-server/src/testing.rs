//! Test helpers: a scripted in-process backend and a ready-made app state.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use ollama_chat_client::{ChatResponse, ChatStream, OllamaError, ResponseMessage};

use crate::config::Config;
use crate::entities::{FileStore, Message};
use crate::services::{ChatBackend, ChatRelay, ModelRegistry};
use crate::state::AppState;

pub fn msg(role: &str, content: &str) -> Message {
    Message {
        role: role.into(),
        content: content.into(),
    }
}

/// One scripted backend increment.
#[derive(Debug, Clone, Copy)]
pub enum Step {
    Content(&'static str),
    Fail(&'static str),
}

/// Backend that replays a fixed script and records every call.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    script: Vec<Step>,
    open_error: Option<&'static str>,
    calls: Mutex<Vec<(String, Vec<Message>)>>,
    pulled: Arc<AtomicUsize>,
}

impl ScriptedBackend {
    pub fn new(script: Vec<Step>) -> Self {
        Self {
            script,
            ..Default::default()
        }
    }

    /// A backend whose requests fail before any increment is produced.
    pub fn failing_to_open(message: &'static str) -> Self {
        Self {
            open_error: Some(message),
            ..Default::default()
        }
    }

    /// `(model, messages)` of every call so far.
    pub fn calls(&self) -> Vec<(String, Vec<Message>)> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of increments handed out across all streams so far.
    pub fn pulled(&self) -> usize {
        self.pulled.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn chat_stream(&self, model: &str, messages: &[Message]) -> Result<ChatStream, OllamaError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_owned(), messages.to_vec()));

        if let Some(message) = self.open_error {
            return Err(OllamaError::Api(message.to_owned()));
        }

        let items: Vec<Result<ChatResponse, OllamaError>> = self
            .script
            .iter()
            .map(|step| match step {
                Step::Content(text) => Ok(ChatResponse {
                    message: Some(ResponseMessage {
                        role: Some("assistant".into()),
                        content: Some((*text).to_owned()),
                    }),
                    ..Default::default()
                }),
                Step::Fail(message) => Err(OllamaError::Api((*message).to_owned())),
            })
            .collect();
        let pulled = Arc::clone(&self.pulled);
        Ok(stream::iter(items)
            .inspect(move |_| {
                pulled.fetch_add(1, Ordering::SeqCst);
            })
            .boxed())
    }

    async fn version(&self) -> Result<String, OllamaError> {
        match self.open_error {
            Some(message) => Err(OllamaError::Api(message.to_owned())),
            None => Ok("scripted".to_owned()),
        }
    }
}

/// App state over a store in `dir` and the given backend.
pub async fn test_state(dir: &Path, backend: Arc<ScriptedBackend>) -> Arc<AppState> {
    let config = Config {
        storage_dir: dir.join("saved_chats"),
        index_path: dir.join("index.html"),
        enable_swagger: false,
        ..Config::default()
    };
    let store = FileStore::open(&config.storage_dir).await.unwrap();
    let registry = Arc::new(ModelRegistry::from_config(&config));
    let backend: Arc<dyn ChatBackend> = backend;
    let relay = ChatRelay::new(Arc::clone(&registry), Arc::clone(&backend), config.context_messages);

    Arc::new(AppState {
        config: Arc::new(config),
        store: Arc::new(store),
        registry,
        relay: Arc::new(relay),
        backend,
    })
}
