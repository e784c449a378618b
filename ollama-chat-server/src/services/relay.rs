//! Streaming chat relay.
//!
//! Forwards a conversation to the backend and turns its increments into a
//! stream of [`RelayEvent`]s. Once the HTTP response has started there is no
//! way to change its status, so backend failures become a final
//! [`RelayEvent::Error`] item and the stream ends there.

use std::sync::Arc;

use futures::future;
use futures::stream::{self, BoxStream, StreamExt};
use tracing::{debug, warn};

use crate::entities::Message;
use crate::services::backend::ChatBackend;
use crate::services::registry::ModelRegistry;

/// One item of a relayed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayEvent {
    /// Text produced by the model for one step.
    Content(String),
    /// The backend failed; always the last item.
    Error(String),
}

impl RelayEvent {
    /// Plain-text form sent to the client.
    pub fn into_text(self) -> String {
        match self {
            RelayEvent::Content(text) => text,
            RelayEvent::Error(message) => format!("Error: {message}"),
        }
    }
}

#[derive(Debug)]
pub struct ChatRelay {
    registry: Arc<ModelRegistry>,
    backend: Arc<dyn ChatBackend>,
    context_messages: usize,
}

impl ChatRelay {
    pub fn new(
        registry: Arc<ModelRegistry>,
        backend: Arc<dyn ChatBackend>,
        context_messages: usize,
    ) -> Self {
        Self {
            registry,
            backend,
            context_messages,
        }
    }

    /// Relay a completion of `messages` using the model behind `model_key`.
    ///
    /// Nothing is sent to the backend until the returned stream is polled.
    /// Dropping the stream drops the backend response, which closes the
    /// upstream connection.
    pub fn stream_chat(&self, model_key: &str, messages: Vec<Message>) -> BoxStream<'static, RelayEvent> {
        let model = self.registry.resolve(model_key).to_owned();
        let messages = truncate_context(messages, self.context_messages);
        let backend = Arc::clone(&self.backend);

        debug!(model_key, model = %model, messages = messages.len(), "relaying chat");

        stream::once(async move { backend.chat_stream(&model, &messages).await })
            .flat_map(|opened| match opened {
                Ok(increments) => increments
                    .map(|increment| match increment {
                        Ok(resp) => RelayEvent::Content(resp.content().to_owned()),
                        Err(e) => {
                            warn!(error = %e, "backend stream failed");
                            RelayEvent::Error(e.to_string())
                        }
                    })
                    .boxed(),
                Err(e) => {
                    warn!(error = %e, "backend request failed");
                    stream::once(future::ready(RelayEvent::Error(e.to_string()))).boxed()
                }
            })
            .scan(false, |failed, event| {
                if *failed {
                    return future::ready(None);
                }
                *failed = matches!(event, RelayEvent::Error(_));
                future::ready(Some(event))
            })
            .boxed()
    }
}

/// Keep only the last `limit` messages, in their original order.
pub fn truncate_context(mut messages: Vec<Message>, limit: usize) -> Vec<Message> {
    if messages.len() > limit {
        let excess = messages.len() - limit;
        messages.drain(..excess);
    }
    messages
}

// ── Tests ──────────────────────────────────────────────────────────────────────
