use std::ffi::OsStr;
use std::future::Future;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::entities::{ChatRecord, ChatSummary, FileStore, Message, NewChat, StoreError};

/// Title used when a chat has neither a title nor a user message.
pub const UNTITLED_CHAT: &str = "Untitled Chat";

/// Number of characters of the first user message kept in a derived title.
const TITLE_MAX_CHARS: usize = 50;

pub trait ChatStore: Send + Sync + 'static {
    /// Summaries of all readable records, newest first.
    fn list_chats(&self) -> impl Future<Output = Result<Vec<ChatSummary>, StoreError>> + Send;

    fn get_chat(&self, id: &str) -> impl Future<Output = Result<ChatRecord, StoreError>> + Send;

    /// Write `chat`, replacing any record with the same id. Returns the
    /// record as stored.
    fn save_chat(&self, chat: NewChat) -> impl Future<Output = Result<ChatRecord, StoreError>> + Send;

    fn delete_chat(&self, id: &str) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Summary fields as found on disk. Everything is optional so a record
/// written by an older frontend still lists.
#[derive(Debug, Deserialize)]
struct StoredSummary {
    id: Option<String>,
    title: Option<String>,
    timestamp: Option<String>,
    model: Option<String>,
}

/// A full record as found on disk, with the same tolerance as
/// [`StoredSummary`]: missing or `null` fields take the listing defaults.
#[derive(Debug, Deserialize)]
struct StoredChat {
    #[serde(flatten)]
    summary: StoredSummary,
    messages: Option<Vec<Message>>,
}

impl StoredSummary {
    fn into_summary(self, fallback_id: String) -> ChatSummary {
        ChatSummary {
            id: self.id.unwrap_or(fallback_id),
            title: self.title.unwrap_or_else(|| "Untitled".to_owned()),
            timestamp: self.timestamp.unwrap_or_default(),
            model: self.model.unwrap_or_else(|| "general".to_owned()),
        }
    }
}

impl StoredChat {
    fn into_record(self, fallback_id: String) -> ChatRecord {
        let ChatSummary {
            id,
            title,
            timestamp,
            model,
        } = self.summary.into_summary(fallback_id);
        ChatRecord {
            id,
            title,
            model,
            timestamp,
            messages: self.messages.unwrap_or_default(),
        }
    }
}

impl ChatStore for FileStore {
    async fn list_chats(&self) -> Result<Vec<ChatSummary>, StoreError> {
        let mut entries = match tokio::fs::read_dir(self.dir()).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut chats = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension() != Some(OsStr::new("json")) {
                continue;
            }
            match read_summary(&path).await {
                Ok(summary) => chats.push(summary),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable chat file"),
            }
        }

        chats.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(chats)
    }

    async fn get_chat(&self, id: &str) -> Result<ChatRecord, StoreError> {
        let path = self.record_path(id)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound(id.to_owned()));
            }
            Err(e) => return Err(e.into()),
        };
        let stored: StoredChat =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt { path, source })?;
        Ok(stored.into_record(id.to_owned()))
    }

    async fn save_chat(&self, chat: NewChat) -> Result<ChatRecord, StoreError> {
        let id = chat
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let path = self.record_path(&id)?;

        let record = ChatRecord {
            title: derive_title(chat.title, &chat.messages),
            id,
            model: chat.model,
            timestamp: now_timestamp(),
            messages: chat.messages,
        };
        let bytes = serde_json::to_vec_pretty(&record).map_err(StoreError::Encode)?;

        // Write next to the target and rename over it so a reader never sees
        // a half-written file. The unique temp name keeps concurrent saves of
        // the same id from clobbering each other's temp file.
        let tmp_path = self.dir().join(format!(".{}.{}.tmp", record.id, Uuid::new_v4()));
        if let Err(e) = write_then_rename(&tmp_path, &path, &bytes).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        debug!(id = %record.id, path = %path.display(), messages = record.messages.len(), "chat saved");
        Ok(record)
    }

    async fn delete_chat(&self, id: &str) -> Result<(), StoreError> {
        let path = self.record_path(id)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(id, "chat deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound(id.to_owned())),
            Err(e) => Err(e.into()),
        }
    }
}

async fn write_then_rename(tmp_path: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    tokio::fs::write(tmp_path, bytes).await?;
    tokio::fs::rename(tmp_path, path).await
}

async fn read_summary(path: &Path) -> Result<ChatSummary, StoreError> {
    let bytes = tokio::fs::read(path).await?;
    let stored: StoredSummary = serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
        path: path.to_owned(),
        source,
    })?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(stored.into_summary(stem))
}

/// Title for a chat saved without one: the first user message, cut to
/// [`TITLE_MAX_CHARS`] characters with a trailing `...` when longer.
pub fn derive_title(title: Option<String>, messages: &[Message]) -> String {
    if let Some(title) = title.filter(|t| !t.is_empty()) {
        return title;
    }
    match messages.iter().find(|m| m.role == "user") {
        Some(first) if first.content.chars().count() > TITLE_MAX_CHARS => {
            let mut title: String = first.content.chars().take(TITLE_MAX_CHARS).collect();
            title.push_str("...");
            title
        }
        Some(first) => first.content.clone(),
        None => UNTITLED_CHAT.to_owned(),
    }
}

/// Current local time as `YYYY-MM-DDTHH:MM:SS.ffffff`. The fixed width keeps
/// string order equal to chronological order.
fn now_timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

// ── Tests ──────────────────────────────────────────────────────────────────────
