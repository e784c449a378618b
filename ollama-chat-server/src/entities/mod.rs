//! Chat transcript persistence.
//!
//! [`ChatStore`] defines the interface for persisting chat records. The
//! implementation is [`FileStore`], which keeps one pretty-printed JSON file
//! per record in a directory. There is no cache and no locking: every call
//! reads the directory as it is, and concurrent saves of the same id are
//! last-write-wins.

pub mod chat;
pub mod dao;

pub use chat::ChatStore;
pub use dao::{ChatRecord, ChatSummary, Message, NewChat};

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised by the chat store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record file exists for the id.
    #[error("chat {0} not found")]
    NotFound(String),

    /// The id cannot be used as a file name inside the storage directory.
    #[error("invalid chat id: {0:?}")]
    InvalidId(String),

    /// The record file exists but does not hold a valid chat record.
    #[error("failed to parse {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode chat record: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Chat store backed by a directory of `<id>.json` files.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open the store rooted at `dir`, creating the directory if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding record `id`.
    ///
    /// Ids become file names, so anything that could escape the storage
    /// directory is rejected.
    pub(crate) fn record_path(&self, id: &str) -> Result<PathBuf, StoreError> {
        let valid = !id.is_empty()
            && id != "."
            && id != ".."
            && !id.contains(['/', '\\', '\0']);
        if !valid {
            return Err(StoreError::InvalidId(id.to_owned()));
        }
        Ok(self.dir.join(format!("{id}.json")))
    }
}
