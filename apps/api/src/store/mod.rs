//! Local persistence. The key-value layer is a seam: the resume store only
//! ever reads and writes whole string blobs by key.

use async_trait::async_trait;
use thiserror::Error;

pub mod file;
#[cfg(test)]
pub mod memory;
pub mod resumes;

pub use file::FileKeyValueStore;
#[cfg(test)]
pub use memory::MemoryKeyValueStore;
pub use resumes::ResumeStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted blob exists but cannot be parsed. Never read as empty.
    #[error("persisted collection '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize collection: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// A string-keyed blob store. Durability and atomicity are the backend's.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
}
