//! # Cart Storage
//!
//! Durable key/value storage for the cart document.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      CartStorage implementations                        │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐  │
//! │  │  MemoryStorage   │  │   FileStorage    │  │    SqliteStorage     │  │
//! │  │                  │  │                  │  │                      │  │
//! │  │  HashMap behind  │  │  <dir>/<key>.json│  │  kv_store table via  │  │
//! │  │  a Mutex; lost   │  │  written via temp│  │  atelier-db          │  │
//! │  │  on exit         │  │  file + rename   │  │                      │  │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────────┘  │
//! │                                                                         │
//! │  StorageBackend wraps whichever one the config selects.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Failures here are never shown to a shopper: the persistence adapter logs
//! them and carries on with an in-memory cart.

mod file;
mod memory;
mod sqlite;

use std::future::Future;

use thiserror::Error;

use atelier_db::DbError;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

/// Storage backend failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// File backend I/O failed (permissions, disk full, ...).
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// SQLite backend failed.
    #[error("Storage database error: {0}")]
    Database(#[from] DbError),

    /// The backend refused the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// String documents by key.
///
/// Implementations must be usable from the background writer task, hence
/// `Send + Sync + 'static` and `Send` futures.
pub trait CartStorage: Send + Sync + 'static {
    /// Reads the document under `key`; `Ok(None)` when never written.
    fn read(&self, key: &str) -> impl Future<Output = StorageResult<Option<String>>> + Send;

    /// Replaces the document under `key`.
    fn write(&self, key: &str, value: &str) -> impl Future<Output = StorageResult<()>> + Send;
}

/// The storage backend selected at startup.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    Memory(MemoryStorage),
    File(FileStorage),
    Sqlite(SqliteStorage),
}

impl StorageBackend {
    /// Backend name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            StorageBackend::Memory(_) => "memory",
            StorageBackend::File(_) => "file",
            StorageBackend::Sqlite(_) => "sqlite",
        }
    }
}

impl CartStorage for StorageBackend {
    async fn read(&self, key: &str) -> StorageResult<Option<String>> {
        match self {
            StorageBackend::Memory(s) => s.read(key).await,
            StorageBackend::File(s) => s.read(key).await,
            StorageBackend::Sqlite(s) => s.read(key).await,
        }
    }

    async fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        match self {
            StorageBackend::Memory(s) => s.write(key, value).await,
            StorageBackend::File(s) => s.write(key, value).await,
            StorageBackend::Sqlite(s) => s.write(key, value).await,
        }
    }
}
