use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{CartStorage, StorageResult};

/// Process-local storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // A panicked writer cannot leave a half-written String behind.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Synchronous read, for inspection.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    /// Synchronous write, for seeding.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries().insert(key.into(), value.into());
    }
}

impl CartStorage for MemoryStorage {
    async fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.get(key))
    }

    async fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        self.insert(key, value);
        Ok(())
    }
}
