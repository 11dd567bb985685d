use atelier_db::Database;

use super::{CartStorage, StorageResult};

/// Documents in the `kv_store` table.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    db: Database,
}

impl SqliteStorage {
    pub fn new(db: Database) -> Self {
        SqliteStorage { db }
    }
}

impl CartStorage for SqliteStorage {
    async fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.db.kv().get(key).await?)
    }

    async fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        Ok(self.db.kv().set(key, value).await?)
    }
}
