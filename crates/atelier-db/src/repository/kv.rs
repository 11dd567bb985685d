//! # Key/Value Repository
//!
//! String documents addressed by key, the SQLite equivalent of browser
//! `localStorage`. The cart store writes its whole document under one key
//! on every item change, so `set` is an upsert.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for the `kv_store` table.
#[derive(Debug, Clone)]
pub struct KvRepository {
    pool: SqlitePool,
}

impl KvRepository {
    /// Creates a new KvRepository.
    pub fn new(pool: SqlitePool) -> Self {
        KvRepository { pool }
    }

    /// Reads the document stored under `key`.
    ///
    /// ## Returns
    /// * `Ok(Some(value))` - Key present
    /// * `Ok(None)` - Key never written
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    /// Writes `value` under `key`, replacing any previous document.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, bytes = value.len(), "Writing kv document");

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_get_missing_key() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert_eq!(db.kv().get("cartState_v1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_overwrite() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let kv = db.kv();

        kv.set("cartState_v1", "first").await.unwrap();
        kv.set("cartState_v1", "second").await.unwrap();

        assert_eq!(kv.get("cartState_v1").await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let kv = db.kv();

        kv.set("cartState_v1", "cart").await.unwrap();
        kv.set("cartState_v2", "other").await.unwrap();

        assert_eq!(kv.get("cartState_v1").await.unwrap().as_deref(), Some("cart"));
        assert_eq!(kv.get("cartState_v2").await.unwrap().as_deref(), Some("other"));
    }
}
