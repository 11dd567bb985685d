//! # Exchange Rate Repository
//!
//! Storage for the administrator-set USD→Bs rate.
//!
//! ## Setting a Rate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  set_current(38.1, "Admin")                                         │
//! │                                                                     │
//! │  BEGIN                                                              │
//! │    UPDATE usd_rate_history SET is_current = 0 WHERE is_current = 1  │
//! │    INSERT new row with is_current = 1                               │
//! │  COMMIT                                                             │
//! │                                                                     │
//! │  Both statements share one transaction, so readers never observe   │
//! │  zero or two current rates.                                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use atelier_core::RateRecord;

/// Repository for the `usd_rate_history` table.
#[derive(Debug, Clone)]
pub struct RateRepository {
    pool: SqlitePool,
}

impl RateRepository {
    /// Creates a new RateRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RateRepository { pool }
    }

    /// Gets the current rate record, if one has ever been set.
    pub async fn current(&self) -> DbResult<Option<RateRecord>> {
        let record = sqlx::query_as::<_, RateRecord>(
            r#"
            SELECT id, rate, set_by, created_at, is_current
            FROM usd_rate_history
            WHERE is_current = 1
            ORDER BY created_at DESC, rowid DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Lists rate records, most recent first.
    pub async fn history(&self, limit: u32) -> DbResult<Vec<RateRecord>> {
        let records = sqlx::query_as::<_, RateRecord>(
            r#"
            SELECT id, rate, set_by, created_at, is_current
            FROM usd_rate_history
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = records.len(), "Loaded rate history");
        Ok(records)
    }

    /// Makes `record` the current rate.
    ///
    /// ## Arguments
    /// * `record` - New record, normally from `RateRecord::new_current`
    pub async fn set_current(&self, record: &RateRecord) -> DbResult<RateRecord> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        sqlx::query("UPDATE usd_rate_history SET is_current = 0 WHERE is_current = 1")
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO usd_rate_history (id, rate, set_by, created_at, is_current)
            VALUES (?1, ?2, ?3, ?4, 1)
            "#,
        )
        .bind(&record.id)
        .bind(record.rate)
        .bind(&record.set_by)
        .bind(record.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(rate = record.rate, set_by = ?record.set_by, "USD rate updated");

        Ok(RateRecord {
            is_current: true,
            ..record.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};
    use atelier_core::RateRecord;

    #[tokio::test]
    async fn test_no_current_rate_initially() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.rates().current().await.unwrap().is_none());
        assert!(db.rates().history(50).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_current_replaces_previous() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let rates = db.rates();

        let first = RateRecord::new_current(36.5, "Admin").unwrap();
        let second = RateRecord::new_current(38.1, "Maria").unwrap();
        rates.set_current(&first).await.unwrap();
        rates.set_current(&second).await.unwrap();

        let current = rates.current().await.unwrap().unwrap();
        assert_eq!(current.id, second.id);
        assert_eq!(current.rate, 38.1);

        let history = rates.history(50).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.iter().filter(|r| r.is_current).count(), 1);
        assert_eq!(history[0].id, second.id);
    }

    #[tokio::test]
    async fn test_history_respects_limit() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        for rate in [30.0, 31.0, 32.0] {
            let record = RateRecord::new_current(rate, "Admin").unwrap();
            db.rates().set_current(&record).await.unwrap();
        }

        assert_eq!(db.rates().history(2).await.unwrap().len(), 2);
    }
}
