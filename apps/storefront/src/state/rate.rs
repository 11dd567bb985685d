//! # Exchange Rate State
//!
//! Caches the current USD→Bs rate so every cart read does not hit the
//! database. The cache is refreshed on every successful `set`.
//!
//! If the database has no rate yet, or cannot be read at startup, the
//! configured fallback rate is used.

use std::sync::{PoisonError, RwLock};

use tracing::{info, warn};

use atelier_core::{RateRecord, UsdRate};
use atelier_db::Database;

use crate::error::ApiError;

/// Setter recorded when the caller does not name one.
pub const DEFAULT_RATE_SETTER: &str = "Admin";

#[derive(Debug)]
pub struct RateState {
    db: Database,
    current: RwLock<UsdRate>,
}

impl RateState {
    /// Reads the current rate, falling back to `fallback`.
    pub async fn load(db: Database, fallback: UsdRate) -> Self {
        let current = match db.rates().current().await {
            Ok(Some(record)) => match record.usd_rate() {
                Ok(rate) => {
                    info!(rate = rate.value(), "Loaded current USD rate");
                    rate
                }
                Err(e) => {
                    warn!(error = %e, "Stored USD rate is invalid, using fallback");
                    fallback
                }
            },
            Ok(None) => {
                info!(rate = fallback.value(), "No USD rate set yet, using fallback");
                fallback
            }
            Err(e) => {
                warn!(error = %e, "Failed to load USD rate, using fallback");
                fallback
            }
        };

        RateState {
            db,
            current: RwLock::new(current),
        }
    }

    /// The rate prices are converted at.
    pub fn current(&self) -> UsdRate {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records a new current rate.
    pub async fn set(&self, rate: f64, set_by: Option<&str>) -> Result<RateRecord, ApiError> {
        let record = RateRecord::new_current(rate, set_by.unwrap_or(DEFAULT_RATE_SETTER))?;
        let saved = self.db.rates().set_current(&record).await?;

        let validated = saved.usd_rate()?;
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = validated;

        Ok(saved)
    }

    /// Most recent rate changes first.
    pub async fn history(&self, limit: u32) -> Result<Vec<RateRecord>, ApiError> {
        Ok(self.db.rates().history(limit).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_db::DbConfig;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_empty_database_uses_fallback() {
        let rates = RateState::load(test_db().await, UsdRate::new(42.0).unwrap()).await;
        assert_eq!(rates.current().value(), 42.0);
    }

    #[tokio::test]
    async fn test_unreadable_database_uses_fallback() {
        let db = test_db().await;
        db.close().await;

        let rates = RateState::load(db, UsdRate::default()).await;
        assert_eq!(rates.current(), UsdRate::default());
    }

    #[tokio::test]
    async fn test_set_updates_cache_and_persists() {
        let db = test_db().await;
        let rates = RateState::load(db.clone(), UsdRate::default()).await;

        let record = rates.set(38.1, None).await.unwrap();

        assert_eq!(record.set_by.as_deref(), Some("Admin"));
        assert!(record.is_current);
        assert_eq!(rates.current().value(), 38.1);

        let reloaded = RateState::load(db, UsdRate::default()).await;
        assert_eq!(reloaded.current().value(), 38.1);
    }

    #[tokio::test]
    async fn test_set_rejects_invalid_rate() {
        let rates = RateState::load(test_db().await, UsdRate::default()).await;

        assert!(rates.set(0.0, Some("Ana")).await.is_err());
        assert!(rates.set(f64::NAN, Some("Ana")).await.is_err());
        assert_eq!(rates.current(), UsdRate::default());
    }

    #[tokio::test]
    async fn test_history_is_most_recent_first() {
        let rates = RateState::load(test_db().await, UsdRate::default()).await;
        rates.set(36.0, Some("Ana")).await.unwrap();
        rates.set(37.0, Some("Luis")).await.unwrap();

        let history = rates.history(50).await.unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].rate, 37.0);
        assert!(history[0].is_current);
        assert!(!history[1].is_current);
    }
}
