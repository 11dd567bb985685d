//! # Exchange Rate Records
//!
//! The storefront shows every price in USD and in bolivars. The USD→Bs rate
//! is set by hand from the admin panel; each change appends a record and
//! exactly one record is current at a time.
//!
//! ```text
//! usd_rate_history
//! ┌──────────┬────────┬─────────┬──────────────────────┬────────────┐
//! │ id       │ rate   │ set_by  │ created_at           │ is_current │
//! ├──────────┼────────┼─────────┼──────────────────────┼────────────┤
//! │ 3f2a...  │ 36.50  │ Admin   │ 2026-10-01T12:00:00Z │ 0          │
//! │ 9c41...  │ 38.10  │ Admin   │ 2026-10-14T09:30:00Z │ 1  ◄── used │
//! └──────────┴────────┴─────────┴──────────────────────┴────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreResult;
use crate::price::UsdRate;

/// One entry of the exchange-rate history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RateRecord {
    /// UUID v4.
    pub id: String,

    /// Bs per USD.
    pub rate: f64,

    /// Who set it ("Admin" unless stated).
    pub set_by: Option<String>,

    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,

    pub is_current: bool,
}

impl RateRecord {
    /// Creates a new current record, validating the rate.
    pub fn new_current(rate: f64, set_by: impl Into<String>) -> CoreResult<Self> {
        let rate = UsdRate::new(rate)?;
        Ok(RateRecord {
            id: Uuid::new_v4().to_string(),
            rate: rate.value(),
            set_by: Some(set_by.into()),
            created_at: Utc::now(),
            is_current: true,
        })
    }

    /// The record's rate as a validated [`UsdRate`].
    pub fn usd_rate(&self) -> CoreResult<UsdRate> {
        UsdRate::new(self.rate)
    }
}
