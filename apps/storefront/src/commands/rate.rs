//! # Exchange Rate Commands
//!
//! Reading and setting the USD→Bs rate from the admin panel.

use serde::{Deserialize, Serialize};
use tracing::debug;

use atelier_core::{RateRecord, DEFAULT_RATE_HISTORY_LIMIT};

use crate::error::ApiError;
use crate::state::RateState;

/// Largest history page a caller may ask for.
const MAX_HISTORY_LIMIT: u32 = 500;

/// Current rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateResponse {
    pub rate: f64,
}

/// Gets the rate prices are currently converted at.
pub fn get_usd_rate(rates: &RateState) -> RateResponse {
    debug!("get_usd_rate command");
    RateResponse {
        rate: rates.current().value(),
    }
}

/// Sets a new current rate.
///
/// ## Arguments
/// * `rate` - Bs per USD, must be positive
/// * `set_by` - Who made the change (default: "Admin")
pub async fn set_usd_rate(
    rates: &RateState,
    rate: f64,
    set_by: Option<String>,
) -> Result<RateRecord, ApiError> {
    debug!(rate, "set_usd_rate command");
    rates.set(rate, set_by.as_deref()).await
}

/// Lists recent rate changes, newest first.
///
/// ## Arguments
/// * `limit` - Max records (default: 50, capped at 500)
pub async fn get_rate_history(
    rates: &RateState,
    limit: Option<u32>,
) -> Result<Vec<RateRecord>, ApiError> {
    let limit = limit
        .unwrap_or(DEFAULT_RATE_HISTORY_LIMIT)
        .min(MAX_HISTORY_LIMIT);
    debug!(limit, "get_rate_history command");
    rates.history(limit).await
}
