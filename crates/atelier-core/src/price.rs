//! # Price Module
//!
//! The storefront's price union, the USD→Bs exchange rate and the display
//! formatting used by the cart and the checkout message.
//!
//! ## Two Price Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Products arrive from the catalog with either shape:                    │
//! │                                                                         │
//! │    "price": 20                        → Price::Scalar(20.0)            │
//! │    "price": { "usd": 50, "bs": 7500 } → Price::UsdBs { usd, bs }        │
//! │                                                                         │
//! │  Arithmetic ALWAYS goes through Price::usd():                          │
//! │    Scalar(x)          → x                                               │
//! │    UsdBs { usd, .. }  → usd   (the stored bs value is display-only)    │
//! │                                                                         │
//! │  Bs amounts shown to customers are derived from the CURRENT rate,      │
//! │  never from the bs value frozen into the product.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::DEFAULT_USD_RATE;

// =============================================================================
// Price
// =============================================================================

/// A product price as the catalog stores it.
///
/// Serialized untagged, so both `20` and `{"usd": 20, "bs": 3000}` are
/// accepted and written back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum Price {
    /// A plain USD amount.
    Scalar(f64),

    /// A USD amount with a Bs amount captured when the product was priced.
    UsdBs { usd: f64, bs: f64 },
}

impl Price {
    /// Returns the USD amount used for all arithmetic.
    ///
    /// ## Example
    /// ```rust
    /// use atelier_core::price::Price;
    ///
    /// assert_eq!(Price::Scalar(20.0).usd(), 20.0);
    /// assert_eq!(Price::UsdBs { usd: 50.0, bs: 7500.0 }.usd(), 50.0);
    /// ```
    #[inline]
    pub fn usd(&self) -> f64 {
        match *self {
            Price::Scalar(amount) => amount,
            Price::UsdBs { usd, .. } => usd,
        }
    }
}

impl From<f64> for Price {
    fn from(amount: f64) -> Self {
        Price::Scalar(amount)
    }
}

impl Default for Price {
    fn default() -> Self {
        Price::Scalar(0.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_usd(self.usd()))
    }
}

// =============================================================================
// Exchange Rate
// =============================================================================

/// Bolivars per US dollar.
///
/// ## Invariant
/// Always finite and strictly positive; the only way in is [`UsdRate::new`]
/// (or the default fallback).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, TS)]
#[ts(export)]
pub struct UsdRate(f64);

impl UsdRate {
    /// Creates a rate, rejecting zero, negative and non-finite values.
    pub fn new(rate: f64) -> CoreResult<Self> {
        if rate.is_finite() && rate > 0.0 {
            Ok(UsdRate(rate))
        } else {
            Err(CoreError::InvalidRate(rate))
        }
    }

    /// Returns the raw rate.
    #[inline]
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Converts a USD amount to Bs, rounded to cents.
    ///
    /// ## Example
    /// ```rust
    /// use atelier_core::price::UsdRate;
    ///
    /// let rate = UsdRate::new(36.5).unwrap();
    /// assert_eq!(rate.convert(10.0), 365.0);
    /// ```
    pub fn convert(&self, usd: f64) -> f64 {
        (usd * self.0 * 100.0).round() / 100.0
    }
}

impl Default for UsdRate {
    fn default() -> Self {
        UsdRate(DEFAULT_USD_RATE)
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Splits an amount into (negative, whole, cents) after rounding to cents.
fn split_cents(amount: f64) -> (bool, u64, u64) {
    let cents = (amount * 100.0).round();
    let negative = cents < 0.0;
    let cents = cents.abs() as u64;
    (negative, cents / 100, cents % 100)
}

/// Inserts `sep` between every group of three digits.
fn group_thousands(whole: u64, sep: char) -> String {
    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}

/// Formats a USD amount as `$1234.50`.
///
/// ## Example
/// ```rust
/// use atelier_core::price::format_usd;
///
/// assert_eq!(format_usd(20.0), "$20.00");
/// assert_eq!(format_usd(-5.5), "-$5.50");
/// ```
pub fn format_usd(amount: f64) -> String {
    let (negative, whole, cents) = split_cents(amount);
    format!(
        "{}${}.{:02}",
        if negative { "-" } else { "" },
        whole,
        cents
    )
}

/// Formats a Bs amount Venezuelan style: `7.500,00`.
///
/// ## Example
/// ```rust
/// use atelier_core::price::format_bs;
///
/// assert_eq!(format_bs(7500.0), "7.500,00");
/// assert_eq!(format_bs(1234567.891), "1.234.567,89");
/// ```
pub fn format_bs(amount: f64) -> String {
    let (negative, whole, cents) = split_cents(amount);
    format!(
        "{}{},{:02}",
        if negative { "-" } else { "" },
        group_thousands(whole, '.'),
        cents
    )
}

/// Formats a price in USD.
pub fn format_price(price: &Price) -> String {
    format_usd(price.usd())
}

/// Formats a price in USD followed by its Bs equivalent at `rate`.
///
/// ## Example
/// ```rust
/// use atelier_core::price::{format_price_with_bs, Price, UsdRate};
///
/// let rate = UsdRate::new(150.0).unwrap();
/// assert_eq!(
///     format_price_with_bs(&Price::Scalar(20.0), rate),
///     "$20.00 (Bs. 3.000,00)"
/// );
/// ```
pub fn format_price_with_bs(price: &Price, rate: UsdRate) -> String {
    let usd = price.usd();
    format!("{} (Bs. {})", format_usd(usd), format_bs(usd * rate.value()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_deserializes_both_shapes() {
        let scalar: Price = serde_json::from_str("20").unwrap();
        assert_eq!(scalar, Price::Scalar(20.0));

        let pair: Price = serde_json::from_str(r#"{"usd":50,"bs":7500}"#).unwrap();
        assert_eq!(pair, Price::UsdBs { usd: 50.0, bs: 7500.0 });
        assert_eq!(pair.usd(), 50.0);
    }

    #[test]
    fn test_price_serializes_untagged() {
        assert_eq!(serde_json::to_string(&Price::Scalar(12.5)).unwrap(), "12.5");
        let json = serde_json::to_value(Price::UsdBs { usd: 1.0, bs: 36.0 }).unwrap();
        assert_eq!(json, serde_json::json!({"usd": 1.0, "bs": 36.0}));
    }

    #[test]
    fn test_rate_rejects_bad_values() {
        assert!(UsdRate::new(0.0).is_err());
        assert!(UsdRate::new(-3.0).is_err());
        assert!(UsdRate::new(f64::NAN).is_err());
        assert!(UsdRate::new(f64::INFINITY).is_err());
        assert_eq!(UsdRate::new(36.2).unwrap().value(), 36.2);
        assert_eq!(UsdRate::default().value(), DEFAULT_USD_RATE);
    }

    #[test]
    fn test_rate_convert_rounds_to_cents() {
        let rate = UsdRate::new(36.537).unwrap();
        assert_eq!(rate.convert(1.0), 36.54);
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(19.999), "$20.00");
        assert_eq!(format_usd(1234.5), "$1234.50");
        assert_eq!(format_usd(-0.001), "$0.00");
    }

    #[test]
    fn test_format_bs_grouping() {
        assert_eq!(format_bs(0.5), "0,50");
        assert_eq!(format_bs(999.0), "999,00");
        assert_eq!(format_bs(1000.0), "1.000,00");
        assert_eq!(format_bs(-2500.25), "-2.500,25");
    }

    #[test]
    fn test_format_price_uses_usd_field() {
        let price = Price::UsdBs { usd: 50.0, bs: 1.0 };
        assert_eq!(format_price(&price), "$50.00");
        assert_eq!(price.to_string(), "$50.00");
    }
}
