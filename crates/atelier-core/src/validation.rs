//! # Validation Module
//!
//! Input validation for payloads that come from outside the core.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront UI                                                │
//! │  └── Size/color pickers, quantity steppers                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Commands (storefront app)                                    │
//! │  └── THIS MODULE: reject malformed payloads with a typed error         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Reducer                                                      │
//! │  └── Total. Accepts anything that type-checks, never errors            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use atelier_core::validation::{validate_quantity, validate_product_id};
//!
//! validate_product_id("p1").unwrap();
//! validate_quantity(5).unwrap();
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::cart::LineItem;
use crate::error::ValidationError;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product identifier: non-empty after trimming, at most 100
/// characters.
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a WhatsApp number: digits only, 8 to 15 of them (E.164 without
/// the leading `+`).
pub fn validate_whatsapp_number(number: &str) -> ValidationResult<()> {
    if number.is_empty() {
        return Err(ValidationError::Required {
            field: "whatsapp_number".to_string(),
        });
    }

    if !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "whatsapp_number".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    if !(8..=15).contains(&number.len()) {
        return Err(ValidationError::OutOfRange {
            field: "whatsapp_number length".to_string(),
            min: 8,
            max: 15,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity for an add or an explicit update.
///
/// ## Rules
/// - 1 to [`MAX_ITEM_QUANTITY`]
///
/// Updates to zero are removals and should be sent as such; the reducer
/// still accepts them.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if !(1..=MAX_ITEM_QUANTITY).contains(&quantity) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }
    Ok(())
}

/// Validates a USD unit price: finite and not negative.
pub fn validate_price(usd: f64) -> ValidationResult<()> {
    if !usd.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if usd < 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a line item before it is dispatched as `ADD_ITEM`.
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    validate_product_id(&item.id)?;
    validate_product_name(&item.name)?;
    validate_price(item.price.usd())?;
    validate_quantity(item.quantity)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
