//! # atelier-core: Pure Business Logic for the Atelier Storefront
//!
//! This crate holds the cart state machine and everything it needs to be
//! useful: the price union, variant matching, checkout message building and
//! validation. It performs no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Atelier Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Web storefront / shell                         │   │
//! │  │   Product card ──► Product detail ──► Cart sidebar ──► Checkout │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            Cart store (apps/storefront)                         │   │
//! │  │    dispatch, subscribe, persistence writer, provider scope      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ atelier-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   price   │  │  variant  │  │   cart    │  │ checkout  │  │   │
//! │  │   │  Price    │  │ VariantRef│  │  reduce   │  │ WhatsApp  │  │   │
//! │  │   │  UsdRate  │  │   norm    │  │ CartState │  │  message  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - Line items, cart state, actions and the reducer
//! - [`variant`] - Variant identity (id + size + color)
//! - [`price`] - Price union, exchange rate and display formatting
//! - [`rate`] - Exchange-rate history records
//! - [`checkout`] - Order message and WhatsApp link
//! - [`validation`] - Input validation for command payloads
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use atelier_core::cart::{reduce, CartAction, CartState, LineItem};
//!
//! let shirt = LineItem::new("p1", "Shirt", 20.0, 1).with_selected_size("M");
//! let state = reduce(&CartState::default(), &CartAction::AddItem(shirt.clone()));
//! let state = reduce(&state, &CartAction::AddItem(shirt.with_quantity(2)));
//!
//! assert_eq!(state.items.len(), 1);
//! assert_eq!(state.items[0].quantity, 3);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod price;
pub mod rate;
pub mod validation;
pub mod variant;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{reduce, CartAction, CartState, CartTotals, LineItem, QuantityUpdate};
pub use error::{CoreError, CoreResult, ValidationError};
pub use price::{Price, UsdRate};
pub use rate::RateRecord;
pub use variant::VariantRef;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key the cart document lives under.
///
/// The `_v1` suffix is part of the key; a future incompatible document shape
/// gets a new key instead of a migration.
pub const CART_STORAGE_KEY: &str = "cartState_v1";

/// Maximum quantity a single add or update may carry.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Bs-per-USD rate used until an administrator sets one.
pub const DEFAULT_USD_RATE: f64 = 150.0;

/// WhatsApp number orders are sent to (international format, digits only).
pub const DEFAULT_WHATSAPP_NUMBER: &str = "584249539367";

/// Number of rate history entries returned by default.
pub const DEFAULT_RATE_HISTORY_LIMIT: u32 = 50;
