//! # Cart Commands
//!
//! Commands for cart manipulation. Each one reaches the cart through the
//! enclosing [`CartProvider`](crate::state::CartProvider) scope.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Sidebar  │────►│ WhatsApp │       │
//! │  │  Cart    │     │          │     │  Open    │     │  Order   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   add_to_cart       checkout_link                      │
//! │                   update_cart_item                                      │
//! │                   remove_from_cart                                      │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use atelier_core::checkout;
use atelier_core::validation::validate_line_item;
use atelier_core::{
    CartAction, CartState, CartTotals, LineItem, QuantityUpdate, UsdRate, ValidationError,
    VariantRef, MAX_ITEM_QUANTITY,
};

use crate::error::ApiError;
use crate::state::{try_use_cart, RateState, StorefrontConfig};

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<LineItem>,
    pub is_open: bool,
    pub totals: CartTotals,
}

impl CartResponse {
    fn new(state: CartState, rate: UsdRate) -> Self {
        let totals = CartTotals::new(&state, rate);
        CartResponse {
            items: state.items,
            is_open: state.is_open,
            totals,
        }
    }
}

/// Everything needed to hand the order off to WhatsApp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    /// `https://wa.me/...` link with the message pre-filled.
    pub url: String,

    /// The message itself, for display.
    pub message: String,
}

/// Target of `update_cart_item` / `remove_from_cart`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRequest {
    pub id: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl From<CartItemRequest> for VariantRef {
    fn from(req: CartItemRequest) -> Self {
        VariantRef {
            id: req.id,
            size: req.size,
            color: req.color,
        }
    }
}

fn dispatch(rates: &RateState, action: CartAction) -> Result<CartResponse, ApiError> {
    let cart = try_use_cart()?;
    let state = cart.dispatch(action);
    Ok(CartResponse::new(state, rates.current()))
}

/// Gets the current cart contents.
pub fn get_cart(rates: &RateState) -> Result<CartResponse, ApiError> {
    debug!("get_cart command");
    let cart = try_use_cart()?;
    Ok(CartResponse::new(cart.state(), rates.current()))
}

/// Adds an item to the cart.
///
/// ## Behavior
/// - Same product, size and color already in cart: quantity increases
/// - Otherwise: appended as a new slot
/// - Name, price and image are frozen as given
///
/// ## Validation
/// Rejected before dispatch: empty id or name, quantity outside 1..=999,
/// negative or non-finite price.
pub fn add_to_cart(rates: &RateState, item: LineItem) -> Result<CartResponse, ApiError> {
    debug!(id = %item.id, quantity = item.quantity, "add_to_cart command");
    validate_line_item(&item)?;
    dispatch(rates, CartAction::AddItem(item))
}

/// Sets the quantity of one slot. `0` removes it.
pub fn update_cart_item(
    rates: &RateState,
    item: CartItemRequest,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(id = %item.id, quantity, "update_cart_item command");

    if !(0..=MAX_ITEM_QUANTITY).contains(&quantity) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".into(),
            min: 0,
            max: MAX_ITEM_QUANTITY,
        }
        .into());
    }

    dispatch(
        rates,
        CartAction::UpdateQuantity(QuantityUpdate::new(item.into(), quantity)),
    )
}

/// Removes one slot.
pub fn remove_from_cart(rates: &RateState, item: CartItemRequest) -> Result<CartResponse, ApiError> {
    debug!(id = %item.id, "remove_from_cart command");
    dispatch(rates, CartAction::RemoveItem(item.into()))
}

/// Empties the cart.
pub fn clear_cart(rates: &RateState) -> Result<CartResponse, ApiError> {
    debug!("clear_cart command");
    dispatch(rates, CartAction::ClearCart)
}

/// Flips the sidebar.
pub fn toggle_cart(rates: &RateState) -> Result<CartResponse, ApiError> {
    debug!("toggle_cart command");
    dispatch(rates, CartAction::ToggleCart)
}

/// Opens or closes the sidebar.
pub fn set_cart_open(rates: &RateState, open: bool) -> Result<CartResponse, ApiError> {
    debug!(open, "set_cart_open command");
    dispatch(rates, CartAction::SetCartOpen(open))
}

/// Applies an action given as JSON, `{"type": ..., "payload": ...}`.
///
/// Unknown or malformed actions leave the cart unchanged.
pub fn dispatch_raw_action(
    rates: &RateState,
    action: &serde_json::Value,
) -> Result<CartResponse, ApiError> {
    debug!("dispatch_raw_action command");
    let cart = try_use_cart()?;
    let state = cart.dispatch_raw(action);
    Ok(CartResponse::new(state, rates.current()))
}

/// Builds the WhatsApp order link for the current cart.
pub fn checkout_link(
    rates: &RateState,
    config: &StorefrontConfig,
) -> Result<CheckoutResponse, ApiError> {
    debug!("checkout_link command");
    let cart = try_use_cart()?;
    let state = cart.state();
    let rate = rates.current();

    let message = checkout::order_message(&state, rate)?;
    let url = checkout::checkout_link(&state, rate, &config.whatsapp_number)?;

    Ok(CheckoutResponse { url, message })
}
