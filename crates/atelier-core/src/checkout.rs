//! # Checkout Hand-off
//!
//! Orders are not placed through a payment flow: the cart is turned into a
//! plain-text order message and handed to WhatsApp, where the shop confirms
//! stock and payment by hand.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartState ──► order_message(state, rate) ──► "Hola, quiero hacer..."   │
//! │                                                    │                    │
//! │                                                    ▼                    │
//! │                 checkout_link(state, rate, number)                      │
//! │                                                    │                    │
//! │                                                    ▼                    │
//! │          https://wa.me/584249539367?text=Hola%2C%20quiero%20hacer...    │
//! │                                                                         │
//! │  A failed hand-off is not retried; the customer simply sends again.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

use crate::cart::{CartState, LineItem};
use crate::error::{CoreError, CoreResult};
use crate::price::{format_bs, format_usd, UsdRate};
use crate::validation::validate_whatsapp_number;

const GREETING: &str = "Hola, quiero hacer el siguiente pedido:";
const CLOSING: &str = "¿Podrían confirmar disponibilidad y método de pago?";
const WHATSAPP_BASE: &str = "https://wa.me/";

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`, the set
/// `encodeURIComponent` escapes. Spaces become `%20`, never `+`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Formats one cart line: `2x Shirt (Talla: M) (Color: Red) - $40.00`.
///
/// Size and color are left out when absent or empty.
pub fn order_line(item: &LineItem) -> String {
    let mut line = format!("{}x {}", item.quantity, item.name);
    if let Some(size) = item.effective_size().filter(|s| !s.is_empty()) {
        line.push_str(&format!(" (Talla: {})", size));
    }
    if let Some(color) = item.effective_color().filter(|c| !c.is_empty()) {
        line.push_str(&format!(" (Color: {})", color));
    }
    line.push_str(&format!(" - {}", format_usd(item.line_total_usd())));
    line
}

/// Builds the customer-facing order message.
///
/// ## Errors
/// `CoreError::EmptyCart` when there is nothing to order.
pub fn order_message(state: &CartState, rate: UsdRate) -> CoreResult<String> {
    if state.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    let lines: Vec<String> = state.items.iter().map(order_line).collect();
    let total_usd = state.total_usd();

    Ok(format!(
        "{}\n\n{}\n\nTotal: {} USD (Bs. {})\n\n{}",
        GREETING,
        lines.join("\n"),
        format_usd(total_usd),
        format_bs(total_usd * rate.value()),
        CLOSING
    ))
}

/// Builds the `wa.me` link that opens a chat with the order pre-filled.
///
/// ## Errors
/// - `CoreError::EmptyCart` for an empty cart
/// - `CoreError::Validation` for a malformed number
pub fn checkout_link(state: &CartState, rate: UsdRate, number: &str) -> CoreResult<String> {
    validate_whatsapp_number(number)?;
    let message = order_message(state, rate)?;

    let link = format!(
        "{}{}?text={}",
        WHATSAPP_BASE,
        number,
        utf8_percent_encode(&message, URI_COMPONENT)
    );

    // Returned as built: re-serializing through Url would escape `'`.
    Url::parse(&link).map_err(|e| CoreError::InvalidCheckoutLink(e.to_string()))?;
    Ok(link)
}
