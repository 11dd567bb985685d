//! # Storefront Shell
//!
//! A line-oriented front end over the commands, for operating the cart and
//! the exchange rate from a terminal.
//!
//! ```text
//! > add id=p1 name="Camisa azul" price=20 size=M
//! Cart (1 slot, sidebar closed)
//!   1x Camisa azul (Talla: M) - $20.00
//! Total: $20.00 (Bs. 3.000,00)
//! > rate set 36.5 by=Ana
//! Rate set to Bs. 36,50 per USD by Ana
//! > quit
//! ```

use std::collections::HashMap;
use std::str::FromStr;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use atelier_core::checkout::order_line;
use atelier_core::price::{format_bs, format_usd};
use atelier_core::{LineItem, Price, RateRecord};

use crate::commands::cart::{
    add_to_cart, checkout_link, clear_cart, dispatch_raw_action, get_cart, remove_from_cart,
    set_cart_open, toggle_cart, update_cart_item, CartItemRequest, CartResponse,
};
use crate::commands::rate::{get_rate_history, get_usd_rate, set_usd_rate};
use crate::error::ApiError;
use crate::state::{RateState, StorefrontConfig, DEFAULT_RATE_SETTER};

const HELP: &str = "\
Commands:
  cart                                         show the cart
  add id=<id> name=<name> price=<usd> [qty=<n>] [size=<s>] [color=<c>] [image=<url>]
  add id=<id> name=<name> usd=<usd> bs=<bs> ...  add with a USD/Bs price pair
  qty id=<id> [size=<s>] [color=<c>] qty=<n>   set a slot's quantity (0 removes)
  remove id=<id> [size=<s>] [color=<c>]        remove a slot
  clear                                        empty the cart
  toggle | open | close                        sidebar visibility
  raw <json>                                   dispatch {\"type\": ..., \"payload\": ...}
  checkout                                     WhatsApp order link
  rate                                         current USD rate
  rate set <rate> [by=<name>]                  set the USD rate
  rate history [limit]                         recent rate changes
  help                                         this text
  quit                                         leave
Quote values containing spaces: name=\"Camisa azul\"";

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Cart,
    Add(LineItem),
    Quantity { item: CartItemRequest, quantity: i64 },
    Remove(CartItemRequest),
    Clear,
    Toggle,
    Open,
    Close,
    Raw(serde_json::Value),
    Checkout,
    Rate,
    SetRate { rate: f64, set_by: Option<String> },
    RateHistory { limit: Option<u32> },
    Help,
    Quit,
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses one input line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, ApiError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match word.to_lowercase().as_str() {
        "cart" | "show" => ShellCommand::Cart,
        "add" => ShellCommand::Add(Args::parse(rest)?.line_item()?),
        "qty" => {
            let args = Args::parse(rest)?;
            ShellCommand::Quantity {
                item: args.item()?,
                quantity: args.number("qty")?.ok_or_else(|| missing("qty"))?,
            }
        }
        "remove" | "rm" => ShellCommand::Remove(Args::parse(rest)?.item()?),
        "clear" => ShellCommand::Clear,
        "toggle" => ShellCommand::Toggle,
        "open" => ShellCommand::Open,
        "close" => ShellCommand::Close,
        "raw" => ShellCommand::Raw(
            serde_json::from_str(rest)
                .map_err(|e| ApiError::validation(format!("invalid JSON action: {}", e)))?,
        ),
        "checkout" => ShellCommand::Checkout,
        "rate" => parse_rate(rest)?,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => {
            return Err(ApiError::validation(format!(
                "unknown command '{}', type 'help'",
                other
            )))
        }
    };

    Ok(Some(command))
}

fn parse_rate(rest: &str) -> Result<ShellCommand, ApiError> {
    let tokens = tokenize(rest)?;
    let mut tokens = tokens.iter().map(String::as_str);

    match tokens.next() {
        None => Ok(ShellCommand::Rate),
        Some("set") => {
            let rate = tokens.next().ok_or_else(|| missing("rate"))?;
            let rate = parse_value("rate", rate)?;
            let set_by = tokens
                .next()
                .map(|token| token.strip_prefix("by=").unwrap_or(token).to_string());
            Ok(ShellCommand::SetRate { rate, set_by })
        }
        Some("history") => {
            let limit = tokens
                .next()
                .map(|limit| parse_value("limit", limit))
                .transpose()?;
            Ok(ShellCommand::RateHistory { limit })
        }
        Some(other) => Err(ApiError::validation(format!(
            "unknown rate command '{}', expected set or history",
            other
        ))),
    }
}

/// Splits on whitespace, keeping double-quoted runs together.
fn tokenize(input: &str) -> Result<Vec<String>, ApiError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quotes = false;

    for ch in input.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_quotes {
        return Err(ApiError::validation("unterminated quote"));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

fn missing(field: &str) -> ApiError {
    ApiError::validation(format!("{} is required", field))
}

fn parse_value<T: FromStr>(field: &str, raw: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::validation(format!("{} has invalid value '{}'", field, raw)))
}

/// `key=value` arguments.
struct Args(HashMap<String, String>);

impl Args {
    fn parse(input: &str) -> Result<Self, ApiError> {
        let mut args = HashMap::new();
        for token in tokenize(input)? {
            let (key, value) = token.split_once('=').ok_or_else(|| {
                ApiError::validation(format!("expected key=value, got '{}'", token))
            })?;
            args.insert(key.to_lowercase(), value.to_string());
        }
        Ok(Args(args))
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    fn required(&self, key: &str) -> Result<&str, ApiError> {
        self.get(key).ok_or_else(|| missing(key))
    }

    fn number<T: FromStr>(&self, key: &str) -> Result<Option<T>, ApiError> {
        self.get(key).map(|raw| parse_value(key, raw)).transpose()
    }

    fn item(&self) -> Result<CartItemRequest, ApiError> {
        Ok(CartItemRequest {
            id: self.required("id")?.to_string(),
            size: self.get("size").map(str::to_string),
            color: self.get("color").map(str::to_string),
        })
    }

    fn line_item(&self) -> Result<LineItem, ApiError> {
        let price = match (
            self.number::<f64>("price")?,
            self.number::<f64>("usd")?,
            self.number::<f64>("bs")?,
        ) {
            (Some(usd), None, None) => Price::Scalar(usd),
            (None, Some(usd), Some(bs)) => Price::UsdBs { usd, bs },
            _ => {
                return Err(ApiError::validation(
                    "give either price=<usd> or usd=<usd> bs=<bs>",
                ))
            }
        };

        let mut item = LineItem::new(
            self.required("id")?,
            self.required("name")?,
            price,
            self.number("qty")?.unwrap_or(1),
        );
        if let Some(size) = self.get("size") {
            item = item.with_selected_size(size);
        }
        if let Some(color) = self.get("color") {
            item = item.with_selected_color(color);
        }
        if let Some(image) = self.get("image") {
            item = item.with_image(image);
        }
        Ok(item)
    }
}

// =============================================================================
// Execution
// =============================================================================

/// Runs one command and renders its result as text.
pub async fn execute(
    command: ShellCommand,
    rates: &RateState,
    config: &StorefrontConfig,
) -> Result<String, ApiError> {
    let output = match command {
        ShellCommand::Cart => render_cart(&get_cart(rates)?),
        ShellCommand::Add(item) => render_cart(&add_to_cart(rates, item)?),
        ShellCommand::Quantity { item, quantity } => {
            render_cart(&update_cart_item(rates, item, quantity)?)
        }
        ShellCommand::Remove(item) => render_cart(&remove_from_cart(rates, item)?),
        ShellCommand::Clear => render_cart(&clear_cart(rates)?),
        ShellCommand::Toggle => render_cart(&toggle_cart(rates)?),
        ShellCommand::Open => render_cart(&set_cart_open(rates, true)?),
        ShellCommand::Close => render_cart(&set_cart_open(rates, false)?),
        ShellCommand::Raw(action) => render_cart(&dispatch_raw_action(rates, &action)?),
        ShellCommand::Checkout => {
            let checkout = checkout_link(rates, config)?;
            format!("{}\n\n{}", checkout.message, checkout.url)
        }
        ShellCommand::Rate => format!("1 USD = Bs. {}", format_bs(get_usd_rate(rates).rate)),
        ShellCommand::SetRate { rate, set_by } => {
            let record = set_usd_rate(rates, rate, set_by).await?;
            format!(
                "Rate set to Bs. {} per USD by {}",
                format_bs(record.rate),
                record.set_by.as_deref().unwrap_or(DEFAULT_RATE_SETTER)
            )
        }
        ShellCommand::RateHistory { limit } => render_history(&get_rate_history(rates, limit).await?),
        ShellCommand::Help => HELP.to_string(),
        ShellCommand::Quit => String::new(),
    };
    Ok(output)
}

fn render_cart(cart: &CartResponse) -> String {
    let visibility = if cart.is_open { "open" } else { "closed" };

    if cart.items.is_empty() {
        return format!("Cart is empty (sidebar {})", visibility);
    }

    let mut out = format!(
        "Cart ({} {}, sidebar {})\n",
        cart.totals.item_count,
        if cart.totals.item_count == 1 { "slot" } else { "slots" },
        visibility
    );
    for item in &cart.items {
        out.push_str("  ");
        out.push_str(&order_line(item));
        out.push('\n');
    }
    out.push_str(&format!(
        "Total: {} (Bs. {})",
        format_usd(cart.totals.total_usd),
        format_bs(cart.totals.total_bs)
    ));
    out
}

fn render_history(records: &[RateRecord]) -> String {
    if records.is_empty() {
        return "No rate has been set yet".to_string();
    }

    records
        .iter()
        .map(|r| {
            format!(
                "{}  Bs. {:>10}  {}{}",
                r.created_at.format("%Y-%m-%d %H:%M"),
                format_bs(r.rate),
                r.set_by.as_deref().unwrap_or("-"),
                if r.is_current { "  (current)" } else { "" }
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Loop
// =============================================================================

/// Reads commands from `input` until `quit` or end of input.
///
/// Must run inside a [`CartProvider`](crate::state::CartProvider) scope.
/// Command errors are printed and the loop continues.
pub async fn run_shell<R, W>(
    input: R,
    mut output: W,
    rates: &RateState,
    config: &StorefrontConfig,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    output
        .write_all(b"Atelier storefront. Type 'help' for commands.\n")
        .await?;

    loop {
        output.write_all(b"> ").await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                output
                    .write_all(format!("error: {}\n", e.message).as_bytes())
                    .await?;
                continue;
            }
        };

        if command == ShellCommand::Quit {
            break;
        }

        debug!(?command, "Shell command");
        let text = match execute(command, rates, config).await {
            Ok(text) => text,
            Err(e) => format!("error: {}", e.message),
        };
        output.write_all(text.as_bytes()).await?;
        output.write_all(b"\n").await?;
    }

    output.flush().await
}
