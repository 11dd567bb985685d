//! # Commands Module
//!
//! Everything the storefront UI can ask of the backend.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── cart.rs     ◄─── Cart manipulation and checkout link
//! └── rate.rs     ◄─── USD→Bs rate administration
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  shell.rs (or any other front end)                                      │
//! │  ─────────────────────────────────                                      │
//! │  > add id=p1 name=Shirt price=20 qty=1 size=M                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  fn add_to_cart(                                                        │
//! │      rates: &RateState,       ◄── passed explicitly                    │
//! │      item: LineItem,          ◄── parsed from the input                │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         │ try_use_cart() ◄── store from the CartProvider scope          │
//! │         ▼                                                               │
//! │  { "items": [...], "isOpen": false, "totals": {...} }                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart commands are synchronous: dispatch never waits on storage.

pub mod cart;
pub mod rate;
