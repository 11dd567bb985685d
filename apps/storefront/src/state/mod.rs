//! # State Module
//!
//! Application state for the storefront.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      lib.rs::run                                │   │
//! │  │  let cart = Arc::new(CartStore::open(backend, key).await);      │   │
//! │  │  let rates = RateState::load(db, fallback).await;               │   │
//! │  │  CartProvider::scope(cart, shell).await;                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │  CartStore   │  │  RateState   │  │ StorefrontConfig │              │
//! │  │              │  │              │  │                  │              │
//! │  │  watch chan  │  │  RwLock<     │  │  storage kind    │              │
//! │  │  + writer    │  │   UsdRate>   │  │  whatsapp number │              │
//! │  │    task      │  │  + Database  │  │  fallback rate   │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  ACCESS:                                                               │
//! │  • CartStore: through the CartProvider scope (use_cart)                │
//! │  • RateState, StorefrontConfig: passed explicitly to commands          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod persist;
mod provider;
mod rate;

pub use cart::CartStore;
pub use config::{ConfigError, StorageKind, StorefrontConfig};
pub use persist::{decode_cart, encode_cart, load_initial_state, CartPersister};
pub use provider::{try_use_cart, use_cart, CartProvider, ProviderError};
pub use rate::{RateState, DEFAULT_RATE_SETTER};
