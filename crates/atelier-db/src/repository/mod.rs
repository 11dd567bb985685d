//! # Repository Module
//!
//! Database repository implementations for the storefront.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Caller                                                                 │
//! │       │  db.kv().get("cartState_v1")                                   │
//! │       │  db.rates().set_current(38.1, "Admin")                         │
//! │       ▼                                                                 │
//! │  KvRepository / RateRepository  ← all SQL lives here                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`KvRepository`](kv::KvRepository) - String documents by key
//! - [`RateRepository`](rate::RateRepository) - Exchange-rate history

pub mod kv;
pub mod rate;
