//! # atelier-db: Database Layer for the Atelier Storefront
//!
//! SQLite storage via sqlx: a key/value table the cart document is persisted
//! to, and the exchange-rate history.
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (kv, rate)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use atelier_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/atelier.db")).await?;
//!
//! db.kv().set("cartState_v1", &json).await?;
//! let rate = db.rates().current().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::kv::KvRepository;
pub use repository::rate::RateRepository;
