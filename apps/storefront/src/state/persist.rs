//! # Cart Persistence
//!
//! Keeps a durable copy of the cart items so a restart picks up where the
//! shopper left off.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CartStore::dispatch ──► items changed? ──► CartPersister::persist()    │
//! │                                │               │ (serialize, enqueue)   │
//! │                                │ no            ▼                        │
//! │                                ▼          ┌──────────────┐              │
//! │                             (nothing)     │ mpsc channel │              │
//! │                                           └──────┬───────┘              │
//! │                                                  ▼                      │
//! │                                   writer task: storage.write(key, doc)  │
//! │                                   (one at a time, in dispatch order;    │
//! │                                    failures logged and dropped)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stored Document
//! ```json
//! { "items": [ { "id": "p1", "name": "Shirt", "price": 20, "quantity": 1 } ], "isOpen": false }
//! ```
//! `isOpen` is always written as `false`; the sidebar never reopens itself
//! after a restart.

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use atelier_core::{CartState, LineItem};

use crate::storage::CartStorage;

// =============================================================================
// Document Encoding
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartDocument<'a> {
    items: &'a [LineItem],
    is_open: bool,
}

/// What hydration accepts: only `items` is read, and `null` counts as empty.
#[derive(Deserialize)]
struct StoredCart {
    #[serde(default)]
    items: Option<Vec<LineItem>>,
}

/// Serializes `items` into the stored document.
pub fn encode_cart(items: &[LineItem]) -> serde_json::Result<String> {
    serde_json::to_string(&CartDocument {
        items,
        is_open: false,
    })
}

/// Parses a stored document into a closed cart.
///
/// Returns `None` for anything that is not a cart document.
pub fn decode_cart(raw: &str) -> Option<CartState> {
    let stored: StoredCart = serde_json::from_str(raw).ok()?;
    Some(CartState::from_items(stored.items.unwrap_or_default()))
}

// =============================================================================
// Hydration
// =============================================================================

/// Reads the initial cart from storage.
///
/// Never fails: a missing key, a read error or a malformed document all
/// produce an empty, closed cart.
pub async fn load_initial_state<S: CartStorage>(storage: &S, key: &str) -> CartState {
    let raw = match storage.read(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "No stored cart, starting empty");
            return CartState::default();
        }
        Err(e) => {
            warn!(key, error = %e, "Failed to read stored cart, starting empty");
            return CartState::default();
        }
    };

    match decode_cart(&raw) {
        Some(state) => {
            info!(key, items = state.items.len(), "Cart restored from storage");
            state
        }
        None => {
            warn!(key, "Stored cart is malformed, discarding it");
            CartState::default()
        }
    }
}

// =============================================================================
// Background Writer
// =============================================================================

enum PersistCommand {
    Save(String),
    Flush(oneshot::Sender<()>),
}

/// Handle to the background task that writes cart documents.
///
/// Dropping every handle stops the task once the queue drains.
#[derive(Debug, Clone)]
pub struct CartPersister {
    tx: mpsc::UnboundedSender<PersistCommand>,
}

impl std::fmt::Debug for PersistCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistCommand::Save(doc) => write!(f, "Save({} bytes)", doc.len()),
            PersistCommand::Flush(_) => write!(f, "Flush"),
        }
    }
}

impl CartPersister {
    /// Spawns the writer task on the current runtime.
    pub fn spawn<S: CartStorage>(storage: S, key: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(storage, key.into(), rx));
        CartPersister { tx }
    }

    /// Schedules a write of `items`. Returns immediately.
    pub fn persist(&self, items: &[LineItem]) {
        let doc = match encode_cart(items) {
            Ok(doc) => doc,
            Err(e) => {
                error!(error = %e, "Failed to serialize cart, skipping write");
                return;
            }
        };

        if self.tx.send(PersistCommand::Save(doc)).is_err() {
            error!("Cart writer has stopped, write dropped");
        }
    }

    /// Waits until every write scheduled before this call has been attempted.
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(PersistCommand::Flush(ack_tx)).is_err() {
            return;
        }
        let _ = ack_rx.await;
    }
}

async fn run_writer<S: CartStorage>(
    storage: S,
    key: String,
    mut rx: mpsc::UnboundedReceiver<PersistCommand>,
) {
    debug!(key = %key, "Cart writer started");

    while let Some(command) = rx.recv().await {
        match command {
            PersistCommand::Save(doc) => match storage.write(&key, &doc).await {
                Ok(()) => debug!(key = %key, bytes = doc.len(), "Cart persisted"),
                Err(e) => error!(key = %key, error = %e, "Failed to persist cart"),
            },
            PersistCommand::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }

    debug!(key = %key, "Cart writer stopped");
}

// =============================================================================
// Unit Tests
// =============================================================================
