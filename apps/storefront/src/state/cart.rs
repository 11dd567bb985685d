//! # Cart Store
//!
//! The live cart: current state, the action entry point, and change
//! notifications.
//!
//! ## Dispatch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Caller                    CartStore                  Side effects      │
//! │  ──────                    ─────────                  ────────────      │
//! │                                                                         │
//! │  dispatch(action) ───────► reduce(state, action)                        │
//! │                                 │                                       │
//! │                                 ├── unchanged ──────► (nothing)         │
//! │                                 │                                       │
//! │                                 ├── isOpen only ────► notify watchers   │
//! │                                 │                                       │
//! │                                 └── items changed ──► notify watchers   │
//! │                                                       schedule write    │
//! │                                                                         │
//! │  state() ────────────────► snapshot clone (read only)                   │
//! │                                                                         │
//! │  NOTE: Dispatches are serialized by the watch channel's write lock,     │
//! │        so persistence writes are queued in the same order.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tokio::sync::watch;
use tracing::debug;

use atelier_core::cart::reduce_raw;
use atelier_core::{reduce, CartAction, CartState, CartTotals, UsdRate};

use super::persist::{load_initial_state, CartPersister};
use crate::storage::CartStorage;

/// Shared cart state.
///
/// Wrap in an `Arc` and hand it to [`CartProvider`](super::CartProvider).
#[derive(Debug)]
pub struct CartStore {
    state_tx: watch::Sender<CartState>,
    persister: Option<CartPersister>,
}

impl CartStore {
    /// Creates a store that is never persisted.
    pub fn new(initial: CartState) -> Self {
        let (state_tx, _) = watch::channel(initial);
        CartStore {
            state_tx,
            persister: None,
        }
    }

    /// Creates a store that writes every items change through `persister`.
    pub fn with_persister(initial: CartState, persister: CartPersister) -> Self {
        let (state_tx, _) = watch::channel(initial);
        CartStore {
            state_tx,
            persister: Some(persister),
        }
    }

    /// Hydrates from `storage` and starts the background writer.
    ///
    /// The hydrated items are written back once, so a malformed or
    /// duplicate-laden document is replaced by its normalized form.
    pub async fn open<S: CartStorage>(storage: S, key: &str) -> Self {
        let initial = load_initial_state(&storage, key).await;
        let persister = CartPersister::spawn(storage, key);
        persister.persist(&initial.items);
        Self::with_persister(initial, persister)
    }

    /// Current state snapshot.
    pub fn state(&self) -> CartState {
        self.state_tx.borrow().clone()
    }

    /// Applies `action` and returns the resulting state.
    pub fn dispatch(&self, action: CartAction) -> CartState {
        debug!(action = action.kind(), "Dispatching cart action");
        self.apply(|state| reduce(state, &action))
    }

    /// Applies an action given as raw JSON. Unrecognized shapes are no-ops.
    pub fn dispatch_raw(&self, raw: &serde_json::Value) -> CartState {
        debug!(action = ?raw.get("type"), "Dispatching raw cart action");
        self.apply(|state| reduce_raw(state, raw))
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.state_tx.subscribe()
    }

    /// Totals for the current state at `rate`.
    pub fn totals(&self, rate: UsdRate) -> CartTotals {
        CartTotals::new(&self.state_tx.borrow(), rate)
    }

    /// Waits for every scheduled write to be attempted.
    pub async fn flush(&self) {
        if let Some(persister) = &self.persister {
            persister.flush().await;
        }
    }

    fn apply(&self, next_state: impl FnOnce(&CartState) -> CartState) -> CartState {
        let mut snapshot = None;

        self.state_tx.send_if_modified(|state| {
            let next = next_state(state);
            let items_changed = next.items != state.items;
            let changed = items_changed || next.is_open != state.is_open;

            if items_changed {
                if let Some(persister) = &self.persister {
                    persister.persist(&next.items);
                }
            }

            *state = next;
            snapshot = Some(state.clone());
            changed
        });

        snapshot.unwrap_or_else(|| self.state())
    }
}

impl Default for CartStore {
    fn default() -> Self {
        CartStore::new(CartState::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
