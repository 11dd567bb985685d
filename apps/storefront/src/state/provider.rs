//! # Cart Provider
//!
//! Makes one [`CartStore`] reachable from anywhere inside a task without
//! threading it through every call.
//!
//! ```text
//! CartProvider::scope(store, async {
//!     ...
//!     let cart = use_cart();          // the store passed above
//!     cart.dispatch(CartAction::ToggleCart);
//!     ...
//! }).await;
//!
//! use_cart();                          // outside: panics
//! try_use_cart();                      // outside: Err(ProviderError)
//! ```
//!
//! Scopes nest; the innermost store wins. A task spawned from inside a
//! scope does not inherit it.

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;

use super::CartStore;

tokio::task_local! {
    static CURRENT_CART: Arc<CartStore>;
}

/// Cart accessor misuse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("use_cart must be called within a CartProvider scope")]
    OutsideProvider,
}

/// Scopes a cart store to a future or closure.
pub struct CartProvider;

impl CartProvider {
    /// Runs `fut` with `store` as the current cart.
    pub async fn scope<F>(store: Arc<CartStore>, fut: F) -> F::Output
    where
        F: Future,
    {
        CURRENT_CART.scope(store, fut).await
    }

    /// Runs `f` with `store` as the current cart.
    pub fn sync_scope<R>(store: Arc<CartStore>, f: impl FnOnce() -> R) -> R {
        CURRENT_CART.sync_scope(store, f)
    }
}

/// Returns the cart of the enclosing [`CartProvider`] scope.
pub fn try_use_cart() -> Result<Arc<CartStore>, ProviderError> {
    CURRENT_CART
        .try_with(Arc::clone)
        .map_err(|_| ProviderError::OutsideProvider)
}

/// Returns the cart of the enclosing [`CartProvider`] scope.
///
/// # Panics
///
/// Panics when called outside a provider scope. Use [`try_use_cart`] to
/// handle that case instead.
pub fn use_cart() -> Arc<CartStore> {
    match try_use_cart() {
        Ok(cart) => cart,
        Err(e) => panic!("{}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::{CartAction, LineItem};

    #[tokio::test]
    async fn test_scope_exposes_store() {
        let store = Arc::new(CartStore::default());

        CartProvider::scope(store.clone(), async {
            use_cart().dispatch(CartAction::AddItem(LineItem::new("p1", "Shirt", 20.0, 1)));
        })
        .await;

        assert_eq!(store.state().items.len(), 1);
    }

    #[tokio::test]
    async fn test_scope_survives_await_points() {
        let store = Arc::new(CartStore::default());

        let open = CartProvider::scope(store, async {
            tokio::task::yield_now().await;
            use_cart().dispatch(CartAction::ToggleCart).is_open
        })
        .await;

        assert!(open);
    }

    #[test]
    fn test_sync_scope_exposes_store() {
        let store = Arc::new(CartStore::default());

        let same = CartProvider::sync_scope(store.clone(), || Arc::ptr_eq(&use_cart(), &store));

        assert!(same);
    }

    #[test]
    fn test_innermost_scope_wins() {
        let outer = Arc::new(CartStore::default());
        let inner = Arc::new(CartStore::default());

        CartProvider::sync_scope(outer.clone(), || {
            CartProvider::sync_scope(inner.clone(), || {
                assert!(Arc::ptr_eq(&use_cart(), &inner));
            });
            assert!(Arc::ptr_eq(&use_cart(), &outer));
        });
    }

    #[test]
    fn test_try_use_cart_outside_scope_errors() {
        assert_eq!(try_use_cart().unwrap_err(), ProviderError::OutsideProvider);
    }

    #[test]
    #[should_panic(expected = "use_cart must be called within a CartProvider scope")]
    fn test_use_cart_outside_scope_panics() {
        use_cart();
    }
}
