//! Persisting cart store.
//!
//! Wraps the pure [`CartState`] with the durability contract: the state is
//! restored from the `"cart"` slot when the store opens and written back
//! after every mutation. A failed write is logged and the in-memory mutation
//! stands - durability is best-effort, consistency of the in-memory state is
//! not.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use shopsmart_core::{CartState, Product, ProductId};

use crate::storage::{CART_KEY, KvStore};

/// Errors a cart mutation can be rejected with.
#[derive(Debug, Error)]
pub enum CartError {
    /// The product is out of stock and the stock policy is enforced.
    #[error("product {id} is out of stock")]
    OutOfStock {
        /// The rejected product.
        id: ProductId,
    },
}

/// Configurable cart behavior.
///
/// The drafts never agreed on whether the store itself should guard against
/// out-of-stock products (the UI disables the button, the store historically
/// did not check), so the guard is a policy knob rather than a hard rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct CartPolicy {
    /// Reject `add` calls for products with `in_stock == false`.
    pub enforce_stock_check: bool,
}

/// The cart store: exclusive owner of the live [`CartState`].
///
/// Views never mutate the state directly; they hold a reference to this
/// store and trigger its operations.
pub struct CartStore {
    state: CartState,
    storage: Arc<dyn KvStore>,
    policy: CartPolicy,
}

impl CartStore {
    /// Open the store, restoring the persisted cart if possible.
    ///
    /// Any read or parse failure falls back to the empty cart - a corrupt
    /// slot is logged and discarded, never surfaced to the caller.
    #[must_use]
    pub fn open(storage: Arc<dyn KvStore>, policy: CartPolicy) -> Self {
        let state = match storage.get(CART_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<CartState>(&raw) {
                Ok(state) => {
                    debug!(lines = state.len(), "Restored persisted cart");
                    state
                }
                Err(e) => {
                    warn!(error = %e, "Persisted cart is malformed, starting empty");
                    CartState::new()
                }
            },
            Ok(None) => CartState::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read persisted cart, starting empty");
                CartState::new()
            }
        };

        Self {
            state,
            storage,
            policy,
        }
    }

    /// Add one unit of `product`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::OutOfStock`] when the product is out of stock and
    /// the policy enforces the stock check; with the default policy the store
    /// imposes no stock guard.
    pub fn add(&mut self, product: Product) -> Result<(), CartError> {
        if self.policy.enforce_stock_check && !product.in_stock {
            return Err(CartError::OutOfStock { id: product.id });
        }
        self.state.add(product);
        self.persist();
        Ok(())
    }

    /// Remove the line with `id`; no-op for an unknown id.
    pub fn remove(&mut self, id: ProductId) {
        self.state.remove(id);
        self.persist();
    }

    /// Set the quantity of the line with `id` exactly; zero removes the line.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) {
        self.state.set_quantity(id, quantity);
        self.persist();
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) {
        self.state.clear();
        self.persist();
    }

    /// The current cart state.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// Serialize the full state to the cart slot. Best-effort: a failure is
    /// logged and the in-memory state keeps the mutation.
    fn persist(&self) {
        let raw = match serde_json::to_string(&self.state) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Failed to serialize cart");
                return;
            }
        };
        if let Err(e) = self.storage.set(CART_KEY, &raw) {
            warn!(error = %e, "Failed to persist cart");
        }
    }
}
