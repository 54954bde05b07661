//! The cart store: the session's cart plus write-through persistence.
//!
//! [`CartStore`] owns the in-memory [`Cart`] and a [`Storage`] collaborator.
//! Every mutation serializes the full cart under [`CART_KEY`] immediately.
//! Storage failures never undo a mutation: the in-memory cart stays
//! authoritative for the session and the failure is queued as a warning for
//! the controller to surface.

pub mod persist;

use quickbite_core::{Cart, CartEntry, ItemId, QuantityChange, Totals};
use thiserror::Error;
use tracing::instrument;

use crate::catalog::Catalog;
use crate::storage::{Storage, StorageError};

pub use persist::CART_KEY;

/// Cart failures. All are recovered locally.
#[derive(Debug, Error)]
pub enum CartError {
    /// An add referenced an id the catalog does not contain.
    #[error("item {0} is not on the menu")]
    ItemNotFound(ItemId),

    /// The storage collaborator could not be read or written.
    #[error("cart storage unavailable: {0}")]
    StorageUnavailable(#[from] StorageError),

    /// The persisted cart could not be decoded.
    #[error("persisted cart is malformed: {0}")]
    MalformedPersistedState(#[from] serde_json::Error),
}

/// What a cart operation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// An item was added; `quantity` is the entry's new quantity.
    Added { name: String, quantity: u32 },
    /// An entry's quantity changed but it is still in the cart.
    QuantityChanged { id: ItemId, quantity: u32 },
    /// An entry was removed.
    Removed { id: ItemId, name: String },
    /// The cart was emptied.
    Cleared,
    /// Nothing matched; no state changed and nothing was written.
    Unchanged,
}

/// The session cart and its storage.
#[derive(Debug)]
pub struct CartStore<S> {
    cart: Cart,
    storage: S,
    persist_failing: bool,
    warning: Option<CartError>,
}

impl<S: Storage> CartStore<S> {
    /// Load the cart from storage.
    ///
    /// Never fails: a missing value starts an empty cart, and unreadable or
    /// malformed state is logged and replaced with an empty cart.
    #[instrument(skip(storage))]
    pub fn hydrate(storage: S) -> Self {
        let mut store = Self {
            cart: Cart::new(),
            storage,
            persist_failing: false,
            warning: None,
        };

        match store.storage.get(CART_KEY) {
            Ok(None) => tracing::debug!("No saved cart, starting empty"),
            Ok(Some(raw)) => match persist::decode(&raw) {
                Ok(cart) => {
                    tracing::info!(
                        entries = cart.entries().len(),
                        items = cart.count(),
                        "Cart restored from storage"
                    );
                    store.cart = cart;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding malformed saved cart");
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "Cart storage unreadable, continuing in memory");
                store.warning = Some(CartError::StorageUnavailable(e));
            }
        }

        store
    }

    /// Add one of a catalog item.
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` without touching the cart if `id` is not in
    /// the catalog.
    #[instrument(skip(self, catalog))]
    pub fn add(&mut self, catalog: &Catalog, id: ItemId) -> Result<CartEvent, CartError> {
        let Some(item) = catalog.lookup(id) else {
            tracing::warn!(item_id = %id, "Add ignored: unknown item");
            return Err(CartError::ItemNotFound(id));
        };

        let quantity = self.cart.add(item);
        tracing::info!(item_id = %id, quantity, "Item added to cart");
        self.persist();
        Ok(CartEvent::Added {
            name: item.name.clone(),
            quantity,
        })
    }

    /// Change an entry's quantity by `delta`.
    ///
    /// Dropping to zero or below removes the entry, exactly as [`remove`]
    /// would. An absent id is a no-op.
    ///
    /// [`remove`]: Self::remove
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, id: ItemId, delta: i32) -> CartEvent {
        let Some(name) = self.cart.get(id).map(|entry| entry.item.name.clone()) else {
            return CartEvent::Unchanged;
        };

        match self.cart.update_quantity(id, delta) {
            QuantityChange::Unchanged => CartEvent::Unchanged,
            QuantityChange::Updated(quantity) => {
                tracing::debug!(item_id = %id, quantity, "Cart quantity updated");
                self.persist();
                CartEvent::QuantityChanged { id, quantity }
            }
            QuantityChange::Removed => {
                tracing::info!(item_id = %id, "Item removed from cart");
                self.persist();
                CartEvent::Removed { id, name }
            }
        }
    }

    /// Remove an entry. An absent id is a no-op.
    #[instrument(skip(self))]
    pub fn remove(&mut self, id: ItemId) -> CartEvent {
        let Some(entry) = self.cart.remove(id) else {
            return CartEvent::Unchanged;
        };
        tracing::info!(item_id = %id, "Item removed from cart");
        self.persist();
        CartEvent::Removed {
            id,
            name: entry.item.name,
        }
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> CartEvent {
        self.cart.clear();
        self.persist();
        CartEvent::Cleared
    }

    /// Current contents.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        self.cart.entries()
    }

    #[must_use]
    pub fn totals(&self) -> Totals {
        self.cart.totals()
    }

    #[must_use]
    pub fn count(&self) -> u32 {
        self.cart.count()
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Take the queued storage warning, if any.
    pub fn take_warning(&mut self) -> Option<CartError> {
        self.warning.take()
    }

    fn persist(&mut self) {
        let result = persist::encode(&self.cart)
            .map_err(CartError::from)
            .and_then(|raw| self.storage.set(CART_KEY, &raw).map_err(CartError::from));

        match result {
            Ok(()) => {
                if self.persist_failing {
                    tracing::info!("Cart persistence recovered");
                }
                self.persist_failing = false;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save cart, keeping it in memory");
                // Surface once per failure streak.
                if !self.persist_failing {
                    self.warning = Some(e);
                }
                self.persist_failing = true;
            }
        }
    }
}
