//! Cart mutation operations.

use weilglass_core::{AddToCart, Cart, ItemId, Price, QuantityChange};

use super::prompt::{ADDED_TO_CART, CLEAR_CART_QUESTION, Prompter};
use super::storage::Storage;
use super::store::CartStore;

/// The cart's operations over a [`CartStore`].
///
/// Every operation re-reads the slot before acting and writes the whole cart
/// back afterwards; no copy of the cart outlives a single call.
#[derive(Debug, Clone)]
pub struct CartModel<S> {
    store: CartStore<S>,
}

impl<S: Storage> CartModel<S> {
    /// Create a model that owns `store`.
    pub const fn new(store: CartStore<S>) -> Self {
        Self { store }
    }

    /// Current contents of the cart.
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.store.load()
    }

    /// Add one unit of an item and acknowledge it to the user.
    ///
    /// Returns the item's quantity after the add.
    pub fn add(&mut self, command: AddToCart, prompts: &mut impl Prompter) -> u32 {
        let mut cart = self.store.load();
        let id = command.id.clone();
        let quantity = cart.add(command);
        self.store.save(&cart);

        tracing::debug!(item_id = %id, quantity, "Added item to cart");
        prompts.notify(ADDED_TO_CART);
        quantity
    }

    /// Apply `delta` to an item's quantity, removing it at zero or below.
    ///
    /// An unknown ID leaves the slot untouched and returns `None`.
    pub fn change_quantity(&mut self, id: &ItemId, delta: i32) -> Option<QuantityChange> {
        let mut cart = self.store.load();
        let Some(change) = cart.change_quantity(id, delta) else {
            tracing::debug!(item_id = %id, delta, "Quantity change for item not in cart");
            return None;
        };
        self.store.save(&cart);

        tracing::debug!(item_id = %id, delta, ?change, "Changed item quantity");
        Some(change)
    }

    /// Remove an item. Removing an absent item still rewrites the slot.
    ///
    /// Returns whether the item was in the cart.
    pub fn remove(&mut self, id: &ItemId) -> bool {
        let mut cart = self.store.load();
        let removed = cart.remove(id);
        self.store.save(&cart);

        tracing::debug!(item_id = %id, removed, "Removed item from cart");
        removed
    }

    /// Empty the cart after the user confirms.
    ///
    /// Returns `false`, leaving the cart as it was, if the user declines.
    pub fn clear(&mut self, prompts: &mut impl Prompter) -> bool {
        if !prompts.confirm(CLEAR_CART_QUESTION) {
            tracing::debug!("Cart clear declined");
            return false;
        }

        self.store.clear();
        tracing::info!("Cart cleared");
        true
    }

    /// Total number of units across all items.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.store.load().total_count()
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn grand_total(&self) -> Price {
        self.store.load().grand_total()
    }

    /// The underlying store.
    pub const fn store(&self) -> &CartStore<S> {
        &self.store
    }

    /// Consume the model and return its store.
    pub fn into_store(self) -> CartStore<S> {
        self.store
    }
}
