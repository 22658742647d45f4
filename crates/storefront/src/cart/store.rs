//! Persistence of the cart in its storage slot.

use weilglass_core::Cart;

use super::storage::Storage;

/// Name of the slot holding the cart.
pub const CART_KEY: &str = "weilglassCart";

/// Reads and writes the cart's JSON encoding in a single storage slot.
///
/// `CartStore` never fails towards its caller: missing or undecodable data
/// loads as an empty cart, and write failures are logged and dropped.
#[derive(Debug, Clone)]
pub struct CartStore<S> {
    storage: S,
    key: String,
}

impl<S: Storage> CartStore<S> {
    /// Create a store using the default [`CART_KEY`] slot.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, CART_KEY)
    }

    /// Create a store using a custom slot name.
    pub fn with_key(storage: S, key: &str) -> Self {
        Self {
            storage,
            key: key.to_owned(),
        }
    }

    /// Load the cart, or an empty cart if the slot is absent or malformed.
    #[must_use]
    pub fn load(&self) -> Cart {
        let Some(raw) = self.storage.get_item(&self.key) else {
            return Cart::new();
        };

        if raw.trim().is_empty() {
            return Cart::new();
        }

        Cart::from_json(&raw).unwrap_or_else(|e| {
            tracing::warn!(key = %self.key, error = %e, "Discarding undecodable cart");
            Cart::new()
        })
    }

    /// Overwrite the slot with the whole cart.
    pub fn save(&mut self, cart: &Cart) {
        let encoded = match cart.to_json() {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "Failed to encode cart");
                return;
            }
        };

        if let Err(e) = self.storage.set_item(&self.key, encoded) {
            tracing::warn!(key = %self.key, error = %e, "Failed to save cart");
        }
    }

    /// Remove the slot entirely, discarding any malformed legacy data too.
    pub fn clear(&mut self) {
        self.storage.remove_item(&self.key);
    }

    /// The underlying storage.
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store and return the underlying storage.
    pub fn into_storage(self) -> S {
        self.storage
    }
}
