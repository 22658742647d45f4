//! The cart and its line items.
//!
//! A [`Cart`] is an ordered list of [`LineItem`]s in first-added order. The
//! type upholds two invariants that every operation and every decode path
//! preserves:
//!
//! - item IDs are unique within the cart
//! - every quantity is at least 1 (an item that would drop to zero is removed)
//!
//! Prices are bounded by [`MAX_PRICE_DOLLARS`](super::price::MAX_PRICE_DOLLARS)
//! on the way in, and line totals and grand totals saturate, so no amount the
//! cart holds can make a total panic.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::command::AddToCart;
use super::id::ItemId;
use super::price::{Price, PriceError};

/// One product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ItemId,
    pub name: String,
    pub price: Price,
    pub category: String,
    pub quantity: u32,
}

impl LineItem {
    /// Price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.quantity
    }
}

/// Result of applying a quantity delta to an item that exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The item is still in the cart with this quantity.
    Updated(u32),
    /// The quantity reached zero or below and the item was dropped.
    Removed,
}

/// Reasons a decoded item list is not a valid cart.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartDecodeError {
    /// Two entries share an ID.
    #[error("duplicate item id {0}")]
    DuplicateId(ItemId),
    /// An entry has quantity zero.
    #[error("item {0} has zero quantity")]
    ZeroQuantity(ItemId),
    /// An entry has a negative or out-of-range price.
    #[error("item {id} has an invalid price: {source}")]
    InvalidPrice {
        id: ItemId,
        #[source]
        source: PriceError,
    },
}

/// An ordered collection of line items.
///
/// Serializes as a bare JSON array of items. Deserialization validates the
/// cart invariants, so malformed stored data fails to decode instead of
/// producing an inconsistent cart.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Decode a cart from its stored JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON array of line items or the
    /// items break a cart invariant.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Encode the cart as JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error only if serialization itself fails, which cannot
    /// happen for well-formed items.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Line items in first-added order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Look up an item by ID.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Add one unit of an item.
    ///
    /// An existing entry only has its quantity bumped; its name, price and
    /// category are left as first added. Returns the resulting quantity.
    pub fn add(&mut self, command: AddToCart) -> u32 {
        if let Some(existing) = self.items.iter_mut().find(|item| item.id == command.id) {
            existing.quantity = existing.quantity.saturating_add(1);
            return existing.quantity;
        }

        self.items.push(LineItem {
            id: command.id,
            name: command.name,
            price: command.price,
            category: command.category,
            quantity: 1,
        });
        1
    }

    /// Apply a signed delta to an item's quantity.
    ///
    /// Returns `None` if no item has this ID. An item whose quantity would
    /// reach zero or below is removed without disturbing the order of the
    /// remaining items.
    pub fn change_quantity(&mut self, id: &ItemId, delta: i32) -> Option<QuantityChange> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        let item = self.items.get_mut(index)?;

        let next = i64::from(item.quantity) + i64::from(delta);
        if next <= 0 {
            self.items.remove(index);
            return Some(QuantityChange::Removed);
        }

        let quantity = u32::try_from(next).unwrap_or(u32::MAX);
        item.quantity = quantity;
        Some(QuantityChange::Updated(quantity))
    }

    /// Remove every entry with this ID. Returns whether anything was removed.
    pub fn remove(&mut self, id: &ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        self.items.len() != before
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn grand_total(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = CartDecodeError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(items.len());
        let mut normalized = Vec::with_capacity(items.len());

        for mut item in items {
            if !seen.insert(item.id.clone()) {
                return Err(CartDecodeError::DuplicateId(item.id));
            }
            if item.quantity == 0 {
                return Err(CartDecodeError::ZeroQuantity(item.id));
            }
            // Stored floats may carry binary noise; snap back to cents.
            match Price::from_decimal(item.price.amount()) {
                Ok(price) => item.price = price,
                Err(source) => {
                    return Err(CartDecodeError::InvalidPrice {
                        id: item.id,
                        source,
                    });
                }
            }
            normalized.push(item);
        }

        Ok(Self { items: normalized })
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn command(id: &str, price: &str) -> AddToCart {
        AddToCart::parse(id, "Vase", price, "ceramics").unwrap()
    }

    fn item(id: &str, cents: u32, quantity: u32) -> LineItem {
        LineItem {
            id: ItemId::from(id),
            name: format!("Item {id}"),
            price: Price::from_cents(cents),
            category: "glass".to_string(),
            quantity,
        }
    }

    #[test]
    fn test_add_accumulates_quantity() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(command("A", "10.00")), 1);
        assert_eq!(cart.add(command("A", "10.00")), 2);

        assert_eq!(cart.len(), 1);
        let line = &cart.items()[0];
        assert_eq!(line.id.as_str(), "A");
        assert_eq!(line.quantity, 2);
        assert_eq!(line.price, Price::from_cents(1000));
    }

    #[test]
    fn test_add_keeps_first_price() {
        let mut cart = Cart::new();
        cart.add(command("A", "10.00"));
        cart.add(command("A", "99.00"));

        assert_eq!(cart.items()[0].price, Price::from_cents(1000));
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add(command("B", "1"));
        cart.add(command("A", "1"));
        cart.add(command("B", "1"));

        let ids: Vec<_> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["B", "A"]);
    }

    #[test]
    fn test_change_quantity_unknown_id() {
        let mut cart = Cart::try_from(vec![item("A", 100, 1)]).unwrap();
        assert_eq!(cart.change_quantity(&ItemId::from("Z"), 1), None);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_change_quantity_removes_at_zero() {
        let mut cart = Cart::try_from(vec![item("A", 100, 2), item("B", 100, 1)]).unwrap();
        let id = ItemId::from("A");

        assert_eq!(
            cart.change_quantity(&id, -1),
            Some(QuantityChange::Updated(1))
        );
        assert_eq!(cart.change_quantity(&id, -1), Some(QuantityChange::Removed));
        assert_eq!(cart.change_quantity(&id, -1), None);
        assert_eq!(cart.items()[0].id.as_str(), "B");
    }

    #[test]
    fn test_change_quantity_large_negative_removes() {
        let mut cart = Cart::try_from(vec![item("A", 100, 3)]).unwrap();
        assert_eq!(
            cart.change_quantity(&ItemId::from("A"), i32::MIN),
            Some(QuantityChange::Removed)
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::try_from(vec![item("A", 100, 1), item("B", 100, 4)]).unwrap();
        let id = ItemId::from("B");

        assert!(cart.remove(&id));
        let once = cart.clone();
        assert!(!cart.remove(&id));
        assert_eq!(cart, once);
    }

    #[test]
    fn test_totals() {
        let cart = Cart::try_from(vec![item("A", 1000, 2), item("B", 550, 1)]).unwrap();
        assert_eq!(cart.grand_total(), Price::from_cents(2550));
        assert_eq!(cart.grand_total().to_string(), "$25.50");
        assert_eq!(cart.total_count(), 3);
    }

    #[test]
    fn test_empty_totals() {
        let cart = Cart::new();
        assert_eq!(cart.grand_total(), Price::ZERO);
        assert_eq!(cart.total_count(), 0);
    }

    #[test]
    fn test_line_total() {
        assert_eq!(item("A", 1250, 3).line_total(), Price::from_cents(3750));
    }

    #[test]
    fn test_oversized_price_never_reaches_cart() {
        let err = AddToCart::parse("A", "Vase", "50000000000000000000000000000", "x").unwrap_err();
        assert_eq!(err, crate::AddToCartError::Price(PriceError::TooLarge));
    }

    #[test]
    fn test_totals_at_price_and_quantity_limits() {
        let mut cart = Cart::new();
        for id in ["A", "B", "C"] {
            cart.add(command(id, "1000000000"));
            cart.change_quantity(&ItemId::from(id), i32::MAX);
            cart.change_quantity(&ItemId::from(id), i32::MAX);
        }

        assert_eq!(cart.total_count(), 3 * u64::from(u32::MAX));
        let line = Price::parse("1000000000").unwrap() * u32::MAX;
        assert_eq!(cart.items()[0].line_total(), line);
        assert_eq!(cart.grand_total(), line + line + line);
    }

    #[test]
    fn test_json_round_trip() {
        let cart = Cart::try_from(vec![item("A", 1000, 2), item("B", 550, 1)]).unwrap();
        let json = cart.to_json().unwrap();
        assert_eq!(Cart::from_json(&json).unwrap(), cart);
    }

    #[test]
    fn test_decodes_stored_format() {
        let json = r#"[{"id":"A","name":"Vase","price":10,"category":"ceramics","quantity":2}]"#;
        let cart = Cart::from_json(json).unwrap();
        assert_eq!(cart.items()[0].price, Price::from_cents(1000));
        assert_eq!(cart.total_count(), 2);
    }

    #[test]
    fn test_decode_rejects_broken_invariants() {
        let duplicate = r#"[{"id":"A","name":"x","price":1,"category":"c","quantity":1},
                            {"id":"A","name":"x","price":1,"category":"c","quantity":1}]"#;
        assert!(Cart::from_json(duplicate).is_err());

        let zero = r#"[{"id":"A","name":"x","price":1,"category":"c","quantity":0}]"#;
        assert!(Cart::from_json(zero).is_err());

        let negative_qty = r#"[{"id":"A","name":"x","price":1,"category":"c","quantity":-2}]"#;
        assert!(Cart::from_json(negative_qty).is_err());

        let negative_price = r#"[{"id":"A","name":"x","price":-1,"category":"c","quantity":1}]"#;
        assert!(Cart::from_json(negative_price).is_err());

        let nan_price = r#"[{"id":"A","name":"x","price":null,"category":"c","quantity":1}]"#;
        assert!(Cart::from_json(nan_price).is_err());

        let huge_price =
            r#"[{"id":"A","name":"x","price":50000000000000000000000000000,"category":"c","quantity":2}]"#;
        assert!(Cart::from_json(huge_price).is_err());
    }

    #[test]
    fn test_decode_rejects_non_arrays() {
        assert!(Cart::from_json("").is_err());
        assert!(Cart::from_json("{not json").is_err());
        assert!(Cart::from_json(r#"{"items":[]}"#).is_err());
    }
}
