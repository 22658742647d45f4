//! The add-to-cart command.
//!
//! Add-to-cart controls in page markup carry their payload as string
//! attributes. [`AddToCart::parse`] validates them once at that boundary so
//! the rest of the system only ever sees a typed command.

use super::id::{ItemId, ItemIdError};
use super::price::{Price, PriceError};

/// Errors that can occur when parsing an [`AddToCart`] command.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AddToCartError {
    /// The item ID is missing.
    #[error("invalid item id: {0}")]
    Id(#[from] ItemIdError),
    /// The price attribute is not a usable price.
    #[error("invalid price: {0}")]
    Price(#[from] PriceError),
}

/// A validated request to add one unit of an item to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddToCart {
    pub id: ItemId,
    pub name: String,
    pub price: Price,
    pub category: String,
}

impl AddToCart {
    /// Parse the string attributes of an add-to-cart control.
    ///
    /// Name and category are taken verbatim (trimmed); they are display-only.
    ///
    /// # Errors
    ///
    /// Returns an error if the ID is empty or the price does not parse.
    ///
    /// ```
    /// use weilglass_core::{AddToCart, AddToCartError, PriceError};
    ///
    /// let cmd = AddToCart::parse("A", "Vase", "10.00", "ceramics").unwrap();
    /// assert_eq!(cmd.price.to_string(), "$10.00");
    ///
    /// assert_eq!(
    ///     AddToCart::parse("A", "Vase", "n/a", "ceramics"),
    ///     Err(AddToCartError::Price(PriceError::Invalid("n/a".into()))),
    /// );
    /// ```
    pub fn parse(
        id: &str,
        name: &str,
        price: &str,
        category: &str,
    ) -> Result<Self, AddToCartError> {
        Ok(Self {
            id: ItemId::parse(id)?,
            name: name.trim().to_owned(),
            price: Price::parse(price)?,
            category: category.trim().to_owned(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let cmd = AddToCart::parse("A", " Vase ", "10.00", "ceramics").unwrap();
        assert_eq!(cmd.id.as_str(), "A");
        assert_eq!(cmd.name, "Vase");
        assert_eq!(cmd.price, Price::from_cents(1000));
        assert_eq!(cmd.category, "ceramics");
    }

    #[test]
    fn test_parse_missing_id() {
        assert_eq!(
            AddToCart::parse("", "Vase", "10.00", "ceramics"),
            Err(AddToCartError::Id(ItemIdError::Empty))
        );
    }

    #[test]
    fn test_parse_bad_price() {
        assert_eq!(
            AddToCart::parse("A", "Vase", "", "ceramics"),
            Err(AddToCartError::Price(PriceError::Empty))
        );
        assert_eq!(
            AddToCart::parse("A", "Vase", "-3", "ceramics"),
            Err(AddToCartError::Price(PriceError::Negative))
        );
    }

    #[test]
    fn test_error_messages() {
        let err = AddToCart::parse("A", "Vase", "NaN", "x").unwrap_err();
        assert_eq!(err.to_string(), "invalid price: price is not a number: \"NaN\"");
    }
}
