//! Product catalog for the store page.
//!
//! The catalog is a JSON file loaded once at startup:
//!
//! ```json
//! [
//!   {"id": "vase-01", "name": "Amber Vase", "price": "120.00", "category": "vessels",
//!    "description": "Hand-blown, 30cm."}
//! ]
//! ```
//!
//! Prices are strings, parsed with the same rules as add-to-cart attributes,
//! so every product the store renders is guaranteed to be addable.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use weilglass_core::{AddToCart, AddToCartError};

use crate::cart::action::{CartAction, Control};

/// Errors loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid product {index}: {source}")]
    InvalidProduct {
        index: usize,
        #[source]
        source: AddToCartError,
    },
}

/// A catalog entry as written in the file.
#[derive(Debug, Deserialize)]
struct CatalogEntry {
    id: String,
    name: String,
    price: String,
    category: String,
    #[serde(default)]
    description: Option<String>,
}

/// A product that can be added to the cart.
#[derive(Debug, Clone)]
pub struct Product {
    pub item: AddToCart,
    pub description: Option<String>,
}

/// The products offered on the store page, in file order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Arc<Vec<Product>>,
}

impl Catalog {
    /// Load the catalog from `path`.
    ///
    /// A missing file yields an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or any product is invalid.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("Catalog file does not exist: {:?}", path);
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let catalog = Self::from_json(&text)?;
        tracing::info!(products = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// Parse a catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a list of entries or any entry has
    /// an empty ID or unparseable price.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(text)?;

        let products = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                AddToCart::parse(&entry.id, &entry.name, &entry.price, &entry.category)
                    .map(|item| Product {
                        item,
                        description: entry.description,
                    })
                    .map_err(|source| CatalogError::InvalidProduct { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            products: Arc::new(products),
        })
    }

    /// All products.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Product display data for the store page.
#[derive(Clone)]
pub struct ProductView {
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub price: String,
    pub add: Control,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            name: product.item.name.clone(),
            category: product.item.category.clone(),
            description: product.description.clone(),
            price: product.item.price.to_string(),
            add: Control::bind(
                &CartAction::Add(product.item.clone()),
                "Add to cart",
                format!("Add {} to cart", product.item.name),
            ),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use weilglass_core::PriceError;

    use super::*;

    #[test]
    fn test_from_json() {
        let catalog = Catalog::from_json(
            r#"[
                {"id": "vase-01", "name": "Amber Vase", "price": "120", "category": "vessels"},
                {"id": "bowl-02", "name": "Cobalt Bowl", "price": "45.50", "category": "bowls",
                 "description": "Wide and shallow."}
            ]"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.products()[0].item.price.to_string(), "$120.00");
        assert_eq!(
            catalog.products()[1].description.as_deref(),
            Some("Wide and shallow.")
        );
    }

    #[test]
    fn test_rejects_bad_price() {
        let err = Catalog::from_json(
            r#"[{"id": "vase-01", "name": "Vase", "price": "call us", "category": "x"}]"#,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            CatalogError::InvalidProduct {
                index: 0,
                source: AddToCartError::Price(PriceError::Invalid(_))
            }
        ));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let catalog = Catalog::load(Path::new("/nonexistent/catalog.json")).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_product_view_binds_add_action() {
        let catalog = Catalog::from_json(
            r#"[{"id": "vase-01", "name": "Vase", "price": "12.5", "category": "vessels"}]"#,
        )
        .unwrap();
        let view = ProductView::from(&catalog.products()[0]);

        assert_eq!(view.price, "$12.50");
        assert_eq!(view.add.endpoint, "/cart/add");
        assert_eq!(
            view.add.values,
            r#"{"category":"vessels","id":"vase-01","name":"Vase","price":"12.50"}"#
        );
    }
}
