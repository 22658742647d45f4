//! Item identifiers.
//!
//! Catalog items are identified by opaque strings taken from page markup
//! (e.g. `"vase-01"`). Wrapping them keeps item IDs from being mixed up with
//! names and categories, which are also plain strings.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`ItemId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemIdError {
    /// The input string is empty or whitespace.
    #[error("item id cannot be empty")]
    Empty,
}

/// Identifier of a catalog item, unique within a cart.
///
/// ## Examples
///
/// ```
/// use weilglass_core::ItemId;
///
/// assert!(ItemId::parse("vase-01").is_ok());
/// assert!(ItemId::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Parse an `ItemId` from user-supplied input.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ItemIdError::Empty`] if nothing remains after trimming.
    pub fn parse(s: &str) -> Result<Self, ItemIdError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ItemIdError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Unchecked conversion, used for IDs that only ever look up existing items.
impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}
