//! Typed cart commands and the controls that carry them.
//!
//! Each rendered button is bound to one [`CartAction`]. The action knows its
//! endpoint and the form values that identify it, so the markup never names a
//! handler and the server decodes exactly the action that was rendered.

use serde_json::{Value, json};
use weilglass_core::{AddToCart, ItemId};

/// A user action against the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add one unit of an item.
    Add(AddToCart),
    /// Apply a signed delta to an item's quantity.
    ChangeQuantity { id: ItemId, delta: i32 },
    /// Drop an item regardless of quantity.
    Remove { id: ItemId },
    /// Empty the cart, subject to confirmation.
    Clear,
}

impl CartAction {
    /// Path the action is posted to.
    #[must_use]
    pub const fn endpoint(&self) -> &'static str {
        match self {
            Self::Add(_) => "/cart/add",
            Self::ChangeQuantity { .. } => "/cart/update",
            Self::Remove { .. } => "/cart/remove",
            Self::Clear => "/cart/clear",
        }
    }

    /// Form values that reproduce the action when posted to
    /// [`endpoint`](Self::endpoint).
    #[must_use]
    pub fn form_values(&self) -> Value {
        match self {
            Self::Add(command) => json!({
                "id": command.id,
                "name": command.name,
                "price": command.price.amount().to_string(),
                "category": command.category,
            }),
            Self::ChangeQuantity { id, delta } => json!({ "id": id, "delta": delta }),
            Self::Remove { id } => json!({ "id": id }),
            Self::Clear => json!({ "confirmed": true }),
        }
    }
}

/// A rendered control bound to one action.
#[derive(Debug, Clone)]
pub struct Control {
    /// `hx-post` target.
    pub endpoint: &'static str,
    /// `hx-vals` JSON.
    pub values: String,
    /// Button text.
    pub label: &'static str,
    /// Accessible name.
    pub title: String,
    /// Question the browser asks before sending, if any.
    pub confirm: Option<&'static str>,
}

impl Control {
    /// Bind `action` to a button.
    #[must_use]
    pub fn bind(action: &CartAction, label: &'static str, title: impl Into<String>) -> Self {
        Self {
            endpoint: action.endpoint(),
            values: action.form_values().to_string(),
            label,
            title: title.into(),
            confirm: None,
        }
    }

    /// Ask the user `question` before sending.
    #[must_use]
    pub const fn confirming(mut self, question: &'static str) -> Self {
        self.confirm = Some(question);
        self
    }
}
