//! Core types for the Weil Glass cart.
//!
//! This module provides type-safe wrappers for the cart's domain concepts.

pub mod cart;
pub mod command;
pub mod id;
pub mod price;

pub use cart::{Cart, CartDecodeError, LineItem, QuantityChange};
pub use command::{AddToCart, AddToCartError};
pub use id::{ItemId, ItemIdError};
pub use price::{Price, PriceError};
