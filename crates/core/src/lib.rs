//! Weil Glass Core - Cart domain types.
//!
//! This crate provides the types shared by the storefront and its tests:
//! item identifiers, prices, line items, the cart itself, and the typed
//! add-to-cart command parsed from page markup.
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no
//! storage access, no rendering. Persistence and views live in the
//! storefront crate and operate on these types.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for item IDs and prices, plus `Cart` and `LineItem`

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
