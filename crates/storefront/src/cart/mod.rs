//! Browser-scoped shopping cart.
//!
//! The cart lives in a single durable key-value slot owned by the visitor's
//! browser session. Every operation is synchronous and runs a full
//! load-mutate-save cycle, so nothing here caches the cart between calls.
//!
//! # Layers (leaves first)
//!
//! - [`storage`] - the key-value slot seam (`Storage`), with in-memory and
//!   session-backed implementations
//! - [`store`] - `CartStore`, which owns the cart's encoding in the slot
//! - [`model`] - `CartModel`, the mutation operations
//! - [`views`] - HTML projections: cart table, checkout summary, nav badge
//! - [`action`] - typed `CartAction` commands bound to rendered controls
//! - [`page`] - `Page` render targets and the `PageController`
//! - [`prompt`] - user notification and confirmation

pub mod action;
pub mod model;
pub mod page;
pub mod prompt;
pub mod storage;
pub mod store;
pub mod views;

pub use action::CartAction;
pub use model::CartModel;
pub use page::{Dispatched, Page, PageController, PageKind, TargetId};
pub use prompt::{AnsweredPrompts, Prompter};
pub use storage::{MemoryStorage, SessionStorage, Storage, StorageError};
pub use store::{CART_KEY, CartStore};
