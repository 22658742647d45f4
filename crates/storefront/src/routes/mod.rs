//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Store page (catalog with add-to-cart controls)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (out-of-band fragments, notice)
//! POST /cart/update            - Change quantity by delta (out-of-band fragments)
//! POST /cart/remove            - Remove item (out-of-band fragments)
//! POST /cart/clear             - Clear cart when confirmed (out-of-band fragments)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout
//! GET  /checkout               - Order summary
//! ```
//!
//! Mutation forms carry a `page` field naming the page they were posted
//! from, which decides which fragments come back.

pub mod cart;
pub mod checkout;
pub mod store;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Store page
        .route("/", get(store::index))
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout summary
        .route("/checkout", get(checkout::show))
}
