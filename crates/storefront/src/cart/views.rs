//! HTML projections of the cart.
//!
//! Each view is a pure function of a [`Cart`]: the editable cart table, the
//! read-only checkout summary, and the navigation count badge.

use askama::Template;
use askama_web::WebTemplate;
use weilglass_core::{Cart, LineItem};

use super::action::{CartAction, Control};
use crate::filters;

/// Note shown under the cart table.
pub const CART_SHIPPING_NOTE: &str =
    "Final total including shipping / insurance will be confirmed with you before the piece ships.";

/// Note shown under the checkout summary.
pub const SUMMARY_SHIPPING_NOTE: &str = "Shipping and any extras (insurance, signature, etc.) will be confirmed with you after you send your shipping info.";

// =============================================================================
// Cart table
// =============================================================================

/// One row of the editable cart table.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub decrement: Control,
    pub increment: Control,
    pub remove: Control,
}

/// Display data for the editable cart.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub note: &'static str,
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        let change = |delta| CartAction::ChangeQuantity {
            id: item.id.clone(),
            delta,
        };

        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            category: item.category.clone(),
            quantity: item.quantity,
            price: item.price.to_string(),
            line_price: item.line_total().to_string(),
            decrement: Control::bind(&change(-1), "−", format!("One fewer {}", item.name)),
            increment: Control::bind(&change(1), "+", format!("One more {}", item.name)),
            remove: Control::bind(
                &CartAction::Remove {
                    id: item.id.clone(),
                },
                "x",
                format!("Remove {}", item.name),
            ),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            total: cart.grand_total().to_string(),
            note: CART_SHIPPING_NOTE,
        }
    }
}

/// Cart table fragment.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

// =============================================================================
// Checkout summary
// =============================================================================

/// One line of the checkout summary.
#[derive(Clone)]
pub struct SummaryLineView {
    pub quantity: u32,
    pub name: String,
    pub line_price: String,
}

/// Display data for the read-only checkout summary.
#[derive(Clone)]
pub struct CheckoutSummaryView {
    pub lines: Vec<SummaryLineView>,
    pub subtotal: String,
    pub note: &'static str,
}

impl From<&Cart> for CheckoutSummaryView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart
                .items()
                .iter()
                .map(|item| SummaryLineView {
                    quantity: item.quantity,
                    name: item.name.clone(),
                    line_price: item.line_total().to_string(),
                })
                .collect(),
            subtotal: cart.grand_total().to_string(),
            note: SUMMARY_SHIPPING_NOTE,
        }
    }
}

/// Checkout summary fragment.
#[derive(Template)]
#[template(path = "partials/checkout_summary.html")]
pub struct CheckoutSummaryTemplate {
    pub summary: CheckoutSummaryView,
}

// =============================================================================
// Nav badge
// =============================================================================

/// Cart count badge fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

// =============================================================================
// Render functions
// =============================================================================

/// Render the editable cart table.
///
/// # Errors
///
/// Returns an error if template rendering fails.
pub fn render_cart_items(cart: &Cart) -> askama::Result<String> {
    CartItemsTemplate {
        cart: CartView::from(cart),
    }
    .render()
}

/// Render the read-only checkout summary.
///
/// # Errors
///
/// Returns an error if template rendering fails.
pub fn render_checkout_summary(cart: &Cart) -> askama::Result<String> {
    CheckoutSummaryTemplate {
        summary: CheckoutSummaryView::from(cart),
    }
    .render()
}

/// Render the nav badge with the cart's total item count.
///
/// # Errors
///
/// Returns an error if template rendering fails.
pub fn render_nav_badge(cart: &Cart) -> askama::Result<String> {
    CartCountTemplate {
        count: cart.total_count(),
    }
    .render()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use weilglass_core::AddToCart;

    use super::*;

    fn cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(AddToCart::parse("A", "Vase", "10.00", "ceramics").unwrap());
        cart.add(AddToCart::parse("A", "Vase", "10.00", "ceramics").unwrap());
        cart.add(AddToCart::parse("B", "Bowl", "5.5", "glass").unwrap());
        cart
    }

    #[test]
    fn test_cart_view_formats_currency() {
        let view = CartView::from(&cart());
        assert_eq!(view.total, "$25.50");
        assert_eq!(view.items[0].price, "$10.00");
        assert_eq!(view.items[0].line_price, "$20.00");
        assert_eq!(view.items[1].line_price, "$5.50");
    }

    #[test]
    fn test_cart_view_controls_capture_item_id() {
        let view = CartView::from(&cart());
        let row = &view.items[1];

        assert_eq!(row.decrement.endpoint, "/cart/update");
        assert_eq!(row.decrement.values, r#"{"delta":-1,"id":"B"}"#);
        assert_eq!(row.increment.values, r#"{"delta":1,"id":"B"}"#);
        assert_eq!(row.remove.endpoint, "/cart/remove");
        assert_eq!(row.remove.values, r#"{"id":"B"}"#);
    }

    #[test]
    fn test_render_cart_items() {
        let html = render_cart_items(&cart()).unwrap();
        assert!(html.contains("<table class=\"cart-table\">"));
        assert!(html.contains("Vase"));
        assert!(html.contains("ceramics"));
        assert!(html.contains("$25.50"));
        assert!(html.contains("hx-post=\"/cart/update\""));
        assert!(!html.contains("Your cart is empty."));
    }

    #[test]
    fn test_render_empty_cart_items() {
        let html = render_cart_items(&Cart::new()).unwrap();
        assert!(html.contains("Your cart is empty."));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn test_render_checkout_summary() {
        let html = render_checkout_summary(&cart()).unwrap();
        assert!(html.contains("Order Summary"));
        assert!(html.contains("2 × Vase"));
        assert!(html.contains("1 × Bowl"));
        assert!(html.contains("Subtotal:"));
        assert!(html.contains("$25.50"));
        assert!(!html.contains("hx-post"));
    }

    #[test]
    fn test_render_empty_checkout_summary() {
        let html = render_checkout_summary(&Cart::new()).unwrap();
        assert!(html.contains("Your cart is empty. Go back to the store to add items."));
        assert!(!html.contains("Order Summary"));
    }

    #[test]
    fn test_render_nav_badge() {
        assert!(render_nav_badge(&cart()).unwrap().contains('3'));
        assert!(render_nav_badge(&Cart::new()).unwrap().contains('0'));
    }

    #[test]
    fn test_markup_in_names_is_escaped() {
        let mut cart = Cart::new();
        cart.add(AddToCart::parse("X", "<b>Bold</b>", "1", "glass").unwrap());

        let html = render_cart_items(&cart).unwrap();
        assert!(!html.contains("<b>Bold</b>"));
        assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt;"));
    }
}
