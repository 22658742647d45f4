//! Checkout page route handler.
//!
//! Checkout is a read-only summary of the stored cart plus a way to clear it.
//! Placing orders happens outside the storefront.

use askama::Template;
use askama_web::WebTemplate;
use tower_sessions::Session;
use tracing::instrument;

use crate::cart::action::Control;
use crate::cart::prompt::CLEAR_CART_QUESTION;
use crate::cart::{CartAction, Page, PageKind, TargetId};
use crate::error::Result;
use crate::filters;
use crate::routes::cart::render_page;

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutShowTemplate {
    pub nav_badge: String,
    pub checkout_summary: String,
    pub clear: Control,
    pub page: &'static str,
}

/// Control that asks before clearing the cart.
#[must_use]
pub fn clear_control() -> Control {
    Control::bind(&CartAction::Clear, "Clear cart", "Clear cart from this device")
        .confirming(CLEAR_CART_QUESTION)
}

/// Display the checkout page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<CheckoutShowTemplate> {
    let page = render_page(&session, Page::new(PageKind::Checkout)).await?;

    Ok(CheckoutShowTemplate {
        nav_badge: page.content_or_empty(TargetId::CartCount),
        checkout_summary: page.content_or_empty(TargetId::CheckoutSummary),
        clear: clear_control(),
        page: PageKind::Checkout.as_str(),
    })
}
