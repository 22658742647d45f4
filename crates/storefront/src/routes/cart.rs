//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart lives in the visitor's session under [`CART_KEY`]; each request
//! snapshots that slot, runs one cart operation synchronously, and writes the
//! result back.
//!
//! Mutations respond with out-of-band fragments for every cart view on the
//! page named in the `page` form field, so the cart table, the checkout
//! summary and the nav badge stay in step with the stored cart.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;
use tracing::instrument;
use weilglass_core::{AddToCart, ItemId};

use crate::cart::{
    AnsweredPrompts, CART_KEY, CartAction, CartModel, CartStore, Page, PageController, PageKind,
    SessionStorage, TargetId,
};
use crate::error::Result;
use crate::filters;

/// HTMX event fired after every cart mutation.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// HTMX event carrying a user notification.
pub const CART_NOTICE_EVENT: &str = "cart-notice";

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data (the control's string attributes).
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub id: String,
    pub name: String,
    pub price: String,
    pub category: String,
    #[serde(default)]
    pub page: PageKind,
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub id: String,
    pub delta: i32,
    #[serde(default)]
    pub page: PageKind,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub id: String,
    #[serde(default)]
    pub page: PageKind,
}

/// Clear cart form data.
///
/// `confirmed` is set once the browser's `hx-confirm` dialog was accepted.
#[derive(Debug, Deserialize)]
pub struct ClearCartForm {
    #[serde(default)]
    pub confirmed: bool,
    #[serde(default)]
    pub page: PageKind,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub nav_badge: String,
    pub cart_items: String,
    pub page: &'static str,
}

/// One re-rendered target in a mutation response.
pub struct RenderedTarget {
    pub element_id: &'static str,
    pub html: String,
}

/// Out-of-band fragments for every target on the page (for HTMX).
#[derive(Template)]
#[template(path = "partials/oob_targets.html")]
pub struct CartFragmentsTemplate {
    pub targets: Vec<RenderedTarget>,
}

impl From<&Page> for CartFragmentsTemplate {
    fn from(page: &Page) -> Self {
        Self {
            targets: page
                .targets()
                .map(|(target, html)| RenderedTarget {
                    element_id: target.element_id(),
                    html: html.to_owned(),
                })
                .collect(),
        }
    }
}

// =============================================================================
// Page Helpers
// =============================================================================

/// Render the cart views hosted by `page` from the session's cart.
pub async fn render_page(session: &Session, page: Page) -> Result<Page> {
    let storage = SessionStorage::load(session, &[CART_KEY]).await;
    let mut controller = PageController::new(CartModel::new(CartStore::new(storage)), page);
    controller.on_load()?;
    Ok(controller.into_parts().1)
}

/// Apply `action` to the session's cart and answer with refreshed fragments.
async fn apply(
    session: &Session,
    kind: PageKind,
    action: CartAction,
    mut prompts: AnsweredPrompts,
) -> Result<Response> {
    let storage = SessionStorage::load(session, &[CART_KEY]).await;
    let mut controller = PageController::new(
        CartModel::new(CartStore::new(storage)),
        Page::new(kind),
    );

    let result = controller.dispatch(action, &mut prompts);

    // Persist before surfacing a render failure: the mutation already happened.
    let (model, page) = controller.into_parts();
    model.into_store().into_storage().flush(session).await;

    let outcome = result?;
    tracing::info!(?outcome, page = kind.as_str(), "Cart action applied");

    let body = CartFragmentsTemplate::from(&page).render()?;
    Ok((
        AppendHeaders([("HX-Trigger", hx_trigger(prompts.notices()))]),
        Html(body),
    )
        .into_response())
}

/// `HX-Trigger` header value for a mutation response.
fn hx_trigger(notices: &[String]) -> String {
    match notices.last() {
        Some(message) => json!({
            CART_UPDATED_EVENT: null,
            CART_NOTICE_EVENT: { "message": message },
        })
        .to_string(),
        None => CART_UPDATED_EVENT.to_string(),
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<CartShowTemplate> {
    let page = render_page(&session, Page::new(PageKind::Cart)).await?;

    Ok(CartShowTemplate {
        nav_badge: page.content_or_empty(TargetId::CartCount),
        cart_items: page.content_or_empty(TargetId::CartItems),
        page: PageKind::Cart.as_str(),
    })
}

/// Add item to cart (HTMX).
///
/// Rejects unusable attributes with 400 before touching the cart.
#[instrument(skip(session))]
pub async fn add(session: Session, Form(form): Form<AddToCartForm>) -> Result<Response> {
    let command = AddToCart::parse(&form.id, &form.name, &form.price, &form.category)?;
    apply(
        &session,
        form.page,
        CartAction::Add(command),
        AnsweredPrompts::default(),
    )
    .await
}

/// Change an item's quantity by a signed delta (HTMX).
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Result<Response> {
    let action = CartAction::ChangeQuantity {
        id: ItemId::from(form.id),
        delta: form.delta,
    };
    apply(&session, form.page, action, AnsweredPrompts::default()).await
}

/// Remove an item regardless of quantity (HTMX).
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Response> {
    let action = CartAction::Remove {
        id: ItemId::from(form.id),
    };
    apply(&session, form.page, action, AnsweredPrompts::default()).await
}

/// Clear the cart if the user confirmed (HTMX).
#[instrument(skip(session))]
pub async fn clear(session: Session, Form(form): Form<ClearCartForm>) -> Result<Response> {
    apply(
        &session,
        form.page,
        CartAction::Clear,
        AnsweredPrompts::new(form.confirmed),
    )
    .await
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<Html<String>> {
    let page = render_page(&session, Page::with_targets([TargetId::CartCount])).await?;
    Ok(Html(page.content_or_empty(TargetId::CartCount)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hx_trigger_without_notice() {
        assert_eq!(hx_trigger(&[]), "cart-updated");
    }

    #[test]
    fn test_hx_trigger_with_notice() {
        let value: serde_json::Value =
            serde_json::from_str(&hx_trigger(&["Added to cart.".to_string()])).unwrap();
        assert_eq!(value["cart-notice"]["message"], "Added to cart.");
        assert!(value.get("cart-updated").is_some());
    }

    #[test]
    fn test_fragments_cover_page_targets() {
        let page = Page::new(PageKind::Checkout);
        let fragments = CartFragmentsTemplate::from(&page);
        let ids: Vec<_> = fragments.targets.iter().map(|t| t.element_id).collect();
        assert_eq!(ids, ["cart-count", "checkout-summary"]);

        let html = fragments.render().unwrap();
        assert!(html.contains(r#"id="checkout-summary" hx-swap-oob="innerHTML""#));
    }
}
