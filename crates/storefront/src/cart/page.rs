//! Render targets and the page controller.
//!
//! A [`Page`] holds the render targets present on the page being served.
//! The [`PageController`] renders every cart view into whichever of those
//! targets exist, both on load and after each mutation. A view whose target
//! is absent is skipped without error: that view simply is not on this page.

use std::collections::BTreeMap;

use serde::Deserialize;
use weilglass_core::{Cart, QuantityChange};

use super::action::CartAction;
use super::model::CartModel;
use super::prompt::Prompter;
use super::storage::Storage;
use super::views;

/// Element IDs the cart views render into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetId {
    /// Item count in the navigation bar.
    CartCount,
    /// Editable cart table on the cart page.
    CartItems,
    /// Read-only order summary on the checkout page.
    CheckoutSummary,
}

impl TargetId {
    /// The DOM element ID.
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::CartCount => "cart-count",
            Self::CartItems => "cart-items",
            Self::CheckoutSummary => "checkout-summary",
        }
    }
}

/// Pages that host cart views.
///
/// Posted with every cart action so the response re-renders the views on the
/// page the action came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    /// Catalog page with add-to-cart buttons.
    #[default]
    Store,
    /// Cart page with the editable table.
    Cart,
    /// Checkout page with the order summary.
    Checkout,
}

impl PageKind {
    /// Render targets present on this page.
    #[must_use]
    pub const fn targets(self) -> &'static [TargetId] {
        match self {
            Self::Store => &[TargetId::CartCount],
            Self::Cart => &[TargetId::CartCount, TargetId::CartItems],
            Self::Checkout => &[TargetId::CartCount, TargetId::CheckoutSummary],
        }
    }

    /// Value sent in the `page` form field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Store => "store",
            Self::Cart => "cart",
            Self::Checkout => "checkout",
        }
    }
}

/// The render targets of one page and their current content.
#[derive(Debug, Clone, Default)]
pub struct Page {
    targets: BTreeMap<TargetId, String>,
}

impl Page {
    /// A page hosting the targets of `kind`, all empty.
    #[must_use]
    pub fn new(kind: PageKind) -> Self {
        Self::with_targets(kind.targets().iter().copied())
    }

    /// A page hosting exactly `targets`, all empty.
    #[must_use]
    pub fn with_targets(targets: impl IntoIterator<Item = TargetId>) -> Self {
        Self {
            targets: targets.into_iter().map(|t| (t, String::new())).collect(),
        }
    }

    /// Whether the page hosts `target`.
    #[must_use]
    pub fn has_target(&self, target: TargetId) -> bool {
        self.targets.contains_key(&target)
    }

    /// Content of `target`, or `None` if the page does not host it.
    #[must_use]
    pub fn content(&self, target: TargetId) -> Option<&str> {
        self.targets.get(&target).map(String::as_str)
    }

    /// Content of `target`, or an empty string if the page does not host it.
    #[must_use]
    pub fn content_or_empty(&self, target: TargetId) -> String {
        self.content(target).unwrap_or_default().to_owned()
    }

    /// Every hosted target with its content.
    pub fn targets(&self) -> impl Iterator<Item = (TargetId, &str)> {
        self.targets.iter().map(|(t, html)| (*t, html.as_str()))
    }

    fn target_mut(&mut self, target: TargetId) -> Option<&mut String> {
        self.targets.get_mut(&target)
    }
}

/// A cart view: the target it renders into and how it renders.
type View = (TargetId, fn(&Cart) -> askama::Result<String>);

const VIEWS: [View; 3] = [
    (TargetId::CartCount, views::render_nav_badge),
    (TargetId::CartItems, views::render_cart_items),
    (TargetId::CheckoutSummary, views::render_checkout_summary),
];

/// What a dispatched action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    /// An item was added; its quantity is now this.
    Added { quantity: u32 },
    /// A quantity change was applied, or `None` for an unknown item.
    QuantityChanged(Option<QuantityChange>),
    /// A remove ran; `true` if the item was in the cart.
    Removed(bool),
    /// The cart was cleared.
    Cleared,
    /// The user declined to clear the cart.
    ClearDeclined,
}

/// Drives the cart views of one page.
#[derive(Debug)]
pub struct PageController<S> {
    model: CartModel<S>,
    page: Page,
}

impl<S: Storage> PageController<S> {
    /// Create a controller for `page` backed by `model`.
    pub const fn new(model: CartModel<S>, page: Page) -> Self {
        Self { model, page }
    }

    /// Render every view whose target is on the page.
    ///
    /// # Errors
    ///
    /// Returns an error if a template fails to render.
    pub fn on_load(&mut self) -> askama::Result<()> {
        self.render_views()
    }

    /// Run `action`, then re-render the views on the page.
    ///
    /// # Errors
    ///
    /// Returns an error if a template fails to render. The action itself has
    /// already been applied by then.
    pub fn dispatch(
        &mut self,
        action: CartAction,
        prompts: &mut impl Prompter,
    ) -> askama::Result<Dispatched> {
        let outcome = match action {
            CartAction::Add(command) => Dispatched::Added {
                quantity: self.model.add(command, prompts),
            },
            CartAction::ChangeQuantity { id, delta } => {
                Dispatched::QuantityChanged(self.model.change_quantity(&id, delta))
            }
            CartAction::Remove { id } => Dispatched::Removed(self.model.remove(&id)),
            CartAction::Clear => {
                if self.model.clear(prompts) {
                    Dispatched::Cleared
                } else {
                    Dispatched::ClearDeclined
                }
            }
        };

        self.render_views()?;
        Ok(outcome)
    }

    /// The page and its rendered targets.
    pub const fn page(&self) -> &Page {
        &self.page
    }

    /// The cart model.
    pub const fn model(&self) -> &CartModel<S> {
        &self.model
    }

    /// Split into the model and the rendered page.
    pub fn into_parts(self) -> (CartModel<S>, Page) {
        (self.model, self.page)
    }

    fn render_views(&mut self) -> askama::Result<()> {
        let cart = self.model.cart();

        for (target, render) in VIEWS {
            if let Some(slot) = self.page.target_mut(target) {
                *slot = render(&cart)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use weilglass_core::{AddToCart, ItemId};

    use super::*;
    use crate::cart::prompt::{ADDED_TO_CART, AnsweredPrompts};
    use crate::cart::storage::MemoryStorage;
    use crate::cart::store::{CART_KEY, CartStore};

    fn controller(kind: PageKind, storage: MemoryStorage) -> PageController<MemoryStorage> {
        PageController::new(CartModel::new(CartStore::new(storage)), Page::new(kind))
    }

    fn add_vase() -> CartAction {
        CartAction::Add(AddToCart::parse("A", "Vase", "10.00", "ceramics").unwrap())
    }

    #[test]
    fn test_page_targets_by_kind() {
        let store = Page::new(PageKind::Store);
        assert!(store.has_target(TargetId::CartCount));
        assert!(!store.has_target(TargetId::CartItems));
        assert!(!store.has_target(TargetId::CheckoutSummary));

        let checkout = Page::new(PageKind::Checkout);
        assert!(checkout.has_target(TargetId::CheckoutSummary));
        assert!(!checkout.has_target(TargetId::CartItems));
    }

    #[test]
    fn test_on_load_renders_empty_state_into_present_targets() {
        let mut cart_page = controller(PageKind::Cart, MemoryStorage::new());
        cart_page.on_load().unwrap();
        let page = cart_page.page();
        assert!(page.content(TargetId::CartCount).unwrap().contains('0'));
        assert!(
            page.content(TargetId::CartItems)
                .unwrap()
                .contains("Your cart is empty.")
        );
        assert_eq!(page.content(TargetId::CheckoutSummary), None);

        let mut checkout = controller(PageKind::Checkout, MemoryStorage::new());
        checkout.on_load().unwrap();
        assert!(
            checkout
                .page()
                .content(TargetId::CheckoutSummary)
                .unwrap()
                .contains("Go back to the store")
        );
    }

    #[test]
    fn test_page_without_targets_renders_nothing() {
        let model = CartModel::new(CartStore::new(MemoryStorage::new()));
        let mut controller = PageController::new(model, Page::default());

        controller.on_load().unwrap();
        controller
            .dispatch(add_vase(), &mut AnsweredPrompts::default())
            .unwrap();

        assert_eq!(controller.page().targets().count(), 0);
        assert_eq!(controller.model().total_count(), 1);
    }

    #[test]
    fn test_dispatch_add_rerenders_badge() {
        let mut controller = controller(PageKind::Store, MemoryStorage::new());
        let mut prompts = AnsweredPrompts::default();

        controller.dispatch(add_vase(), &mut prompts).unwrap();
        let outcome = controller.dispatch(add_vase(), &mut prompts).unwrap();

        assert_eq!(outcome, Dispatched::Added { quantity: 2 });
        assert_eq!(prompts.notices(), [ADDED_TO_CART, ADDED_TO_CART]);
        assert!(
            controller
                .page()
                .content(TargetId::CartCount)
                .unwrap()
                .contains('2')
        );
    }

    #[test]
    fn test_dispatch_decrement_removes_row() {
        let mut controller = controller(PageKind::Cart, MemoryStorage::new());
        let mut prompts = AnsweredPrompts::default();
        controller.dispatch(add_vase(), &mut prompts).unwrap();
        assert!(
            controller
                .page()
                .content(TargetId::CartItems)
                .unwrap()
                .contains("Vase")
        );

        let decrement = CartAction::ChangeQuantity {
            id: ItemId::from("A"),
            delta: -1,
        };
        let outcome = controller.dispatch(decrement.clone(), &mut prompts).unwrap();
        assert_eq!(
            outcome,
            Dispatched::QuantityChanged(Some(QuantityChange::Removed))
        );
        assert!(
            controller
                .page()
                .content(TargetId::CartItems)
                .unwrap()
                .contains("Your cart is empty.")
        );

        let outcome = controller.dispatch(decrement, &mut prompts).unwrap();
        assert_eq!(outcome, Dispatched::QuantityChanged(None));
    }

    #[test]
    fn test_dispatch_remove_jumps_straight_to_removed() {
        let storage = MemoryStorage::new().with_item(
            CART_KEY,
            r#"[{"id":"A","name":"Vase","price":10,"category":"ceramics","quantity":7}]"#,
        );
        let mut controller = controller(PageKind::Checkout, storage);

        let outcome = controller
            .dispatch(
                CartAction::Remove {
                    id: ItemId::from("A"),
                },
                &mut AnsweredPrompts::default(),
            )
            .unwrap();

        assert_eq!(outcome, Dispatched::Removed(true));
        assert_eq!(controller.model().total_count(), 0);
    }

    #[test]
    fn test_dispatch_clear_respects_answer() {
        let mut controller = controller(PageKind::Checkout, MemoryStorage::new());
        controller
            .dispatch(add_vase(), &mut AnsweredPrompts::default())
            .unwrap();

        let declined = controller
            .dispatch(CartAction::Clear, &mut AnsweredPrompts::new(false))
            .unwrap();
        assert_eq!(declined, Dispatched::ClearDeclined);
        assert!(
            controller
                .page()
                .content(TargetId::CheckoutSummary)
                .unwrap()
                .contains("1 × Vase")
        );

        let cleared = controller
            .dispatch(CartAction::Clear, &mut AnsweredPrompts::new(true))
            .unwrap();
        assert_eq!(cleared, Dispatched::Cleared);
        assert!(
            controller
                .page()
                .content(TargetId::CheckoutSummary)
                .unwrap()
                .contains("Your cart is empty.")
        );
    }

    #[test]
    fn test_page_kind_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Form {
            page: PageKind,
        }

        let form: Form = serde_json::from_str(r#"{"page":"checkout"}"#).unwrap();
        assert_eq!(form.page, PageKind::Checkout);
        assert_eq!(PageKind::Checkout.as_str(), "checkout");
    }
}
