//! Store page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;
use tracing::instrument;

use crate::cart::{Page, PageKind, TargetId};
use crate::catalog::ProductView;
use crate::error::Result;
use crate::filters;
use crate::routes::cart::render_page;
use crate::state::AppState;

/// Store page template.
#[derive(Template, WebTemplate)]
#[template(path = "store/index.html")]
pub struct StoreTemplate {
    pub nav_badge: String,
    pub products: Vec<ProductView>,
    pub page: &'static str,
}

/// Display the store page with every catalog product.
#[instrument(skip(state, session))]
pub async fn index(State(state): State<AppState>, session: Session) -> Result<StoreTemplate> {
    let page = render_page(&session, Page::new(PageKind::Store)).await?;
    let products = state
        .catalog()
        .products()
        .iter()
        .map(ProductView::from)
        .collect();

    Ok(StoreTemplate {
        nav_badge: page.content_or_empty(TargetId::CartCount),
        products,
        page: PageKind::Store.as_str(),
    })
}
