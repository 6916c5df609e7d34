//! Shop page route handler.
//!
//! The shop page is the catalog listing plus the search bar. When a
//! search is active the same template renders whatever the search
//! produced instead of the full collection (see `routes::search`).

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use marigold_core::Product;
use tracing::instrument;

use crate::filters;
use crate::state::AppState;
use crate::translate::{DEFAULT_LANGUAGE, LANGUAGES, Language};

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Formatted for display, e.g. "$109.95".
    pub price: String,
    /// Raw decimal amount, carried through the add-to-cart form.
    pub price_amount: String,
    pub image: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            price: product.price.display(),
            price_amount: product.price.amount.to_string(),
            image: product.image.clone(),
        }
    }
}

/// Shop page template: catalog grid plus search bar.
#[derive(Template, WebTemplate)]
#[template(path = "shop/index.html")]
pub struct ShopIndexTemplate {
    pub products: Vec<ProductCardView>,
    /// The active search query, empty when browsing the full catalog.
    pub query: String,
    /// The selected translation language name.
    pub translate_to: String,
    /// Whether the grid shows search results rather than the catalog.
    pub searching: bool,
    /// Set when the catalog fetch failed; renders an error panel.
    pub error: Option<String>,
    pub languages: &'static [Language],
}

impl ShopIndexTemplate {
    /// Template for a plain (non-searching) catalog view.
    #[must_use]
    pub fn catalog(products: Vec<ProductCardView>, error: Option<String>) -> Self {
        Self {
            products,
            query: String::new(),
            translate_to: DEFAULT_LANGUAGE.to_string(),
            searching: false,
            error,
            languages: LANGUAGES,
        }
    }
}

/// Display the shop page with the full product collection.
///
/// A catalog failure renders an error panel in place of the grid - the
/// page itself always loads.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> ShopIndexTemplate {
    match state.catalog().get_products().await {
        Ok(products) => {
            let cards = products.iter().map(ProductCardView::from).collect();
            ShopIndexTemplate::catalog(cards, None)
        }
        Err(e) => {
            sentry::capture_error(&e);
            tracing::error!(error = %e, "Failed to fetch catalog");
            ShopIndexTemplate::catalog(Vec::new(), Some(e.to_string()))
        }
    }
}
