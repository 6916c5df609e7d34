//! Search route handlers.
//!
//! The full search page re-fetches the product collection and filters it
//! here, by case-insensitive substring over title, description, and
//! category; the suggestion fragment instead passes the term to the
//! catalog's own `?search=` query. When a non-default language is
//! selected, matched items are translated before rendering.
//!
//! Each search is an independent request/response pair; there is no
//! shared search state on the server, so a slow response cannot clobber
//! the results of a newer query.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use marigold_core::Product;
use serde::Deserialize;
use tracing::instrument;

use crate::routes::shop::{ProductCardView, ShopIndexTemplate};
use crate::state::AppState;
use crate::translate::{DEFAULT_LANGUAGE, LANGUAGES, find_language, translate_products};

/// Full search page query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchPageQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub translate_to: String,
}

/// Search suggestions query parameters.
#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
}

/// Search suggestions template (HTMX fragment).
#[derive(Template, WebTemplate)]
#[template(path = "partials/search_suggest.html")]
pub struct SearchSuggestTemplate {
    pub products: Vec<ProductCardView>,
}

/// Keep products whose title, description, or category contains the
/// query, case-insensitively.
#[must_use]
pub fn filter_products(products: &[Product], query: &str) -> Vec<Product> {
    let query = query.to_lowercase();
    products
        .iter()
        .filter(|product| {
            product.title.to_lowercase().contains(&query)
                || product.description.to_lowercase().contains(&query)
                || product.category.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

/// Full search page.
///
/// An empty (or whitespace) query clears search state and renders the
/// plain catalog view. A query matching nothing renders an empty result
/// set without error; so does a catalog failure mid-search.
#[instrument(skip(state))]
pub async fn search_page(
    State(state): State<AppState>,
    Query(query): Query<SearchPageQuery>,
) -> ShopIndexTemplate {
    let term = query.q.trim().to_lowercase();
    if term.is_empty() {
        return crate::routes::shop::index(State(state)).await;
    }

    let results = match state.catalog().get_products().await {
        Ok(products) => filter_products(&products, &term),
        Err(e) => {
            sentry::capture_error(&e);
            tracing::warn!(error = %e, "Catalog fetch failed during search");
            Vec::new()
        }
    };

    let translate_to = if find_language(&query.translate_to).is_some() {
        query.translate_to.clone()
    } else {
        DEFAULT_LANGUAGE.to_string()
    };

    let results = match find_language(&translate_to) {
        Some(lang) if lang.translate_code != "en" => {
            translate_products(state.translator(), results, lang.translate_code).await
        }
        _ => results,
    };

    ShopIndexTemplate {
        products: results.iter().map(ProductCardView::from).collect(),
        query: term,
        translate_to,
        searching: true,
        error: None,
        languages: LANGUAGES,
    }
}

/// Search suggestions endpoint (HTMX).
///
/// Backed by the catalog's raw `?search=` query; failures degrade to an
/// empty fragment.
#[instrument(skip(state))]
pub async fn suggest(
    State(state): State<AppState>,
    Query(query): Query<SuggestQuery>,
) -> SearchSuggestTemplate {
    let term = query.q.trim();
    if term.is_empty() {
        return SearchSuggestTemplate {
            products: Vec::new(),
        };
    }

    let products = match state.catalog().search_products(term).await {
        Ok(products) => products,
        Err(e) => {
            tracing::warn!(error = %e, "Suggestion search failed");
            Vec::new()
        }
    };

    SearchSuggestTemplate {
        products: products.iter().map(ProductCardView::from).collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::{Json, Router, routing::get};
    use marigold_core::{CurrencyCode, Price, ProductId};
    use rust_decimal::Decimal;

    use crate::config::StorefrontConfig;

    fn product(id: i64, title: &str, description: &str, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            price: Price::new(Decimal::new(999, 2), CurrencyCode::USD),
            description: description.to_string(),
            category: category.to_string(),
            image: String::new(),
        }
    }

    fn fixture() -> Vec<Product> {
        vec![
            product(1, "Fjallraven Backpack", "Your perfect pack", "men's clothing"),
            product(2, "Gold Petite Micropave", "Satisfaction guaranteed", "jewelery"),
            product(3, "Silicon Power SSD", "3D NAND flash", "electronics"),
        ]
    }

    /// Serve a two-product fixture catalog on an ephemeral local port.
    async fn stub_catalog() -> String {
        async fn products() -> Json<serde_json::Value> {
            Json(serde_json::json!([
                {
                    "id": 1,
                    "title": "Fjallraven Backpack",
                    "price": 109.95,
                    "description": "Your perfect pack",
                    "category": "men's clothing",
                    "image": "https://cdn.example.com/1.jpg"
                },
                {
                    "id": 2,
                    "title": "Gold Petite Micropave",
                    "price": 168.0,
                    "description": "Satisfaction guaranteed",
                    "category": "jewelery",
                    "image": "https://cdn.example.com/2.jpg"
                }
            ]))
        }

        let app = Router::new().route("/products", get(products));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn state_for(catalog_api_url: String) -> AppState {
        AppState::new(StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            base_url: "http://localhost:3000".to_string(),
            catalog_api_url,
            translate_api_url: None,
            sentry_dsn: None,
            sentry_environment: None,
        })
    }

    #[tokio::test]
    async fn test_blank_query_renders_the_plain_catalog_view() {
        let state = state_for(stub_catalog().await);
        let page = search_page(
            State(state),
            Query(SearchPageQuery {
                q: "   ".to_string(),
                translate_to: String::new(),
            }),
        )
        .await;

        assert!(!page.searching);
        assert!(page.query.is_empty());
        assert!(page.error.is_none());
        assert_eq!(page.products.len(), 2);
    }

    #[tokio::test]
    async fn test_search_term_filters_and_marks_searching() {
        let state = state_for(stub_catalog().await);
        let page = search_page(
            State(state),
            Query(SearchPageQuery {
                q: "Backpack".to_string(),
                translate_to: "english".to_string(),
            }),
        )
        .await;

        assert!(page.searching);
        assert_eq!(page.query, "backpack");
        assert_eq!(page.products.len(), 1);
        assert_eq!(page.products[0].title, "Fjallraven Backpack");
    }

    #[test]
    fn test_filter_matches_title_case_insensitively() {
        let results = filter_products(&fixture(), "backpack");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Fjallraven Backpack");
    }

    #[test]
    fn test_filter_matches_description_and_category() {
        assert_eq!(filter_products(&fixture(), "satisfaction").len(), 1);
        assert_eq!(filter_products(&fixture(), "electronics").len(), 1);
    }

    #[test]
    fn test_filter_no_match_yields_empty_without_error() {
        assert!(filter_products(&fixture(), "zzz no such product").is_empty());
    }

    #[test]
    fn test_filter_counts_a_product_once_across_fields() {
        // "pack" matches both the title and description of product 1
        assert_eq!(filter_products(&fixture(), "pack").len(), 1);
    }
}
