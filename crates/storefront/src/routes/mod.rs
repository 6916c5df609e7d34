//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                - Shop page (full catalog)
//! GET  /health          - Health check
//!
//! # Search
//! GET  /search          - Shop page filtered by query, optionally translated
//! GET  /search/suggest  - Suggestion fragment backed by the remote search (HTMX)
//!
//! # Cart (HTMX fragments)
//! GET  /cart            - Cart page
//! POST /cart/add        - Add to cart (returns count badge, triggers cart-updated)
//! POST /cart/update     - Set quantity (returns cart_items fragment)
//! POST /cart/remove     - Remove item (returns cart_items fragment)
//! GET  /cart/count      - Cart count badge (fragment)
//!
//! # Pages
//! GET  /checkout        - Static order confirmation
//! *                     - Not-found page (fallback)
//! ```

pub mod cart;
pub mod pages;
pub mod search;
pub mod shop;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the search routes router.
pub fn search_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(search::search_page))
        .route("/suggest", get(search::suggest))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(shop::index))
        .nest("/search", search_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", get(pages::checkout))
        .fallback(pages::not_found)
}
