//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page
//! reloads. Every handler re-reads the cart cookie, applies one pure
//! cart operation, and writes the cookie back on the response - the
//! cookie is the only copy of the cart anywhere.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use marigold_core::{Cart, Price, ProductId, ProductSummary};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use crate::cart_cookie;
use crate::filters;
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub title: String,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
    pub image: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| CartItemView {
                    id: item.id.to_string(),
                    title: item.title.clone(),
                    quantity: item.quantity,
                    price: item.price.display(),
                    line_total: item.line_total().display(),
                    image: item.image.clone(),
                })
                .collect(),
            total: cart.total().display(),
            item_count: cart.item_count(),
        }
    }
}

/// Add to cart form data: the product summary captured at click time.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub id: i64,
    pub title: String,
    pub price: Decimal,
    pub image: String,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub id: i64,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub id: i64,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Display cart page.
#[instrument(skip(jar))]
pub async fn show(jar: CookieJar) -> CartShowTemplate {
    let cart = cart_cookie::read(&jar);
    CartShowTemplate {
        cart: CartView::from(&cart),
    }
}

/// Add item to cart (HTMX).
///
/// Returns the count badge with an HTMX trigger so other fragments can
/// refresh themselves.
#[instrument(skip(state, jar, form))]
pub async fn add(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<AddToCartForm>,
) -> Response {
    let mut cart = cart_cookie::read(&jar);
    cart.add(ProductSummary {
        id: ProductId::new(form.id),
        title: form.title,
        price: Price::new(form.price, marigold_core::CurrencyCode::USD),
        image: form.image,
    });

    let count = cart.item_count();
    let jar = cart_cookie::write(jar, &cart, state.config().is_secure());

    (
        jar,
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate { count },
    )
        .into_response()
}

/// Set cart item quantity (HTMX). A quantity of zero removes the line.
#[instrument(skip(state, jar))]
pub async fn update(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<UpdateCartForm>,
) -> Response {
    let mut cart = cart_cookie::read(&jar);
    cart.set_quantity(ProductId::new(form.id), form.quantity);

    let view = CartView::from(&cart);
    let jar = cart_cookie::write(jar, &cart, state.config().is_secure());

    (
        jar,
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate { cart: view },
    )
        .into_response()
}

/// Remove item from cart (HTMX).
#[instrument(skip(state, jar))]
pub async fn remove(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    let mut cart = cart_cookie::read(&jar);
    if let Some(removed) = cart.remove(ProductId::new(form.id)) {
        tracing::debug!(title = %removed.title, "Removed line from cart");
    }

    let view = CartView::from(&cart);
    let jar = cart_cookie::write(jar, &cart, state.config().is_secure());

    (
        jar,
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate { cart: view },
    )
        .into_response()
}

/// Get cart count badge (HTMX).
#[instrument(skip(jar))]
pub async fn count(jar: CookieJar) -> CartCountTemplate {
    let cart = cart_cookie::read(&jar);
    CartCountTemplate {
        count: cart.item_count(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn cart_with_lines() -> Cart {
        let mut cart = Cart::default();
        let backpack = ProductSummary {
            id: ProductId::new(1),
            title: "Backpack".to_string(),
            price: Price::from_cents(1000),
            image: "https://cdn.example.com/1.jpg".to_string(),
        };
        cart.add(backpack.clone());
        cart.add(backpack);
        cart.add(ProductSummary {
            id: ProductId::new(2),
            title: "Mug".to_string(),
            price: Price::from_cents(500),
            image: "https://cdn.example.com/2.jpg".to_string(),
        });
        cart
    }

    #[test]
    fn test_cart_view_totals_and_line_totals() {
        let view = CartView::from(&cart_with_lines());

        assert_eq!(view.items.len(), 2);
        assert_eq!(view.item_count, 3);
        assert_eq!(view.items[0].line_total, "$20.00");
        assert_eq!(view.items[1].line_total, "$5.00");
        assert_eq!(view.total, "$25.00");
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::from(&Cart::default());
        assert!(view.items.is_empty());
        assert_eq!(view.item_count, 0);
        assert_eq!(view.total, "$0.00");
    }

    #[test]
    fn test_add_form_parses_decimal_price() {
        let form: AddToCartForm = serde_urlencoded_form(
            "id=1&title=Backpack&price=109.95&image=https%3A%2F%2Fcdn.example.com%2F1.jpg",
        );
        assert_eq!(form.price, Decimal::new(10995, 2));
        assert_eq!(form.title, "Backpack");
    }

    fn serde_urlencoded_form<T: serde::de::DeserializeOwned>(body: &str) -> T {
        serde_urlencoded::from_str(body).unwrap()
    }
}
