//! Static page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{http::StatusCode, response::IntoResponse};
use tracing::instrument;

use crate::filters;

/// Checkout confirmation page template.
///
/// There is no payment processing; checkout is a static thank-you page.
#[derive(Template, WebTemplate)]
#[template(path = "pages/checkout.html")]
pub struct CheckoutTemplate;

/// Not-found page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/not_found.html")]
pub struct NotFoundTemplate;

/// Display the checkout confirmation page.
#[instrument]
pub async fn checkout() -> CheckoutTemplate {
    CheckoutTemplate
}

/// Catch-all 404 page.
#[instrument]
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, NotFoundTemplate)
}
