//! Cart persistence in a client-held cookie.
//!
//! The `cart` cookie carries a base64-encoded JSON array of cart line
//! items. The cookie is the sole source of truth: every mutation handler
//! decodes it, applies one pure `Cart` operation, and writes it back on
//! the response. There is no server copy and no cross-tab coordination -
//! concurrent requests overwrite each other, last write wins.
//!
//! Decoding is best-effort: any malformed blob yields an empty cart.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use marigold_core::Cart;
use thiserror::Error;

/// Cart cookie name.
pub const CART_COOKIE_NAME: &str = "cart";

/// Errors from decoding a cart cookie value.
#[derive(Debug, Error)]
pub enum CartCookieError {
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode a cart into a cookie-safe value.
#[must_use]
pub fn encode(cart: &Cart) -> String {
    // Serializing Vec<CartItem> cannot fail; fall back to an empty array
    // rather than panicking if it somehow does.
    let json = serde_json::to_vec(cart).unwrap_or_else(|_| b"[]".to_vec());
    URL_SAFE_NO_PAD.encode(json)
}

/// Decode a cookie value back into a cart.
///
/// Lines with a zero quantity are dropped; the cart never holds them,
/// but the cookie is client-held and could claim anything.
///
/// # Errors
///
/// Returns an error if the value is not base64-encoded JSON cart items.
pub fn decode(value: &str) -> Result<Cart, CartCookieError> {
    let json = URL_SAFE_NO_PAD.decode(value)?;
    let cart: Cart = serde_json::from_slice(&json)?;
    Ok(Cart::from_items(
        cart.items()
            .iter()
            .filter(|item| item.quantity > 0)
            .cloned()
            .collect(),
    ))
}

/// Read the cart from the request's cookie jar.
///
/// A missing or malformed cookie yields an empty cart.
#[must_use]
pub fn read(jar: &CookieJar) -> Cart {
    let Some(cookie) = jar.get(CART_COOKIE_NAME) else {
        return Cart::default();
    };
    match decode(cookie.value()) {
        Ok(cart) => cart,
        Err(e) => {
            tracing::warn!(error = %e, "Malformed cart cookie, starting from empty");
            Cart::default()
        }
    }
}

/// Write the cart back into the jar for the response.
///
/// The cookie persists across sessions; `secure` should reflect whether
/// the storefront is served over HTTPS.
#[must_use]
pub fn write(jar: CookieJar, cart: &Cart, secure: bool) -> CookieJar {
    let cookie = Cookie::build((CART_COOKIE_NAME, encode(cart)))
        .path("/")
        .same_site(SameSite::Lax)
        .http_only(true)
        .secure(secure)
        .permanent()
        .build();
    jar.add(cookie)
}
