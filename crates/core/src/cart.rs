//! Cart line items and mutation rules.
//!
//! The cart is a plain list of line items keyed by product ID. It lives in
//! a client-held blob (the storefront serializes it into a cookie); this
//! module only defines the shape of the data and the mutations that every
//! handler applies between reading and re-writing that blob.
//!
//! Invariants:
//! - at most one line item per product ID
//! - quantities are positive; a quantity reaching zero removes the line

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Price, Product, ProductId};

/// The subset of a product captured when it is added to the cart.
///
/// The cart stores the summary as seen at the moment of the click; it is
/// never reconciled against the catalog afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
        }
    }
}

/// A locally persisted record of a product plus a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
    pub quantity: u32,
}

impl CartItem {
    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        Price::new(
            self.price.amount * Decimal::from(self.quantity),
            self.price.currency_code,
        )
    }
}

/// The shopping cart: an ordered list of line items.
///
/// Serializes transparently as a JSON array so the stored blob stays the
/// same shape a hand-written `[{id, title, price, image, quantity}, ...]`
/// would have.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create a cart from existing line items.
    #[must_use]
    pub fn from_items(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    /// The line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a product to the cart.
    ///
    /// Increments the quantity of an existing line with the same ID, or
    /// inserts a new line at quantity one.
    pub fn add(&mut self, summary: ProductSummary) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == summary.id) {
            item.quantity += 1;
        } else {
            self.items.push(CartItem {
                id: summary.id,
                title: summary.title,
                price: summary.price,
                image: summary.image,
                quantity: 1,
            });
        }
    }

    /// Remove the line item with the given ID.
    ///
    /// Returns the removed item, or `None` if no line matched.
    pub fn remove(&mut self, id: ProductId) -> Option<CartItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Set the quantity of the line item with the given ID.
    ///
    /// A quantity of zero removes the line. Unknown IDs are ignored.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.quantity = quantity;
        }
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of price times quantity over all lines.
    ///
    /// An empty cart totals zero USD.
    #[must_use]
    pub fn total(&self) -> Price {
        let currency_code = self
            .items
            .first()
            .map(|item| item.price.currency_code)
            .unwrap_or_default();
        let amount = self
            .items
            .iter()
            .map(|item| item.line_total().amount)
            .sum::<Decimal>();
        Price::new(amount, currency_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CurrencyCode;

    fn summary(id: i64, title: &str, cents: i64) -> ProductSummary {
        ProductSummary {
            id: ProductId::new(id),
            title: title.to_string(),
            price: Price::from_cents(cents),
            image: format!("https://cdn.example.com/{id}.jpg"),
        }
    }

    #[test]
    fn test_add_same_product_twice_increments_quantity() {
        let mut cart = Cart::default();
        cart.add(summary(1, "Backpack", 1099));
        cart.add(summary(1, "Backpack", 1099));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_add_distinct_products_creates_separate_lines() {
        let mut cart = Cart::default();
        cart.add(summary(1, "Backpack", 1099));
        cart.add(summary(2, "Jacket", 5599));

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::default();
        cart.add(summary(1, "Backpack", 1099));
        cart.set_quantity(ProductId::new(1), 0);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_updates_existing_line() {
        let mut cart = Cart::default();
        cart.add(summary(1, "Backpack", 1099));
        cart.set_quantity(ProductId::new(1), 5);

        assert_eq!(cart.items()[0].quantity, 5);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_set_quantity_unknown_id_is_a_no_op() {
        let mut cart = Cart::default();
        cart.add(summary(1, "Backpack", 1099));
        cart.set_quantity(ProductId::new(99), 3);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_remove_returns_the_removed_line() {
        let mut cart = Cart::default();
        cart.add(summary(1, "Backpack", 1099));

        let removed = cart.remove(ProductId::new(1)).expect("line exists");
        assert_eq!(removed.title, "Backpack");
        assert!(cart.is_empty());
        assert!(cart.remove(ProductId::new(1)).is_none());
    }

    #[test]
    fn test_total_is_sum_of_price_times_quantity() {
        // Two items at $10 qty 2 and $5 qty 1 -> total $25.00
        let mut cart = Cart::default();
        cart.add(summary(1, "Backpack", 1000));
        cart.add(summary(1, "Backpack", 1000));
        cart.add(summary(2, "Mug", 500));

        assert_eq!(cart.total().display(), "$25.00");
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_empty_cart_totals_zero() {
        let cart = Cart::default();
        assert_eq!(cart.total().display(), "$0.00");
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let mut cart = Cart::default();
        cart.add(summary(1, "Backpack", 1099));

        let json = serde_json::to_value(&cart).expect("serialize");
        assert!(json.is_array());
        assert_eq!(json.as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_line_total_uses_currency_of_line() {
        let item = CartItem {
            id: ProductId::new(1),
            title: "Backpack".to_string(),
            price: Price::new(Decimal::new(1050, 2), CurrencyCode::EUR),
            image: String::new(),
            quantity: 3,
        };
        assert_eq!(item.line_total().display(), "\u{20ac}31.50");
    }
}
