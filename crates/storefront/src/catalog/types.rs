//! Wire types for the remote catalog API.
//!
//! The API serves a flat JSON array of products. Fields we do not use
//! (e.g., the `rating` object) are tolerated and dropped on conversion.

use marigold_core::{CurrencyCode, Price, Product, ProductId};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::CatalogError;

/// A product record as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiProduct {
    pub id: i64,
    pub title: String,
    /// Price in dollars as a JSON number (e.g., 109.95).
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
}

impl ApiProduct {
    /// Convert the wire record into the domain `Product`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidPrice` if the price is not a finite
    /// representable decimal.
    pub fn into_product(self) -> Result<Product, CatalogError> {
        let amount = Decimal::try_from(self.price)
            .map_err(|_| CatalogError::InvalidPrice {
                id: self.id,
                price: self.price,
            })?
            .round_dp(2);

        Ok(Product {
            id: ProductId::new(self.id),
            title: self.title,
            price: Price::new(amount, CurrencyCode::USD),
            description: self.description,
            category: self.category,
            image: self.image,
        })
    }
}

/// Convert a wire response into domain products.
///
/// # Errors
///
/// Returns the first conversion error encountered.
pub fn convert_products(records: Vec<ApiProduct>) -> Result<Vec<Product>, CatalogError> {
    records
        .into_iter()
        .map(ApiProduct::into_product)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"[
        {
            "id": 1,
            "title": "Fjallraven Backpack",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        },
        {
            "id": 2,
            "title": "Mens Casual T-Shirt",
            "price": 22.3,
            "description": "Slim-fitting style",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/71-3HjGNDUL.jpg",
            "rating": { "rate": 4.1, "count": 259 }
        }
    ]"#;

    #[test]
    fn test_deserialize_tolerates_unused_fields() {
        let records: Vec<ApiProduct> = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Fjallraven Backpack");
    }

    #[test]
    fn test_conversion_preserves_price_precision() {
        let records: Vec<ApiProduct> = serde_json::from_str(FIXTURE).unwrap();
        let products = convert_products(records).unwrap();

        assert_eq!(products[0].price.display(), "$109.95");
        assert_eq!(products[1].price.display(), "$22.30");
        assert_eq!(products[0].id, ProductId::new(1));
    }

    #[test]
    fn test_non_finite_price_is_rejected() {
        let record = ApiProduct {
            id: 9,
            title: "Broken".to_string(),
            price: f64::NAN,
            description: String::new(),
            category: String::new(),
            image: String::new(),
        };
        assert!(matches!(
            record.into_product(),
            Err(CatalogError::InvalidPrice { id: 9, .. })
        ));
    }
}
