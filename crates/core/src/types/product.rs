//! The catalog product record.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A product as served by the remote catalog API.
///
/// Products are immutable from the application's perspective: the remote
/// catalog is the source of truth and records are passed through verbatim
/// (modulo optional translation of the text fields for display).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub description: String,
    pub category: String,
    /// URL of the product image on the catalog's CDN.
    pub image: String,
}
