//! Remote catalog API client.
//!
//! The catalog is a public REST API serving a flat product collection.
//! The full list is cached in memory via `moka` for a short TTL; search
//! queries are never cached. There is no retry and no pagination - the
//! upstream collection is small and served whole.

pub mod types;

use std::sync::Arc;
use std::time::Duration;

use marigold_core::Product;
use moka::future::Cache;
use thiserror::Error;
use tracing::{debug, instrument};

use types::{ApiProduct, convert_products};

/// Cache TTL for the full product list.
const CATALOG_CACHE_TTL: Duration = Duration::from_secs(300);

/// Cache key for the full product list.
const PRODUCTS_CACHE_KEY: &str = "products";

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog returned a non-success status.
    #[error("Catalog API returned {0}")]
    Status(reqwest::StatusCode),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A product arrived with an unrepresentable price.
    #[error("Product {id} has invalid price {price}")]
    InvalidPrice { id: i64, price: f64 },
}

/// Client for the remote product catalog.
///
/// Cheaply cloneable; the full product list is cached for five minutes.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<String, Arc<Vec<Product>>>,
}

impl CatalogClient {
    /// Create a new catalog client for the given base URL.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        let cache = Cache::builder()
            .max_capacity(16)
            .time_to_live(CATALOG_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: base_url.trim_end_matches('/').to_string(),
                cache,
            }),
        }
    }

    /// Fetch the full product collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be
    /// converted into domain products.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Arc<Vec<Product>>, CatalogError> {
        if let Some(products) = self.inner.cache.get(PRODUCTS_CACHE_KEY).await {
            debug!("Cache hit for product list");
            return Ok(products);
        }

        let url = format!("{}/products", self.inner.base_url);
        let products = Arc::new(self.fetch_products(&url, &[]).await?);

        self.inner
            .cache
            .insert(PRODUCTS_CACHE_KEY.to_string(), Arc::clone(&products))
            .await;

        Ok(products)
    }

    /// Query the catalog's own substring search.
    ///
    /// Results are not cached - search terms are unbounded.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be
    /// converted into domain products.
    #[instrument(skip(self), fields(term = %term))]
    pub async fn search_products(&self, term: &str) -> Result<Vec<Product>, CatalogError> {
        let url = format!("{}/products", self.inner.base_url);
        self.fetch_products(&url, &[("search", term)]).await
    }

    /// Invalidate the cached product list.
    pub async fn invalidate(&self) {
        self.inner.cache.invalidate(PRODUCTS_CACHE_KEY).await;
    }

    async fn fetch_products(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<Product>, CatalogError> {
        let response = self.inner.client.get(url).query(query).send().await?;

        let status = response.status();
        // Read the body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Status(status));
        }

        let records: Vec<ApiProduct> = match serde_json::from_str(&body) {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %body.chars().take(500).collect::<String>(),
                    "Failed to parse catalog response"
                );
                return Err(CatalogError::Parse(e));
            }
        };

        convert_products(records)
    }
}
