//! Catalog client.
//!
//! The catalog is a static JSON document (an array of products) fetched
//! over HTTP from a location fixed at startup. The parsed list is cached
//! with `moka` (5-minute TTL); concurrent callers share one in-flight
//! load, and failed loads are never cached, so the next request retries.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::instrument;
use url::Url;

use gondola_core::{Product, ProductId};

/// Errors from loading or validating the catalog document.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The HTTP request failed (connect, timeout, body read).
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog location answered with a non-success status.
    #[error("catalog request returned {0}")]
    Status(reqwest::StatusCode),

    /// The document is not a JSON array of products.
    #[error("catalog document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but violates catalog invariants.
    #[error("catalog document is invalid: {0}")]
    Invalid(String),
}

/// Cache key for catalog data.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
enum CacheKey {
    Products,
}

/// Client for the catalog document.
///
/// Cheaply cloneable; the HTTP client and cache are shared behind an `Arc`.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    url: Url,
    cache: Cache<CacheKey, Arc<[Product]>>,
}

impl CatalogClient {
    const CACHE_TTL: Duration = Duration::from_secs(300);

    /// Create a new catalog client for the given document location.
    #[must_use]
    pub fn new(url: Url) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(Self::CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                url,
                cache,
            }),
        }
    }

    /// The full product list, fetching the document on a cold cache.
    ///
    /// # Errors
    ///
    /// Returns the load error (shared between coalesced callers) when the
    /// fetch, parse or validation fails. The failure is not cached.
    pub async fn products(&self) -> Result<Arc<[Product]>, Arc<CatalogError>> {
        self.inner
            .cache
            .try_get_with(CacheKey::Products, self.fetch())
            .await
    }

    /// Look up a product by id, loading the catalog first when cold.
    ///
    /// # Errors
    ///
    /// Returns the load error when the catalog cannot be loaded at all;
    /// an id absent from a loaded catalog is `Ok(None)`.
    pub async fn find(&self, id: ProductId) -> Result<Option<Product>, Arc<CatalogError>> {
        let products = self.products().await?;
        Ok(products.iter().find(|product| product.id == id).cloned())
    }

    #[instrument(skip(self), fields(url = %self.inner.url))]
    async fn fetch(&self) -> Result<Arc<[Product]>, CatalogError> {
        let response = self.inner.client.get(self.inner.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let body = response.text().await?;
        let products: Vec<Product> = serde_json::from_str(&body)?;
        validate(&products)?;

        tracing::info!(count = products.len(), "catalog loaded");
        Ok(products.into())
    }
}

/// Check catalog invariants: unique ids, non-negative prices.
fn validate(products: &[Product]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for product in products {
        if !seen.insert(product.id) {
            return Err(CatalogError::Invalid(format!(
                "duplicate product id {}",
                product.id
            )));
        }
        if product.price.is_negative() {
            return Err(CatalogError::Invalid(format!(
                "product {} has a negative price",
                product.id
            )));
        }
    }
    Ok(())
}
