//! REST catalog client.
//!
//! Speaks the catalog's paginated endpoints with `reqwest` and caches
//! immutable metadata (single products, the category list) using `moka`
//! (5-minute TTL). Paginated listings are never cached: the pager owns
//! that state.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use trolley_core::{CategorySlug, Product, ProductId};
use url::Url;

use crate::config::CatalogConfig;

use super::conversions::{WirePage, convert_page, convert_product};
use super::{CatalogError, CatalogSource};

/// Cached value types.
#[derive(Debug, Clone)]
enum CacheValue {
    Product(Box<Product>),
    Categories(Vec<CategorySlug>),
}

/// Client for the catalog REST API.
///
/// Cheap to clone; all clones share the connection pool and cache.
#[derive(Clone)]
pub struct HttpCatalogClient {
    inner: Arc<HttpCatalogClientInner>,
}

struct HttpCatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
    cache: Cache<String, CacheValue>,
}

impl HttpCatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(HttpCatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                api_key: config
                    .api_key
                    .as_ref()
                    .map(|key| key.expose_secret().to_string()),
                cache,
            }),
        }
    }

    /// Execute a GET request and parse the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let url = self
            .inner
            .base_url
            .join(path)
            .map_err(|e| CatalogError::NotFound(format!("bad catalog path {path}: {e}")))?;

        let mut request = self.inner.client.get(url).query(query);
        if let Some(key) = &self.inner.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CatalogError::RateLimited(retry_after));
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(path.to_string()));
        }

        // Body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "catalog returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        match serde_json::from_str(&body) {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %body.chars().take(500).collect::<String>(),
                    "failed to parse catalog response"
                );
                Err(CatalogError::Parse(e))
            }
        }
    }
}

impl CatalogSource for HttpCatalogClient {
    /// Fetch one page of products. Not cached: paginated listings change
    /// as the catalog does, and the pager holds the accumulated view.
    #[instrument(skip(self))]
    async fn list_products(
        &self,
        limit: u32,
        skip: u32,
        category: Option<&CategorySlug>,
    ) -> Result<Vec<Product>, CatalogError> {
        let path = category.map_or_else(
            || "products".to_string(),
            |slug| format!("products/category/{slug}"),
        );
        let query = [
            ("limit", limit.to_string()),
            ("skip", skip.to_string()),
        ];

        let page: WirePage = self.get_json(&path, &query).await?;
        Ok(convert_page(page))
    }

    /// Fetch the category list (cached).
    #[instrument(skip(self))]
    async fn list_categories(&self) -> Result<Vec<CategorySlug>, CatalogError> {
        let cache_key = "categories".to_string();

        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(&cache_key).await {
            debug!("cache hit for categories");
            return Ok(categories);
        }

        let raw: Vec<String> = self.get_json("products/category-list", &[]).await?;
        let categories: Vec<CategorySlug> =
            raw.iter().map(|name| CategorySlug::new(name)).collect();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Categories(categories.clone()))
            .await;

        Ok(categories)
    }

    /// Fetch a single product by id (cached).
    #[instrument(skip(self), fields(id = %id))]
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let cache_key = format!("product:{id}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("cache hit for product");
            return Ok(*product);
        }

        let wire = self.get_json(&format!("products/{id}"), &[]).await?;
        let product = convert_product(wire);

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }
}
