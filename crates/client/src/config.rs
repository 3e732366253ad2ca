//! Catalog client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CATALOG_BASE_URL` - Base URL of the product catalog API
//!
//! ## Optional
//! - `CATALOG_API_KEY` - Bearer token for the catalog API
//! - `CATALOG_PAGE_SIZE` - Products per page (default: 10, min: 1)

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default number of products requested per catalog page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Remote catalog API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog API (e.g., <https://dummyjson.com>).
    /// Constructors normalize it to end with `/` so endpoint paths join
    /// under it rather than replacing its last segment.
    pub base_url: Url,
    /// Optional bearer token sent with every catalog request.
    pub api_key: Option<SecretString>,
    /// Products requested per page; at least 1.
    pub page_size: u32,
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `CATALOG_BASE_URL` is missing or unparseable, or
    /// if `CATALOG_PAGE_SIZE` is present but not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url = require_env("CATALOG_BASE_URL")?;
        let base_url = Url::parse(&raw_url)
            .map(ensure_trailing_slash)
            .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_BASE_URL".to_string(), e.to_string()))?;

        let api_key = std::env::var("CATALOG_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .map(SecretString::from);

        let page_size = match std::env::var("CATALOG_PAGE_SIZE") {
            Ok(raw) => raw.parse::<u32>().ok().filter(|&n| n >= 1).ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "CATALOG_PAGE_SIZE".to_string(),
                    format!("expected a positive integer, got {raw:?}"),
                )
            })?,
            Err(_) => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            base_url,
            api_key,
            page_size,
        })
    }

    /// Build a configuration for a known endpoint, with the default page size.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url: ensure_trailing_slash(base_url),
            api_key: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// `Url::join` treats a base without a trailing slash as a document and
/// replaces its last path segment, so `https://host/api` + `products`
/// would resolve to `https://host/products`.
fn ensure_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("page_size", &self.page_size)
            .finish()
    }
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_api_key() {
        let mut config = CatalogConfig::new(Url::parse("https://dummyjson.com").unwrap());
        config.api_key = Some(SecretString::from("super-secret"));
        let rendered = format!("{config:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn test_path_bearing_base_url_keeps_its_prefix_when_joined() {
        let config = CatalogConfig::new(Url::parse("https://example.com/api").unwrap());
        assert_eq!(config.base_url.as_str(), "https://example.com/api/");
        assert_eq!(
            config.base_url.join("products").unwrap().as_str(),
            "https://example.com/api/products"
        );
    }

    #[test]
    fn test_trailing_slash_base_url_is_unchanged() {
        let config = CatalogConfig::new(Url::parse("https://example.com/api/").unwrap());
        assert_eq!(config.base_url.as_str(), "https://example.com/api/");
    }

    #[test]
    fn test_default_page_size() {
        let config = CatalogConfig::new(Url::parse("https://dummyjson.com").unwrap());
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }
}
