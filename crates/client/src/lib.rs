//! Trolley Client - storefront synchronization engine.
//!
//! This crate owns the non-UI logic of the Trolley mobile storefront: it
//! paginates the remote product catalog into a growing local view, keeps a
//! per-user favorites set and cart in step with the remote document store,
//! and drives orders through their fulfillment lifecycle. Screens hold
//! read-only snapshots of the state owned here and never mutate it directly.
//!
//! # Architecture
//!
//! Remote collaborators are injected behind two traits so every
//! synchronizer is unit-testable without a live network:
//!
//! - [`catalog::CatalogSource`] - the paginated product catalog, implemented
//!   over REST by [`catalog::HttpCatalogClient`]
//! - [`store::UserDocumentStore`] - the per-user document store
//!   (`favorites` / `cart` / `orders` subcollections), with
//!   [`store::memory::InMemoryUserStore`] for tests and offline use
//!
//! The remote store is the source of truth; local state is a best-effort
//! cache. Reads degrade to safe empty defaults, writes surface their errors
//! to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use trolley_client::catalog::{CatalogPager, HttpCatalogClient};
//! use trolley_client::config::CatalogConfig;
//!
//! let config = CatalogConfig::from_env()?;
//! let catalog = HttpCatalogClient::new(&config);
//! let pager = CatalogPager::new(catalog, config.page_size);
//!
//! pager.fetch_next_page().await?;
//! let snapshot = pager.snapshot().await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod catalog;
pub mod config;
pub mod filter;
pub mod store;
pub mod sync;

pub use auth::{AuthProvider, SessionAuth};
pub use catalog::{CatalogError, CatalogPager, CatalogSource, HttpCatalogClient, PagerSnapshot};
pub use config::{CatalogConfig, ConfigError};
pub use filter::{ProductFilter, ProductSort};
pub use store::{StoreError, UserDocumentStore};
pub use sync::{
    CartSynchronizer, FavoritesSynchronizer, OrderError, OrderLifecycleManager, SyncError,
};
