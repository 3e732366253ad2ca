//! Synchronizers: cart, favorites, and orders.
//!
//! Each synchronizer owns one slice of per-user state (the favorites set,
//! the cart line list, the order history) and keeps an in-memory snapshot
//! in step with the remote document store. The snapshot is a cache, the
//! store is the source of truth: read failures degrade to safe empty
//! defaults, write failures surface to the caller and never silently
//! desynchronize the local view.

mod cart;
mod favorites;
mod orders;

pub use cart::CartSynchronizer;
pub use favorites::FavoritesSynchronizer;
pub use orders::{OrderError, OrderLifecycleManager};

use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by cart and favorites write operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// No user is signed in; writes require one.
    #[error("not signed in")]
    Unauthenticated,

    /// A quantity of zero was passed where at least 1 is required.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// The remote store rejected or failed the operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}
