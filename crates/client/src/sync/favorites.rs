//! Favorites synchronization.

use std::collections::HashSet;

use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};
use trolley_core::{FavoriteEntry, Product, ProductId};

use crate::auth::AuthProvider;
use crate::store::UserDocumentStore;

use super::SyncError;

/// Owns the set of favorited product ids for the signed-in user.
///
/// Toggles are optimistic: the local set flips immediately, then the
/// remote write is issued. If the write fails the flip is rolled back and
/// the error returned, so the local set never drifts from what the store
/// acknowledged.
pub struct FavoritesSynchronizer<S, A> {
    store: S,
    auth: A,
    ids: Mutex<HashSet<ProductId>>,
}

impl<S: UserDocumentStore, A: AuthProvider> FavoritesSynchronizer<S, A> {
    /// Create a synchronizer with an empty local set.
    #[must_use]
    pub fn new(store: S, auth: A) -> Self {
        Self {
            store,
            auth,
            ids: Mutex::new(HashSet::new()),
        }
    }

    /// Replace the local set with the remote one and return it.
    ///
    /// Unauthenticated sessions and read failures both yield the empty
    /// set: "no favorites" is the safe default, not an error.
    #[instrument(skip(self))]
    pub async fn fetch_favorite_ids(&self) -> HashSet<ProductId> {
        let fetched = match self.auth.current_user() {
            Some(user) => match self.store.favorite_entries(&user).await {
                Ok(entries) => entries.into_iter().map(|entry| entry.id).collect(),
                Err(err) => {
                    warn!(error = %err, "favorites read failed, degrading to empty set");
                    HashSet::new()
                }
            },
            None => HashSet::new(),
        };

        let mut ids = self.ids.lock().await;
        *ids = fetched.clone();
        fetched
    }

    /// Flip membership for `product` and persist the change.
    ///
    /// Returns the new membership state: `true` if the product is now a
    /// favorite. On remote failure the optimistic local flip is reverted
    /// before the error is returned.
    ///
    /// # Errors
    ///
    /// [`SyncError::Unauthenticated`] without a signed-in user;
    /// [`SyncError::Store`] if the remote write fails.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn toggle_favorite(&self, product: &Product) -> Result<bool, SyncError> {
        let user = self.auth.current_user().ok_or(SyncError::Unauthenticated)?;

        // Optimistic flip from current local state.
        let added = {
            let mut ids = self.ids.lock().await;
            if ids.remove(&product.id) {
                false
            } else {
                ids.insert(product.id);
                true
            }
        };

        let write = if added {
            self.store
                .put_favorite(&user, &FavoriteEntry::from(product))
                .await
        } else {
            self.store.delete_favorite(&user, product.id).await
        };

        if let Err(err) = write {
            warn!(error = %err, added, "favorite write failed, rolling back local flip");
            let mut ids = self.ids.lock().await;
            if added {
                ids.remove(&product.id);
            } else {
                ids.insert(product.id);
            }
            return Err(err.into());
        }

        debug!(added, "favorite toggled");
        Ok(added)
    }

    /// Current local favorite ids.
    pub async fn favorite_ids(&self) -> HashSet<ProductId> {
        self.ids.lock().await.clone()
    }

    /// Whether `product` is currently favorited locally.
    pub async fn is_favorite(&self, product: ProductId) -> bool {
        self.ids.lock().await.contains(&product)
    }
}
