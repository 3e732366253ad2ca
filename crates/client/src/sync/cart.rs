//! Cart synchronization.

use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};
use trolley_core::{CartLine, Product, ProductId};

use crate::auth::AuthProvider;
use crate::store::{StoreError, UserDocumentStore};

use super::SyncError;

/// Owns the cart line items for the signed-in user.
///
/// Invariants: at most one line per product id, and every line's quantity
/// is at least 1 - a quantity reaching zero removes the line. Each
/// mutation maps to one remote write; the local list is patched only after
/// the store acknowledges, so a failed write leaves the local view intact.
pub struct CartSynchronizer<S, A> {
    store: S,
    auth: A,
    lines: Mutex<Vec<CartLine>>,
}

impl<S: UserDocumentStore, A: AuthProvider> CartSynchronizer<S, A> {
    /// Create a synchronizer with an empty local cart.
    #[must_use]
    pub fn new(store: S, auth: A) -> Self {
        Self {
            store,
            auth,
            lines: Mutex::new(Vec::new()),
        }
    }

    /// Add `quantity` units of `product` to the cart.
    ///
    /// If a line already exists for the product its stored quantity is
    /// atomically incremented (never read-then-written, so concurrent adds
    /// cannot lose updates); otherwise a new line is created with a full
    /// product snapshot.
    ///
    /// # Errors
    ///
    /// [`SyncError::InvalidQuantity`] for a zero quantity (checked before
    /// any remote call); [`SyncError::Unauthenticated`] without a user;
    /// [`SyncError::Store`] if the remote write fails.
    #[instrument(skip(self, product), fields(product_id = %product.id, quantity))]
    pub async fn add_to_cart(&self, product: &Product, quantity: u32) -> Result<(), SyncError> {
        if quantity == 0 {
            return Err(SyncError::InvalidQuantity);
        }
        let user = self.auth.current_user().ok_or(SyncError::Unauthenticated)?;

        let incremented = match self
            .store
            .increment_cart_quantity(&user, product.id, quantity)
            .await
        {
            Ok(()) => {
                debug!("incremented existing cart line");
                true
            }
            Err(StoreError::NotFound(_)) => {
                let Some(line) = CartLine::new(product.clone(), quantity) else {
                    return Err(SyncError::InvalidQuantity);
                };
                self.store.insert_cart_line(&user, &line).await?;
                debug!("created new cart line");
                false
            }
            Err(err) => {
                warn!(error = %err, "cart increment failed");
                return Err(err.into());
            }
        };

        // Patch the local view to match what the store now holds.
        let mut lines = self.lines.lock().await;
        if let Some(existing) = lines.iter_mut().find(|line| line.product_id() == product.id) {
            existing.quantity += quantity;
        } else if incremented {
            // The line existed remotely but not locally (written by another
            // device before this session fetched), so the delta alone would
            // understate it; read the stored line back instead.
            drop(lines);
            match self.store.cart_lines(&user).await {
                Ok(fetched) => {
                    if let Some(line) = fetched
                        .into_iter()
                        .find(|line| line.product_id() == product.id)
                    {
                        self.lines.lock().await.push(line);
                    }
                }
                Err(err) => {
                    warn!(error = %err, "cart read-back failed, local view stale until next fetch");
                }
            }
        } else if let Some(line) = CartLine::new(product.clone(), quantity) {
            lines.push(line);
        }

        Ok(())
    }

    /// Overwrite the quantity for `product`'s line.
    ///
    /// A new quantity of zero or less removes the line instead; otherwise
    /// the stored quantity is overwritten unconditionally (last write
    /// wins, not an increment).
    ///
    /// # Errors
    ///
    /// [`SyncError::Unauthenticated`] without a user; [`SyncError::Store`]
    /// if the remote write fails (including an update to a missing line).
    #[instrument(skip(self, product), fields(product_id = %product.id, new_quantity))]
    pub async fn update_quantity(
        &self,
        product: &Product,
        new_quantity: i64,
    ) -> Result<(), SyncError> {
        if new_quantity <= 0 {
            return self.remove_from_cart(product.id).await;
        }
        let quantity = u32::try_from(new_quantity).map_err(|_| SyncError::InvalidQuantity)?;
        let user = self.auth.current_user().ok_or(SyncError::Unauthenticated)?;

        self.store
            .set_cart_quantity(&user, product.id, quantity)
            .await?;

        let mut lines = self.lines.lock().await;
        if let Some(existing) = lines.iter_mut().find(|line| line.product_id() == product.id) {
            existing.quantity = quantity;
        }
        debug!("quantity overwritten");

        Ok(())
    }

    /// Remove the line for `product`. Idempotent: removing an absent line
    /// succeeds.
    ///
    /// # Errors
    ///
    /// [`SyncError::Unauthenticated`] without a user; [`SyncError::Store`]
    /// if the remote delete fails.
    #[instrument(skip(self), fields(product_id = %product))]
    pub async fn remove_from_cart(&self, product: ProductId) -> Result<(), SyncError> {
        let user = self.auth.current_user().ok_or(SyncError::Unauthenticated)?;

        self.store.delete_cart_line(&user, product).await?;

        let mut lines = self.lines.lock().await;
        lines.retain(|line| line.product_id() != product);
        debug!("cart line removed");

        Ok(())
    }

    /// Replace the local cart with the remote one and return it.
    ///
    /// Unauthenticated sessions and read failures both yield the empty
    /// cart rather than an error.
    #[instrument(skip(self))]
    pub async fn fetch_cart_items(&self) -> Vec<CartLine> {
        let fetched = match self.auth.current_user() {
            Some(user) => match self.store.cart_lines(&user).await {
                Ok(lines) => lines,
                Err(err) => {
                    warn!(error = %err, "cart read failed, degrading to empty cart");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let mut lines = self.lines.lock().await;
        *lines = fetched.clone();
        fetched
    }

    /// Delete every line, locally and remotely. Called after a confirmed
    /// checkout.
    ///
    /// # Errors
    ///
    /// [`SyncError::Unauthenticated`] without a user; [`SyncError::Store`]
    /// if the remote clear fails (local lines are kept in that case).
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), SyncError> {
        let user = self.auth.current_user().ok_or(SyncError::Unauthenticated)?;

        self.store.clear_cart(&user).await?;
        self.lines.lock().await.clear();

        Ok(())
    }

    /// Current local cart lines.
    pub async fn items(&self) -> Vec<CartLine> {
        self.lines.lock().await.clone()
    }

    /// Sum of line totals at their snapshotted unit prices.
    pub async fn subtotal(&self) -> Decimal {
        self.lines
            .lock()
            .await
            .iter()
            .map(CartLine::total)
            .sum()
    }
}
