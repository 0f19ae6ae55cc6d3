//! Wishlist
//!
//! Saved products, keyed by product id. The backing table lives behind a
//! port with idempotent-insert semantics: saving a product twice leaves one
//! row, matching the backend's insert-or-ignore contract.

use std::{cell::RefCell, rc::Rc};

use mockall::automock;
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::products::ProductId;

/// A failed wishlist backend call.
#[derive(Debug, Error)]
#[error("wishlist operation failed: {0}")]
pub struct WishlistError(pub String);

/// Backend table of saved products for one shopper.
#[automock]
pub trait WishlistStore {
    /// Save a product. Returns `false` when it was already saved.
    ///
    /// # Errors
    ///
    /// Returns a [`WishlistError`] if the backend call failed.
    fn insert(&self, product_id: &ProductId) -> Result<bool, WishlistError>;

    /// Remove a saved product. Returns `false` when it was not saved.
    ///
    /// # Errors
    ///
    /// Returns a [`WishlistError`] if the backend call failed.
    fn remove(&self, product_id: &ProductId) -> Result<bool, WishlistError>;

    /// List saved product ids.
    ///
    /// # Errors
    ///
    /// Returns a [`WishlistError`] if the backend call failed.
    fn list(&self) -> Result<Vec<ProductId>, WishlistError>;
}

/// In-memory wishlist table for tests and demos. Clones share the rows.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWishlist {
    rows: Rc<RefCell<FxHashSet<ProductId>>>,
}

impl InMemoryWishlist {
    /// An empty wishlist.
    pub fn new() -> Self {
        Self::default()
    }
}

impl WishlistStore for InMemoryWishlist {
    fn insert(&self, product_id: &ProductId) -> Result<bool, WishlistError> {
        Ok(self.rows.borrow_mut().insert(product_id.clone()))
    }

    fn remove(&self, product_id: &ProductId) -> Result<bool, WishlistError> {
        Ok(self.rows.borrow_mut().remove(product_id))
    }

    fn list(&self) -> Result<Vec<ProductId>, WishlistError> {
        let mut ids: Vec<ProductId> = self.rows.borrow().iter().cloned().collect();
        ids.sort();

        Ok(ids)
    }
}

/// Toggle a product: save it if absent, remove it if present. Returns `true`
/// when the product ends up saved.
///
/// # Errors
///
/// Returns a [`WishlistError`] if the backend call failed.
pub fn toggle(store: &dyn WishlistStore, product_id: &ProductId) -> Result<bool, WishlistError> {
    if store.insert(product_id)? {
        return Ok(true);
    }

    store.remove(product_id)?;

    Ok(false)
}
