//! Remote
//!
//! The backend cart-mirror contract for signed-in shoppers. The local cart
//! store stays authoritative; the mirror is an idempotent-write collaborator
//! keyed by (user, product, size), reached with upsert-on-conflict-key
//! semantics. Which storage technology provides that contract is out of
//! scope here.

use std::{cell::RefCell, rc::Rc};

use mockall::automock;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{cart::CartState, products::ProductId};

/// A failed backend cart-sync call.
#[derive(Debug, Error)]
#[error("cart sync failed: {0}")]
pub struct SyncError(pub String);

/// Identity of a mirrored cart row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SyncKey {
    /// The signed-in shopper.
    pub user_id: String,

    /// Catalog product identifier.
    pub product_id: ProductId,

    /// Optional size variant.
    pub size: Option<String>,
}

/// Backend cart mirror. Writes are idempotent by key: upserting an existing
/// key overwrites its quantity, never duplicates the row.
#[automock]
pub trait CartSync {
    /// Insert or update the row for the given key.
    ///
    /// # Errors
    ///
    /// Returns a [`SyncError`] if the backend call failed.
    fn upsert_item(&self, key: &SyncKey, quantity: u32) -> Result<(), SyncError>;

    /// Delete the row for the given key, if present.
    ///
    /// # Errors
    ///
    /// Returns a [`SyncError`] if the backend call failed.
    fn remove_item(&self, key: &SyncKey) -> Result<(), SyncError>;

    /// Fetch all mirrored rows for a shopper.
    ///
    /// # Errors
    ///
    /// Returns a [`SyncError`] if the backend call failed.
    fn fetch_items(&self, user_id: &str) -> Result<Vec<(SyncKey, u32)>, SyncError>;
}

/// Push the local cart to the mirror: upsert every local line, then remove
/// mirrored rows with no local counterpart. A failure aborts the push and is
/// surfaced to the caller; the local cart is never touched.
///
/// # Errors
///
/// Returns a [`SyncError`] from the first failed backend call.
pub fn mirror_cart(sync: &dyn CartSync, user_id: &str, cart: &CartState) -> Result<(), SyncError> {
    let local_keys: Vec<SyncKey> = cart
        .lines()
        .iter()
        .map(|line| SyncKey {
            user_id: user_id.to_owned(),
            product_id: line.product_id.clone(),
            size: line.size.clone(),
        })
        .collect();

    for (line, key) in cart.lines().iter().zip(&local_keys) {
        sync.upsert_item(key, line.quantity)?;
    }

    for (key, _) in sync.fetch_items(user_id)? {
        if !local_keys.contains(&key) {
            sync.remove_item(&key)?;
        }
    }

    Ok(())
}

/// In-memory cart mirror for tests and demos. Clones share the rows.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCartSync {
    rows: Rc<RefCell<FxHashMap<SyncKey, u32>>>,
}

impl InMemoryCartSync {
    /// An empty mirror.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of mirrored rows across all shoppers.
    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }

    /// Whether the mirror holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.borrow().is_empty()
    }
}

impl CartSync for InMemoryCartSync {
    fn upsert_item(&self, key: &SyncKey, quantity: u32) -> Result<(), SyncError> {
        self.rows.borrow_mut().insert(key.clone(), quantity);

        Ok(())
    }

    fn remove_item(&self, key: &SyncKey) -> Result<(), SyncError> {
        self.rows.borrow_mut().remove(key);

        Ok(())
    }

    fn fetch_items(&self, user_id: &str) -> Result<Vec<(SyncKey, u32)>, SyncError> {
        Ok(self
            .rows
            .borrow()
            .iter()
            .filter(|(key, _)| key.user_id == user_id)
            .map(|(key, quantity)| (key.clone(), *quantity))
            .collect())
    }
}
