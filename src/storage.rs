//! Storage
//!
//! The durable client storage port: a single named slot holding the
//! serialized cart record. Implementations are injected into the cart store
//! so tests can substitute an in-memory fake.

use std::{cell::RefCell, fs, io, path::PathBuf, rc::Rc};

use mockall::automock;
use thiserror::Error;

use crate::cart::records::CartRecord;

/// Errors reading or writing the cart slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error touching the slot.
    #[error("failed to access cart slot: {0}")]
    Io(#[from] io::Error),

    /// The slot held something that is not a cart record.
    #[error("failed to decode cart slot: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Durable single-slot storage for the cart record.
#[automock]
pub trait CartStorage {
    /// Read the slot. `None` means no cart has been persisted yet.
    fn load(&self) -> Result<Option<CartRecord>, StorageError>;

    /// Overwrite the slot with the given record.
    fn save(&self, record: &CartRecord) -> Result<(), StorageError>;
}

/// File-backed slot storing the record as JSON.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create storage backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CartStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<CartRecord>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn save(&self, record: &CartRecord) -> Result<(), StorageError> {
        let json = serde_json::to_string(record)?;
        fs::write(&self.path, json)?;

        Ok(())
    }
}

/// In-memory slot for tests. Clones share the same slot, so a test can keep a
/// handle and inspect what the store persisted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    slot: Rc<RefCell<Option<CartRecord>>>,
}

impl InMemoryStorage {
    /// An empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot pre-seeded with a record.
    pub fn seeded(record: CartRecord) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(record))),
        }
    }

    /// The currently persisted record, if any.
    pub fn snapshot(&self) -> Option<CartRecord> {
        self.slot.borrow().clone()
    }
}

impl CartStorage for InMemoryStorage {
    fn load(&self) -> Result<Option<CartRecord>, StorageError> {
        Ok(self.slot.borrow().clone())
    }

    fn save(&self, record: &CartRecord) -> Result<(), StorageError> {
        *self.slot.borrow_mut() = Some(record.clone());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn in_memory_round_trip() -> TestResult {
        let storage = InMemoryStorage::new();

        assert!(storage.load()?.is_none());

        let record = CartRecord {
            items: Vec::new(),
            total: 0,
        };

        storage.save(&record)?;

        assert_eq!(storage.load()?, Some(record));

        Ok(())
    }

    #[test]
    fn clones_share_the_slot() -> TestResult {
        let storage = InMemoryStorage::new();
        let handle = storage.clone();

        storage.save(&CartRecord {
            items: Vec::new(),
            total: 42,
        })?;

        assert_eq!(handle.snapshot().map(|r| r.total), Some(42));

        Ok(())
    }

    #[test]
    fn file_storage_missing_slot_is_empty() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = JsonFileStorage::new(dir.path().join("cart.json"));

        assert!(storage.load()?.is_none());

        Ok(())
    }

    #[test]
    fn file_storage_round_trip() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = JsonFileStorage::new(dir.path().join("cart.json"));

        let record = CartRecord {
            items: Vec::new(),
            total: 2500_00,
        };

        storage.save(&record)?;

        assert_eq!(storage.load()?, Some(record));

        Ok(())
    }

    #[test]
    fn file_storage_corrupt_slot_is_a_decode_error() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cart.json");
        fs::write(&path, "not json")?;

        let storage = JsonFileStorage::new(path);

        assert!(matches!(storage.load(), Err(StorageError::Decode(_))));

        Ok(())
    }
}
