use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{BlobStore, PersistError};

/// In-memory blob store backed by `Arc<RwLock<HashMap>>`.
///
/// Clone-friendly (cloning shares the same underlying storage), so a test
/// can keep a handle while the writer thread owns another.
#[derive(Clone, Default)]
pub struct InMemoryBlobStore {
    storage: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.storage.read().map(|storage| storage.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BlobStore for InMemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| PersistError::LockPoisoned("blob read"))?;
        Ok(storage.get(key).cloned())
    }

    fn set(&self, key: &str, bytes: Vec<u8>) -> Result<(), PersistError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| PersistError::LockPoisoned("blob write"))?;
        storage.insert(key.to_string(), bytes);
        Ok(())
    }
}
