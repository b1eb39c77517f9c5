//! Persistence - Durable storage for the cart slice.
//!
//! The cart is written as a versioned JSON envelope under one fixed key of a
//! key-value [`BlobStore`]. The catalog is never written.
//!
//! Reads happen once, before the store hands out its first snapshot.
//! Anything that goes wrong on the way in (missing key, unreadable storage,
//! bad JSON, a cart that breaks its invariants) yields an empty cart and a
//! log line. Writes go through [`PersistWriter`] on a background thread.
//!
//! ## Example
//!
//! ```ignore
//! use storefront_state::persist::{hydrate_cart, FileBlobStore, PersistWriter};
//!
//! let blobs = FileBlobStore::new("/var/lib/storefront")?;
//! let cart = hydrate_cart(&blobs, "persist:root");
//! let writer = PersistWriter::spawn(blobs, "persist:root");
//! writer.save(cart.clone());
//! ```

mod file;
mod in_memory;
mod writer;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cart::CartState;

pub use file::FileBlobStore;
pub use in_memory::InMemoryBlobStore;
pub use writer::{PersistWriter, WriterStats};

/// Envelope version written by this crate.
pub const PERSIST_VERSION: u32 = 1;

/// Error type for blob store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistError {
    LockPoisoned(&'static str),
    /// Storage-level error (I/O, permissions).
    Storage(String),
    /// Serialization/deserialization error.
    Serde(String),
    /// The blob was written by an unknown envelope version.
    UnsupportedVersion(u32),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::LockPoisoned(operation) => {
                write!(f, "blob store lock poisoned during {}", operation)
            }
            PersistError::Storage(msg) => write!(f, "blob storage error: {}", msg),
            PersistError::Serde(msg) => write!(f, "persisted state serialization error: {}", msg),
            PersistError::UnsupportedVersion(version) => {
                write!(f, "unsupported persisted state version {}", version)
            }
        }
    }
}

impl std::error::Error for PersistError {}

/// Key-value blob storage.
pub trait BlobStore: Send + Sync {
    /// Load the blob stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistError>;

    /// Save (or overwrite) the blob stored under `key`.
    fn set(&self, key: &str, bytes: Vec<u8>) -> Result<(), PersistError>;
}

impl<B: BlobStore + ?Sized> BlobStore for Arc<B> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, bytes: Vec<u8>) -> Result<(), PersistError> {
        (**self).set(key, bytes)
    }
}

/// What is stored under the persist key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub version: u32,
    pub cart: CartState,
}

impl PersistedState {
    pub fn new(cart: CartState) -> Self {
        Self {
            version: PERSIST_VERSION,
            cart,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, PersistError> {
        serde_json::to_vec(self).map_err(|e| PersistError::Serde(e.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, PersistError> {
        let state: PersistedState =
            serde_json::from_slice(bytes).map_err(|e| PersistError::Serde(e.to_string()))?;
        if state.version != PERSIST_VERSION {
            return Err(PersistError::UnsupportedVersion(state.version));
        }
        Ok(state)
    }
}

/// Serialize a cart the way [`hydrate_cart`] expects to read it.
pub fn encode_cart(cart: &CartState) -> Result<Vec<u8>, PersistError> {
    PersistedState::new(cart.clone()).encode()
}

/// Load the persisted cart, or an empty one if there is nothing usable.
pub fn hydrate_cart<B: BlobStore + ?Sized>(store: &B, key: &str) -> CartState {
    let bytes = match store.get(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            tracing::debug!(key, "no persisted cart, starting empty");
            return CartState::default();
        }
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to read persisted cart, starting empty");
            return CartState::default();
        }
    };

    match PersistedState::decode(&bytes) {
        Ok(state) => {
            tracing::debug!(key, items = state.cart.items().len(), "cart rehydrated");
            state.cart
        }
        Err(err) => {
            tracing::warn!(key, error = %err, "discarding malformed persisted cart");
            CartState::default()
        }
    }
}
