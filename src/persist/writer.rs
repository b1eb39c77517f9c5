//! Background thread writing cart snapshots to a blob store.
//!
//! `save` never blocks on storage and never reports failure to the caller.
//! When snapshots queue up faster than they can be written, only the newest
//! one is written.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};

use super::{BlobStore, PersistedState};
use crate::cart::CartState;

/// Statistics from the writer thread.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WriterStats {
    /// Snapshots written successfully.
    pub writes: usize,
    /// Snapshots that failed to encode or store.
    pub failures: usize,
    /// Snapshots skipped because a newer one was already queued.
    pub superseded: usize,
}

/// A background thread that persists cart snapshots.
///
/// ## Example
///
/// ```ignore
/// use storefront_state::persist::{InMemoryBlobStore, PersistWriter};
///
/// let writer = PersistWriter::spawn(InMemoryBlobStore::new(), "persist:root");
/// writer.save(cart.clone());
///
/// // Drains pending snapshots before returning.
/// let stats = writer.stop();
/// ```
pub struct PersistWriter {
    tx: Option<Sender<CartState>>,
    handle: Option<JoinHandle<WriterStats>>,
}

impl PersistWriter {
    /// Spawn a writer that stores every snapshot under `key`.
    pub fn spawn<B>(store: B, key: impl Into<String>) -> Self
    where
        B: BlobStore + 'static,
    {
        let (tx, rx) = channel();
        let key = key.into();

        let handle = thread::spawn(move || run(store, key, rx));

        Self {
            tx: Some(tx),
            handle: Some(handle),
        }
    }

    /// Queue a snapshot for writing. Returns immediately.
    pub fn save(&self, cart: CartState) {
        let Some(tx) = &self.tx else {
            return;
        };
        if tx.send(cart).is_err() {
            tracing::warn!("persist writer has exited, dropping cart snapshot");
        }
    }

    /// Write whatever is still queued, stop the thread and return its
    /// statistics.
    pub fn stop(mut self) -> WriterStats {
        self.shutdown()
    }

    fn shutdown(&mut self) -> WriterStats {
        drop(self.tx.take());
        match self.handle.take() {
            Some(handle) => handle.join().unwrap_or_default(),
            None => WriterStats::default(),
        }
    }
}

impl Drop for PersistWriter {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run<B: BlobStore>(store: B, key: String, rx: Receiver<CartState>) -> WriterStats {
    let mut stats = WriterStats::default();

    while let Ok(mut cart) = rx.recv() {
        // Keep only the newest of anything already waiting.
        while let Ok(newer) = rx.try_recv() {
            cart = newer;
            stats.superseded += 1;
        }

        let result = PersistedState::new(cart)
            .encode()
            .and_then(|bytes| store.set(&key, bytes));

        match result {
            Ok(()) => stats.writes += 1,
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "failed to persist cart");
                stats.failures += 1;
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Product, Rating};
    use crate::persist::{hydrate_cart, InMemoryBlobStore, PersistError};
    use std::sync::{Arc, Mutex};

    fn hat() -> Product {
        Product {
            id: 3,
            title: "Green Hat".into(),
            price: 15.0,
            description: String::new(),
            category: String::new(),
            image: String::new(),
            rating: Rating::default(),
        }
    }

    struct ReadOnly;

    impl BlobStore for ReadOnly {
        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, PersistError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _bytes: Vec<u8>) -> Result<(), PersistError> {
            Err(PersistError::Storage("read-only filesystem".into()))
        }
    }

    #[test]
    fn last_snapshot_wins() {
        let store = InMemoryBlobStore::new();
        let writer = PersistWriter::spawn(store.clone(), "persist:root");

        let mut cart = CartState::new();
        for _ in 0..5 {
            cart.add_to_cart(hat());
            writer.save(cart.clone());
        }

        let stats = writer.stop();
        assert_eq!(stats.writes + stats.superseded, 5);
        assert_eq!(stats.failures, 0);
        assert_eq!(hydrate_cart(&store, "persist:root").quantity_of(3), Some(5));
    }

    /// Records the item count of every written snapshot. The first write
    /// blocks until the test releases it.
    struct Gated {
        entered: Mutex<Sender<()>>,
        release: Mutex<Option<Receiver<()>>>,
        written: Arc<Mutex<Vec<u32>>>,
    }

    impl BlobStore for Gated {
        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, PersistError> {
            Ok(None)
        }

        fn set(&self, _key: &str, bytes: Vec<u8>) -> Result<(), PersistError> {
            let gate = self.release.lock().unwrap().take();
            if let Some(release) = gate {
                self.entered.lock().unwrap().send(()).unwrap();
                release.recv().unwrap();
            }
            let state = PersistedState::decode(&bytes)?;
            self.written.lock().unwrap().push(state.cart.total_items());
            Ok(())
        }
    }

    #[test]
    fn queued_snapshots_collapse_to_the_newest() {
        let (entered_tx, entered_rx) = channel();
        let (release_tx, release_rx) = channel();
        let written = Arc::new(Mutex::new(Vec::new()));
        let writer = PersistWriter::spawn(
            Gated {
                entered: Mutex::new(entered_tx),
                release: Mutex::new(Some(release_rx)),
                written: Arc::clone(&written),
            },
            "persist:root",
        );

        let mut cart = CartState::new();
        cart.add_to_cart(hat());
        writer.save(cart.clone());
        entered_rx.recv().unwrap();

        // Written while the first snapshot is still being stored.
        for _ in 0..3 {
            cart.add_to_cart(hat());
            writer.save(cart.clone());
        }
        release_tx.send(()).unwrap();

        let stats = writer.stop();
        assert_eq!(*written.lock().unwrap(), vec![1, 4]);
        assert_eq!(stats.writes, 2);
        assert_eq!(stats.superseded, 2);
    }

    #[test]
    fn failures_are_counted_not_raised() {
        let writer = PersistWriter::spawn(ReadOnly, "persist:root");
        writer.save(CartState::new());
        let stats = writer.stop();

        assert_eq!(stats.writes, 0);
        assert_eq!(stats.failures, 1);
    }

    #[test]
    fn drop_flushes_pending_snapshots() {
        let store = InMemoryBlobStore::new();
        {
            let writer = PersistWriter::spawn(store.clone(), "persist:root");
            let mut cart = CartState::new();
            cart.add_to_cart(hat());
            writer.save(cart);
        }
        assert_eq!(hydrate_cart(&store, "persist:root").total_items(), 1);
    }
}
