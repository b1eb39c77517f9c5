//! Store - The single application state container.
//!
//! `Store` owns both slices. All mutations go through [`Store::dispatch`],
//! which runs the slice reducer synchronously and then calls every
//! subscribed listener with the new snapshot. Because dispatch takes
//! `&mut self`, no mutation can observe another one half-applied.
//!
//! When built with persistence, the cart is hydrated before the store is
//! returned and every cart change is handed to a [`PersistWriter`].
//!
//! ## Example
//!
//! ```ignore
//! use storefront_state::{CartAction, InMemoryBlobStore, Store};
//!
//! let mut store = Store::with_persistence(InMemoryBlobStore::new(), "persist:root");
//! let id = store.subscribe(|state| println!("{} items", state.cart.total_items()));
//!
//! store.dispatch(CartAction::Add(product));
//! store.unsubscribe(id);
//! ```

mod action;

use serde::Serialize;

use crate::cart::{CartState, CheckoutSummary};
use crate::catalog::fetch::{fetch_products, FetchOutcome, ProductSource};
use crate::catalog::{CatalogAction, CatalogState};
use crate::persist::{hydrate_cart, BlobStore, PersistWriter, WriterStats};

pub use action::Action;

/// Snapshot of both slices.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppState {
    pub catalog: CatalogState,
    pub cart: CartState,
}

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&AppState) + Send>;

pub struct Store {
    state: AppState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    writer: Option<PersistWriter>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// A store with empty slices and no persistence.
    pub fn new() -> Self {
        Self::from_state(AppState::default())
    }

    pub fn from_state(state: AppState) -> Self {
        Self {
            state,
            listeners: Vec::new(),
            next_subscription: 1,
            writer: None,
        }
    }

    /// Hydrate the cart from `blobs[key]` and persist every later cart
    /// change there.
    pub fn with_persistence<B>(blobs: B, key: impl Into<String>) -> Self
    where
        B: BlobStore + 'static,
    {
        let key = key.into();
        let cart = hydrate_cart(&blobs, &key);
        let mut store = Self::from_state(AppState {
            catalog: CatalogState::default(),
            cart,
        });
        store.writer = Some(PersistWriter::spawn(blobs, key));
        store
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn cart(&self) -> &CartState {
        &self.state.cart
    }

    pub fn catalog(&self) -> &CatalogState {
        &self.state.catalog
    }

    pub fn is_persistent(&self) -> bool {
        self.writer.is_some()
    }

    /// Apply `action`, persist the cart if it changed, then notify listeners.
    pub fn dispatch(&mut self, action: impl Into<Action>) {
        let action = action.into();
        tracing::debug!(action = action.kind(), "dispatch");

        match action {
            Action::Cart(action) => {
                let before = self.state.cart.clone();
                self.state.cart.apply(action);
                if self.state.cart != before {
                    self.persist_cart();
                }
            }
            Action::Catalog(action) => self.state.catalog.apply(action),
        }

        self.notify();
    }

    /// Register a listener called after every dispatch, in subscription
    /// order.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&AppState) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Mark a catalog fetch as in flight.
    pub fn begin_fetch(&mut self) {
        self.dispatch(CatalogAction::SetLoading(true));
    }

    /// Apply the result of a fetch and clear the in-flight flag.
    ///
    /// Outcomes are applied in call order; a stale outcome applied after a
    /// newer one overwrites it.
    pub fn complete_fetch(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Loaded(products) => self.dispatch(CatalogAction::SetProducts(products)),
            FetchOutcome::Failed(message) => self.dispatch(CatalogAction::SetError(message)),
        }
        self.dispatch(CatalogAction::SetLoading(false));
    }

    /// `begin_fetch`, fetch from `source`, `complete_fetch`.
    pub async fn refresh<S: ProductSource>(&mut self, source: &S) {
        self.begin_fetch();
        let outcome = fetch_products(source).await;
        self.complete_fetch(outcome);
    }

    /// Checkout is not processed; this only reports what would be charged.
    pub fn checkout(&self) -> CheckoutSummary {
        let summary = self.state.cart.checkout_summary();
        tracing::info!(
            items = summary.total_items,
            total = summary.total,
            "checkout requested"
        );
        summary
    }

    /// Stop the persistence writer after it has written everything queued.
    pub fn shutdown(mut self) -> Option<WriterStats> {
        self.writer.take().map(PersistWriter::stop)
    }

    fn persist_cart(&self) {
        if let Some(writer) = &self.writer {
            writer.save(self.state.cart.clone());
        }
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(&self.state);
        }
    }
}
