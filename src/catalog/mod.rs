//! Catalog - The fetched product list, its load status and the search query.
//!
//! The catalog slice is fed by a single remote read (see [`fetch`]) and
//! consumed by the presentation layer through the pure derivation in
//! [`view`]. It is never persisted; every process start fetches it fresh.
//!
//! ## Example
//!
//! ```ignore
//! use storefront_state::{CatalogAction, CatalogState};
//!
//! let mut catalog = CatalogState::default();
//! catalog.apply(CatalogAction::SetLoading(true));
//! catalog.apply(CatalogAction::SetProducts(products));
//! catalog.apply(CatalogAction::SetLoading(false));
//! ```

pub mod fetch;
pub mod view;

use serde::{Deserialize, Serialize};

/// Identifier of a product in the remote catalog.
pub type ProductId = u64;

/// Aggregate review score attached to a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average score, 0 to 5.
    pub rate: f64,
    pub count: u32,
}

/// A product as served by the catalog endpoint. Never mutated locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
    #[serde(default)]
    pub rating: Rating,
}

/// Mutations accepted by the catalog slice.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogAction {
    SetLoading(bool),
    /// Replace the product list wholesale and clear any error.
    SetProducts(Vec<Product>),
    /// Record a failure. Stale products stay visible.
    SetError(String),
    SetSearchQuery(String),
}

/// State of the product catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogState {
    items: Vec<Product>,
    loading: bool,
    error: Option<String>,
    search_query: String,
    #[serde(skip)]
    generation: u64,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Bumped every time a product list replaces the current one.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Look up a loaded product by id.
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.items.iter().find(|product| product.id == id)
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_products(&mut self, products: Vec<Product>) {
        self.items = products;
        self.error = None;
        self.generation += 1;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.loading = false;
    }

    /// Stored verbatim; trimming and case folding belong to the view.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Apply a single action to the slice.
    pub fn apply(&mut self, action: CatalogAction) {
        match action {
            CatalogAction::SetLoading(loading) => self.set_loading(loading),
            CatalogAction::SetProducts(products) => self.set_products(products),
            CatalogAction::SetError(message) => self.set_error(message),
            CatalogAction::SetSearchQuery(query) => self.set_search_query(query),
        }
    }
}
