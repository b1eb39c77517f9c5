//! Filtered, paginated view over the catalog.
//!
//! Nothing here is stored in the application state. The view is recomputed
//! from `(catalog, query, page)` whenever the presentation layer reads it.

use super::fetch::ProductSource;
use super::{CatalogAction, CatalogState, Product};
use crate::store::Store;

/// Products shown per page when no page size is configured.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// One read of the catalog view.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage<'a> {
    /// The first `page * page_size` matching products, in catalog order.
    pub items: Vec<&'a Product>,
    pub page: usize,
    /// Number of products matching the query before truncation.
    pub total_matches: usize,
    pub has_more: bool,
}

impl CatalogPage<'_> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Products whose title contains `query`, ignoring case. An empty query
/// matches everything.
pub fn filter_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    if query.is_empty() {
        return products.iter().collect();
    }

    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|product| product.title.to_lowercase().contains(&needle))
        .collect()
}

/// Truncate `filtered` to the first `page * page_size` items.
///
/// Pages are 1-based; page 0 is read as page 1.
pub fn paginate<'a>(filtered: Vec<&'a Product>, page: usize, page_size: usize) -> CatalogPage<'a> {
    let page = page.max(1);
    let limit = page.saturating_mul(page_size.max(1));
    let total_matches = filtered.len();

    let mut items = filtered;
    items.truncate(limit);

    CatalogPage {
        has_more: items.len() < total_matches,
        items,
        page,
        total_matches,
    }
}

/// Filter and paginate the catalog in one step.
pub fn catalog_page(catalog: &CatalogState, page: usize, page_size: usize) -> CatalogPage<'_> {
    paginate(
        filter_products(catalog.items(), catalog.search_query()),
        page,
        page_size,
    )
}

/// Page cursor owned by the presentation layer.
///
/// Searching and starting a re-fetch through the cursor always go back to
/// page 1, whatever the fetch later returns. Changes made to the store
/// behind the cursor's back (a new query, a new product list) are also
/// picked up on the next read.
#[derive(Debug, Clone)]
pub struct CatalogBrowser {
    page_size: usize,
    current_page: usize,
    seen_query: String,
    seen_generation: u64,
}

impl Default for CatalogBrowser {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl CatalogBrowser {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
            seen_query: String::new(),
            seen_generation: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Go back to the first page.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Set the search query and go back to page 1, even when the query is
    /// unchanged.
    pub fn search(&mut self, store: &mut Store, query: impl Into<String>) {
        store.dispatch(CatalogAction::SetSearchQuery(query.into()));
        self.seen_query = store.catalog().search_query().to_string();
        self.reset();
    }

    /// Hook for a re-fetch about to start. Goes back to page 1 so a failed
    /// fetch does not leave the cursor deep in the old list.
    pub fn refresh_started(&mut self) {
        self.reset();
    }

    /// `refresh_started`, then re-fetch the catalog into `store`.
    pub async fn refresh<S: ProductSource>(&mut self, store: &mut Store, source: &S) {
        self.refresh_started();
        store.refresh(source).await;
        self.seen_generation = store.catalog().generation();
    }

    /// Current view of the catalog.
    pub fn visible<'a>(&mut self, catalog: &'a CatalogState) -> CatalogPage<'a> {
        self.sync(catalog);
        catalog_page(catalog, self.current_page, self.page_size)
    }

    /// Advance one page if more items are available and no fetch is in
    /// flight. Returns whether the page moved.
    pub fn load_more(&mut self, catalog: &CatalogState) -> bool {
        self.sync(catalog);
        if catalog.is_loading() {
            return false;
        }

        let page = catalog_page(catalog, self.current_page, self.page_size);
        if !page.has_more {
            return false;
        }

        self.current_page += 1;
        true
    }

    fn sync(&mut self, catalog: &CatalogState) {
        let query_changed = self.seen_query != catalog.search_query();
        let refetched = self.seen_generation != catalog.generation();
        if query_changed || refetched {
            self.seen_query = catalog.search_query().to_string();
            self.seen_generation = catalog.generation();
            self.reset();
        }
    }
}
