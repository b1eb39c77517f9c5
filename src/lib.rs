pub mod cart;
pub mod catalog;
pub mod config;
#[cfg(feature = "emitter")]
pub mod emitter;
pub mod format;
pub mod persist;
pub mod store;

pub use cart::{calculate_totals, CartAction, CartLineItem, CartRecordError, CartState, CheckoutSummary};
pub use catalog::fetch::{fetch_products, FetchError, FetchOutcome, ProductSource, FETCH_FAILED_MESSAGE};
#[cfg(feature = "http")]
pub use catalog::fetch::HttpProductSource;
pub use catalog::view::{
    catalog_page, filter_products, paginate, CatalogBrowser, CatalogPage, DEFAULT_PAGE_SIZE,
};
pub use catalog::{CatalogAction, CatalogState, Product, ProductId, Rating};
pub use config::StoreConfig;
pub use format::{added_to_cart_message, format_price, format_rating, line_total};
pub use persist::{
    encode_cart, hydrate_cart, BlobStore, FileBlobStore, InMemoryBlobStore, PersistError,
    PersistWriter, PersistedState, WriterStats,
};
pub use store::{Action, AppState, Store, SubscriptionId};

// Re-export the EventEmitter from the event_emitter_rs crate
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
#[cfg(feature = "emitter")]
pub use emitter::StoreEmitter;
