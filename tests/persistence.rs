mod support;

use std::fs;

use storefront_state::{
    hydrate_cart, CartAction, CatalogAction, FileBlobStore, PersistedState, Store, StoreConfig,
};
use support::{init_tracing, product, wardrobe};

#[test]
fn cart_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::default();

    let mut first = Store::with_persistence(FileBlobStore::new(dir.path()).unwrap(), &config.persist_key);
    first.dispatch(CatalogAction::SetProducts(wardrobe()));
    for p in wardrobe() {
        first.dispatch(CartAction::Add(p));
    }
    first.dispatch(CartAction::Increment(2));
    first.dispatch(CartAction::Decrement(3));
    let saved = first.cart().clone();
    first.shutdown().unwrap();

    let second = Store::with_persistence(FileBlobStore::new(dir.path()).unwrap(), &config.persist_key);

    assert_eq!(second.cart(), &saved);
    assert_eq!(second.cart().total_items(), 3);
    assert!((second.cart().total_amount() - (19.99 + 21.5 * 2.0)).abs() < 1e-9);
    // The catalog is always fetched fresh.
    assert!(second.catalog().items().is_empty());
}

#[test]
fn persisted_blob_holds_only_the_cart() {
    let dir = tempfile::tempdir().unwrap();
    let blobs = FileBlobStore::new(dir.path()).unwrap();

    let mut store = Store::with_persistence(blobs.clone(), "persist:root");
    store.dispatch(CatalogAction::SetProducts(wardrobe()));
    store.dispatch(CartAction::Add(product(1, "Red Shirt", 19.99)));
    store.shutdown();

    let raw = fs::read(blobs.path_for("persist:root")).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    assert!(value.get("catalog").is_none());
    assert_eq!(value["cart"]["items"].as_array().unwrap().len(), 1);

    let decoded = PersistedState::decode(&raw).unwrap();
    assert_eq!(decoded.cart.total_items(), 1);
}

#[test]
fn corrupt_file_starts_an_empty_cart() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let blobs = FileBlobStore::new(dir.path()).unwrap();
    fs::write(blobs.path_for("persist:root"), b"\x00\x01 definitely not json").unwrap();

    assert!(hydrate_cart(&blobs, "persist:root").is_empty());

    let mut store = Store::with_persistence(blobs.clone(), "persist:root");
    assert!(store.cart().is_empty());

    // The next change overwrites the corrupt blob.
    store.dispatch(CartAction::Add(product(3, "Green Hat", 9.0)));
    store.shutdown();
    assert_eq!(hydrate_cart(&blobs, "persist:root").quantity_of(3), Some(1));
}

#[test]
fn clear_is_persisted_too() {
    let dir = tempfile::tempdir().unwrap();
    let blobs = FileBlobStore::new(dir.path()).unwrap();

    let mut store = Store::with_persistence(blobs.clone(), "persist:root");
    store.dispatch(CartAction::Add(product(1, "Red Shirt", 19.99)));
    store.dispatch(CartAction::Clear);
    store.shutdown();

    let restored = hydrate_cart(&blobs, "persist:root");
    assert!(restored.is_empty());
    assert_eq!(restored.total_amount(), 0.0);
}
