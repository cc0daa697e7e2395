//! Favorites store and detail resolver tests

mod common;

use std::sync::Arc;

use cinemapp::catalog::{DetailResolver, FavoritesStore};
use cinemapp::error::CatalogError;
use cinemapp::models::CatalogType;
use common::{item, record, FakeCatalog};

// =============================================================================
// FavoritesStore
// =============================================================================

#[test]
fn test_add_is_idempotent() {
    let store = FavoritesStore::new();
    let fave = record(CatalogType::Movie, 5, "Five");

    assert!(store.add(fave.clone()));
    assert!(store.is_favorite(5));
    assert_eq!(store.len(), 1);

    assert!(store.add(fave));
    assert_eq!(store.list().len(), 1);
}

#[test]
fn test_existing_entry_is_not_replaced() {
    let store = FavoritesStore::new();
    store.add(record(CatalogType::Movie, 5, "Original"));
    store.add(record(CatalogType::Movie, 5, "Renamed"));

    assert_eq!(store.list()[0].title(), "Original");
}

#[test]
fn test_remove_missing_is_noop() {
    let store = FavoritesStore::new();
    store.add(record(CatalogType::Tv, 5, "Five"));

    assert!(store.remove(5));
    assert!(!store.is_favorite(5));
    assert!(!store.remove(5));
    assert!(store.is_empty());
}

#[test]
fn test_list_keeps_insertion_order() {
    let store = FavoritesStore::new();
    for id in [3, 1, 2] {
        store.add(item(CatalogType::Movie, id, "x"));
    }
    let ids: Vec<u64> = store.list().iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec![3, 1, 2]);
}

#[test]
fn test_subscribers_see_only_effective_changes() {
    let store = FavoritesStore::new();
    let mut rx = store.subscribe();
    assert!(!rx.has_changed().unwrap());

    store.add(record(CatalogType::Movie, 5, "Five"));
    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().contains(5));

    store.add(record(CatalogType::Movie, 5, "Five"));
    assert!(!rx.has_changed().unwrap(), "duplicate add must not notify");

    store.remove(42);
    assert!(!rx.has_changed().unwrap(), "removing a missing id must not notify");

    store.remove(5);
    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().is_empty());
}

#[tokio::test]
async fn test_subscriber_wakes_on_other_task() {
    let store = FavoritesStore::new();
    let mut rx = store.subscribe();

    let writer = store.clone();
    tokio::spawn(async move {
        writer.add(record(CatalogType::Tv, 9, "Nine"));
    });

    rx.changed().await.unwrap();
    assert!(rx.borrow().contains(9));
    assert!(store.is_favorite(9));
}

// =============================================================================
// DetailResolver
// =============================================================================

#[tokio::test]
async fn test_resolve_fetches_record() {
    let fake = Arc::new(FakeCatalog::new());
    let resolver = DetailResolver::new(fake.clone(), FavoritesStore::new());

    let record = resolver.resolve(CatalogType::Tv, Some(1396)).await.unwrap();

    assert_eq!(record.id(), 1396);
    assert_eq!(record.title(), "Show 1396");
    assert_eq!(fake.detail_calls(), 1);

    // Nothing is cached
    resolver.resolve(CatalogType::Tv, Some(1396)).await.unwrap();
    assert_eq!(fake.detail_calls(), 2);
}

#[tokio::test]
async fn test_missing_id_fails_without_network() {
    let fake = Arc::new(FakeCatalog::new());
    let resolver = DetailResolver::new(fake.clone(), FavoritesStore::new());

    let err = resolver.resolve(CatalogType::Movie, None).await.unwrap_err();
    assert!(matches!(err, CatalogError::MissingId));

    let err = resolver.resolve(CatalogType::Movie, Some(0)).await.unwrap_err();
    assert!(matches!(err, CatalogError::MissingId));

    assert_eq!(fake.detail_calls(), 0);
}

#[tokio::test]
async fn test_toggle_favorite_only_adds() {
    let store = FavoritesStore::new();
    let resolver = DetailResolver::new(Arc::new(FakeCatalog::new()), store.clone());
    let record = resolver.resolve(CatalogType::Movie, Some(5)).await.unwrap();

    assert!(!resolver.is_favorite(5));
    assert!(resolver.toggle_favorite(&record));
    assert!(resolver.toggle_favorite(&record));

    assert!(store.is_favorite(5));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_resolvers_share_one_store() {
    let store = FavoritesStore::new();
    let fake = Arc::new(FakeCatalog::new());
    let first = DetailResolver::new(fake.clone(), store.clone());
    let second = DetailResolver::new(fake, store);

    let record = first.resolve(CatalogType::Movie, Some(12)).await.unwrap();
    first.toggle_favorite(&record);

    assert!(second.is_favorite(12));
    assert_eq!(second.favorites().list()[0].overview, "Overview of Movie 12");
}
