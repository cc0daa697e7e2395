//! Paginated feed tests
//!
//! Paging, dedup, the single-flight guard, failure handling and refresh.

mod common;

use std::sync::Arc;

use cinemapp::catalog::{search, CatalogFeed, LoadOutcome, FIRST_PAGE};
use cinemapp::models::CatalogType;
use common::{item, FakeCatalog};

fn movie_feed(fake: &Arc<FakeCatalog>) -> CatalogFeed {
    CatalogFeed::catalog(fake.clone(), CatalogType::Movie)
}

// =============================================================================
// Paging
// =============================================================================

#[tokio::test]
async fn test_new_feed_is_empty_at_first_page() {
    let fake = Arc::new(FakeCatalog::new());
    let feed = movie_feed(&fake);

    assert!(feed.is_empty());
    assert_eq!(feed.page(), FIRST_PAGE);
    assert!(!feed.is_loading());
    assert_eq!(feed.kind(), CatalogType::Movie);
    assert_eq!(fake.page_calls(), 0);
}

#[tokio::test]
async fn test_two_loads_accumulate_forty_items() {
    let fake = Arc::new(FakeCatalog::new());
    let mut feed = movie_feed(&fake);

    assert_eq!(feed.load_next().await.unwrap(), LoadOutcome::Appended { added: 20 });
    assert_eq!(feed.page(), 2);
    assert_eq!(feed.load_next().await.unwrap(), LoadOutcome::Appended { added: 20 });

    assert_eq!(feed.len(), 40);
    assert_eq!(feed.page(), 3);
    assert!(!feed.is_loading());

    // Load order is preserved
    let ids: Vec<u64> = feed.items().iter().map(|i| i.id).collect();
    assert_eq!(ids, (1..=40).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_refresh_replaces_with_first_page() {
    let fake = Arc::new(FakeCatalog::new());
    let mut feed = movie_feed(&fake);
    feed.load_next().await.unwrap();
    feed.load_next().await.unwrap();

    assert_eq!(feed.refresh().await.unwrap(), LoadOutcome::Replaced { count: 20 });
    assert_eq!(feed.len(), 20);
    assert_eq!(feed.page(), 2);
    assert_eq!(feed.items()[0].id, 1);
}

#[tokio::test]
async fn test_duplicates_across_pages_are_dropped() {
    let kind = CatalogType::Movie;
    let mut page_two: Vec<_> = (19..=38).map(|id| item(kind, id, "dup?")).collect();
    page_two.push(item(kind, 1, "first again"));
    let fake = Arc::new(FakeCatalog::new().with_page(2, page_two));
    let mut feed = movie_feed(&fake);

    feed.load_next().await.unwrap();
    assert_eq!(feed.load_next().await.unwrap(), LoadOutcome::Appended { added: 18 });

    assert_eq!(feed.len(), 38);
    // First occurrence wins
    assert_eq!(feed.items()[18].title, "Movie 19");
    assert_eq!(feed.page(), 3);
}

#[tokio::test]
async fn test_duplicates_within_a_page_are_dropped() {
    let kind = CatalogType::Tv;
    let fake = Arc::new(FakeCatalog::new().with_page(
        1,
        vec![item(kind, 7, "a"), item(kind, 7, "b"), item(kind, 8, "c")],
    ));
    let mut feed = CatalogFeed::catalog(fake.clone(), kind);

    assert_eq!(feed.load_next().await.unwrap(), LoadOutcome::Appended { added: 2 });
    assert_eq!(feed.items()[0].title, "a");
}

#[tokio::test]
async fn test_empty_page_still_advances_cursor() {
    let fake = Arc::new(FakeCatalog::new().with_page(1, Vec::new()));
    let mut feed = movie_feed(&fake);

    assert_eq!(feed.load_next().await.unwrap(), LoadOutcome::Appended { added: 0 });
    assert!(feed.is_empty());
    assert_eq!(feed.page(), 2);
}

// =============================================================================
// Single-flight guard
// =============================================================================

#[tokio::test]
async fn test_overlapping_load_is_dropped() {
    let fake = Arc::new(FakeCatalog::new());
    let mut feed = movie_feed(&fake);

    let request = feed.begin_load_next().expect("guard is free");
    assert!(feed.is_loading());
    assert!(feed.begin_load_next().is_none());
    assert_eq!(feed.load_next().await.unwrap(), LoadOutcome::Skipped);

    let response = feed.fetch(request).await;
    feed.complete(response).unwrap();

    // Only the first intent reached the network
    assert_eq!(fake.page_calls(), 1);
    assert_eq!(feed.len(), 20);
    assert_eq!(feed.page(), 2);
}

#[tokio::test]
async fn test_fetch_runs_on_a_spawned_task() {
    let fake = Arc::new(FakeCatalog::new());
    let mut feed = movie_feed(&fake);

    let request = feed.begin_load_next().unwrap();
    let response = tokio::spawn(feed.fetch(request)).await.unwrap();

    assert!(feed.is_loading());
    assert_eq!(feed.complete(response).unwrap(), LoadOutcome::Appended { added: 20 });
    assert!(!feed.is_loading());
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_failed_load_leaves_state_unchanged() {
    let fake = Arc::new(FakeCatalog::new());
    let mut feed = movie_feed(&fake);
    feed.load_next().await.unwrap();

    fake.fail_page(2);
    let err = feed.load_next().await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(feed.len(), 20);
    assert_eq!(feed.page(), 2);
    assert!(!feed.is_loading(), "guard is released after failure");

    // No retry happened; a later intent fetches the same page again
    assert_eq!(fake.page_calls(), 2);
    fake.heal_page(2);
    feed.load_next().await.unwrap();
    assert_eq!(feed.len(), 40);
    assert_eq!(feed.page(), 3);
}

#[tokio::test]
async fn test_failed_refresh_keeps_items_and_cursor() {
    let fake = Arc::new(FakeCatalog::new());
    let mut feed = movie_feed(&fake);
    feed.load_next().await.unwrap();
    feed.load_next().await.unwrap();

    fake.fail_page(1);
    assert!(feed.refresh().await.is_err());

    assert_eq!(feed.len(), 40);
    assert_eq!(feed.page(), 3);
    assert!(!feed.is_loading());
}

// =============================================================================
// Refresh vs in-flight appends
// =============================================================================

#[tokio::test]
async fn test_refresh_discards_in_flight_append() {
    let fake = Arc::new(FakeCatalog::new());
    let mut feed = movie_feed(&fake);
    feed.load_next().await.unwrap();

    let append = feed.begin_load_next().unwrap();
    let refresh = feed.begin_refresh();

    let append_response = feed.fetch(append).await;
    let refresh_response = feed.fetch(refresh).await;

    // The older append lands first and is ignored; the refresh still owns the guard
    assert_eq!(feed.complete(append_response).unwrap(), LoadOutcome::Discarded);
    assert!(feed.is_loading());

    assert_eq!(feed.complete(refresh_response).unwrap(), LoadOutcome::Replaced { count: 20 });
    assert_eq!(feed.len(), 20);
    assert_eq!(feed.page(), 2);
    assert!(!feed.is_loading());
}

#[tokio::test]
async fn test_search_over_loaded_feed() {
    let fake = Arc::new(FakeCatalog::new());
    let mut feed = movie_feed(&fake);
    feed.load_next().await.unwrap();

    let hits = search::apply(feed.items(), "movie 1");
    // "Movie 1" and "Movie 10".."Movie 19"
    assert_eq!(hits.len(), 11);
    assert_eq!(search::apply(feed.items(), "   ").len(), 20);
    assert!(search::apply(feed.items(), "zzz").is_empty());
}
