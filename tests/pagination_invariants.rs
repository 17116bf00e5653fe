//! End-to-end pagination invariants against the in-memory store
//!
//! Pins the page-envelope arithmetic, cursor continuity across successive
//! pages, search-as-range behavior and the degraded-count mode.

use std::sync::Arc;

use serde_json::json;

use famstore::page::{PageRequest, Paginator};
use famstore::store::{DocumentStore, MemoryStore, SortDirection};

async fn store_with_users(count: usize) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    for i in 1..=count {
        store
            .create("users", json!({"name": format!("user{:02}", i)}))
            .await
            .unwrap();
    }
    store
}

fn ids(page: &famstore::page::PageResult<famstore::store::Document>) -> Vec<i64> {
    page.items.iter().map(|doc| doc.id).collect()
}

#[tokio::test]
async fn page_two_of_twenty_five_descending() {
    let store = store_with_users(25).await;
    let paginator = Paginator::new(store);

    let first = paginator
        .get_page(
            "users",
            &PageRequest::new(1, 10).with_sort("id", SortDirection::Desc),
        )
        .await
        .unwrap();
    assert_eq!(ids(&first), (16..=25).rev().collect::<Vec<_>>());

    let second = paginator
        .get_page(
            "users",
            &PageRequest::new(2, 10)
                .with_sort("id", SortDirection::Desc)
                .with_cursor(first.next_cursor.unwrap()),
        )
        .await
        .unwrap();

    assert_eq!(second.total_count, 25);
    assert_eq!(second.total_pages, 3);
    assert!(second.has_next);
    assert!(second.has_previous);
    assert_eq!(ids(&second), (6..=15).rev().collect::<Vec<_>>());
}

#[tokio::test]
async fn envelope_invariants_hold_on_every_page() {
    let store = store_with_users(25).await;
    let paginator = Paginator::new(store);

    let mut cursor = None;
    for page_number in 1..=3u32 {
        let mut request =
            PageRequest::new(page_number, 10).with_sort("id", SortDirection::Asc);
        if let Some(cursor) = cursor.take() {
            request = request.with_cursor(cursor);
        }

        let page = paginator.get_page("users", &request).await.unwrap();

        assert!(page.items.len() <= 10);
        assert_eq!(page.has_next, page_number < page.total_pages);
        assert_eq!(page.has_previous, page_number > 1);
        assert_eq!(page.total_pages, 3);

        cursor = page.next_cursor.clone();
    }
}

#[tokio::test]
async fn empty_collection_yields_zero_pages() {
    let store = Arc::new(MemoryStore::new());
    let paginator = Paginator::new(store);

    let page = paginator
        .get_page("users", &PageRequest::new(1, 10))
        .await
        .unwrap();

    assert_eq!(page.total_count, 0);
    assert_eq!(page.total_pages, 0);
    assert!(!page.has_next);
    assert!(!page.has_previous);
}

#[tokio::test]
async fn count_failure_degrades_instead_of_failing() {
    let store = store_with_users(25).await;
    store.set_fail_counts(true);

    let paginator = Paginator::new(Arc::clone(&store));
    let page = paginator
        .get_page("users", &PageRequest::new(1, 10))
        .await
        .unwrap();

    assert!(page.count_degraded);
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.total_count, page.items.len() as u64);
}

#[tokio::test]
async fn search_matches_exactly_the_prefix_interval() {
    let store = Arc::new(MemoryStore::new());
    for name in ["Akram", "Al", "Albert", "Alice", "Am", "Bashir"] {
        store.create("users", json!({"name": name})).await.unwrap();
    }

    let paginator = Paginator::new(store);
    let request = PageRequest::new(1, 10)
        .with_search("Al")
        .with_search_field("name")
        .with_sort("name", SortDirection::Asc);

    let page = paginator.get_page("users", &request).await.unwrap();
    let names: Vec<_> = page
        .items
        .iter()
        .map(|doc| doc.field("name").unwrap().as_str().unwrap().to_string())
        .collect();

    assert_eq!(names, ["Al", "Albert", "Alice"]);
    assert_eq!(page.total_count, 3);
}
