//! Macro-generated test suite for `CollectionStore<Location>` contract validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use locstore::storage::{AsyncStorage, MemoryBackend};
//!
//! collection_store_tests!(AsyncStorage::new(MemoryBackend::new()));
//! ```
//!
//! # Generated Tests
//!
//! - `test_post_and_get` — post then retrieve, verify all fields
//! - `test_get_nonexistent` — get with unknown id is `NotFound`
//! - `test_query_empty` — never-written collection is empty
//! - `test_query_keeps_insertion_order` — post 5, query returns them in order
//! - `test_post_assigns_unique_ids` — ids are distinct
//! - `test_put_existing` — mutate, verify persisted in place
//! - `test_put_nonexistent` — put with unknown id is `NotFound`
//! - `test_remove_existing` — remove then get is `NotFound`
//! - `test_remove_nonexistent` — remove unknown id is `NotFound`
//! - `test_collections_isolated` — two keys do not see each other
//! - `test_concurrent_posts` — parallel posts from spawned tasks all land

/// Generate a full `CollectionStore<Location>` conformance test suite.
///
/// `$factory` must evaluate to a fresh store. It is re-evaluated for each
/// test. For the concurrent test the store must also be `Clone + 'static`.
#[macro_export]
macro_rules! collection_store_tests {
    ($factory:expr) => {
        mod collection_store_contract_tests {
            use super::*;
            use locstore::core::location::Location;
            use locstore::core::service::CollectionStore;

            const KEY: &str = "locs";

            #[tokio::test]
            async fn test_post_and_get() {
                let store = $factory;
                let loc = create_test_location_at("Dahab", 5.0, T0);

                let created = store.post(KEY, loc).await.unwrap();
                let id = created.id.clone().expect("post should assign an id");
                assert_eq!(created.name, "Dahab");
                assert_eq!(created.created_at, T0);

                let retrieved: Location = store.get(KEY, &id).await.unwrap();
                assert_eq!(retrieved, created);
                assert_eq!(retrieved.geo.address, "");
                assert_eq!(retrieved.geo.zoom, 10);
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let store = $factory;
                let result: locstore::core::Result<Location> = store.get(KEY, "missing").await;
                assert!(
                    result.unwrap_err().is_not_found(),
                    "Getting a nonexistent record should be NotFound"
                );
            }

            #[tokio::test]
            async fn test_query_empty() {
                let store = $factory;
                let all: Vec<Location> = store.query(KEY).await.unwrap();
                assert!(all.is_empty(), "Query on empty store should return empty vec");
            }

            #[tokio::test]
            async fn test_query_keeps_insertion_order() {
                let store = $factory;
                for loc in sample_batch(5) {
                    store.post(KEY, loc).await.unwrap();
                }

                let all: Vec<Location> = store.query(KEY).await.unwrap();
                assert_count(&all, 5);
                assert_eq!(
                    names(&all),
                    vec!["Place_0", "Place_1", "Place_2", "Place_3", "Place_4"]
                );
            }

            #[tokio::test]
            async fn test_post_assigns_unique_ids() {
                let store = $factory;
                let mut ids = std::collections::HashSet::new();
                for loc in sample_batch(20) {
                    let created = store.post(KEY, loc).await.unwrap();
                    assert!(ids.insert(created.id.unwrap()), "duplicate id assigned");
                }
            }

            #[tokio::test]
            async fn test_put_existing() {
                let store = $factory;
                let first = store
                    .post(KEY, create_test_location("Alice Beach", 3.0, "Eilat"))
                    .await
                    .unwrap();
                store
                    .post(KEY, create_test_location("Bob Bay", 2.0, "Aqaba"))
                    .await
                    .unwrap();

                let mut changed = first.clone();
                changed.name = "Alice Beach Updated".to_string();
                changed.rate = 4.0;
                changed.updated_at = T0 + 1;

                let updated = store.put(KEY, changed).await.unwrap();
                assert_eq!(updated.name, "Alice Beach Updated");

                let all: Vec<Location> = store.query(KEY).await.unwrap();
                assert_count(&all, 2);
                assert_eq!(all[0].id, first.id, "put should keep the record's position");
                assert_eq!(all[0].name, "Alice Beach Updated");
                assert_eq!(all[0].rate, 4.0);
                assert_eq!(all[0].updated_at, T0 + 1);
            }

            #[tokio::test]
            async fn test_put_nonexistent() {
                let store = $factory;
                let mut ghost = create_test_location("Ghost", 1.0, "");
                ghost.id = Some("ghost".to_string());

                let result = store.put(KEY, ghost).await;
                assert!(
                    result.unwrap_err().is_not_found(),
                    "Updating a nonexistent record should be NotFound"
                );
            }

            #[tokio::test]
            async fn test_remove_existing() {
                let store = $factory;
                let created = store
                    .post(KEY, create_test_location("ToDelete", 2.0, ""))
                    .await
                    .unwrap();
                let id = created.id.unwrap();

                CollectionStore::<Location>::remove(&store, KEY, &id)
                    .await
                    .unwrap();

                let result: locstore::core::Result<Location> = store.get(KEY, &id).await;
                assert!(result.unwrap_err().is_not_found(), "Record should be gone");
            }

            #[tokio::test]
            async fn test_remove_nonexistent() {
                let store = $factory;
                let result = CollectionStore::<Location>::remove(&store, KEY, "missing").await;
                assert!(result.unwrap_err().is_not_found());
            }

            #[tokio::test]
            async fn test_collections_isolated() {
                let store = $factory;
                store
                    .post("locs", create_test_location("Here", 3.0, ""))
                    .await
                    .unwrap();
                store
                    .post("archive", create_test_location("There", 3.0, ""))
                    .await
                    .unwrap();

                let locs: Vec<Location> = store.query("locs").await.unwrap();
                let archive: Vec<Location> = store.query("archive").await.unwrap();
                assert_eq!(names(&locs), vec!["Here"]);
                assert_eq!(names(&archive), vec!["There"]);
            }

            #[tokio::test]
            async fn test_concurrent_posts() {
                let store = $factory;
                let mut handles = Vec::new();

                for loc in sample_batch(10) {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move { store.post(KEY, loc).await }));
                }

                for handle in handles {
                    handle.await.unwrap().unwrap();
                }

                let all: Vec<Location> = store.query(KEY).await.unwrap();
                assert_count(&all, 10);
            }
        }
    };
}
