//! Integration tests for the file backend using the storage test harness.
//!
//! Each test gets a fresh temporary directory via `tempfile::TempDir`.

#[macro_use]
mod storage_harness;

use locstore::storage::{AsyncStorage, FileBackend};
use storage_harness::*;
use tempfile::TempDir;

fn fresh_file_store() -> AsyncStorage<FileBackend> {
    let dir = TempDir::new().expect("Failed to create temp dir");
    // Leak the TempDir so it lives for the duration of the test
    // (otherwise it would be dropped immediately, deleting the files)
    let path = dir.path().to_path_buf();
    std::mem::forget(dir);
    AsyncStorage::new(FileBackend::open(&path).expect("Failed to open file backend"))
}

collection_store_tests!(fresh_file_store());

#[tokio::test]
async fn test_records_survive_reopen() {
    use locstore::core::service::CollectionStore;
    use locstore::core::location::Location;

    let dir = TempDir::new().unwrap();
    let store = AsyncStorage::new(FileBackend::open(dir.path()).unwrap());
    let created = store
        .post("locs", create_test_location("Dahab", 5.0, "Sinai"))
        .await
        .unwrap();
    drop(store);

    let reopened = AsyncStorage::new(FileBackend::open(dir.path()).unwrap());
    let all: Vec<Location> = reopened.query("locs").await.unwrap();
    assert_eq!(all, vec![created]);
}

#[tokio::test]
async fn test_reads_browser_storage_dump() {
    use locstore::core::service::CollectionStore;
    use locstore::core::location::Location;

    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("locs.json"),
        r#"[{"id":"GEouN","name":"Dahab, Egypt","rate":5,
            "geo":{"address":"Dahab, South Sinai, Egypt","lat":28.5096676,"lng":34.5165187,"zoom":11},
            "createdAt":1706562160181,"updatedAt":1706562160181}]"#,
    )
    .unwrap();

    let store = AsyncStorage::new(FileBackend::open(dir.path()).unwrap());
    let loc: Location = store.get("locs", "GEouN").await.unwrap();
    assert_eq!(loc.name, "Dahab, Egypt");
    assert_eq!(loc.rate, 5.0);
    assert_eq!(loc.geo.zoom, 11);
    assert_eq!(loc.created_at, T0);
}
