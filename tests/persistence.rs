mod common;

use common::{api_as, board_with_lists, new_api};
use tempfile::TempDir;
use workshift::config::Config;
use workshift::persistence::{open_store, FileSnapshotStore, MemorySnapshotStore, SnapshotStore};

#[tokio::test]
async fn test_file_store_missing_file_loads_nothing() {
    let dir = TempDir::new().unwrap();
    let store = FileSnapshotStore::new(dir.path().join("snapshot.json"));
    assert!(store.load().await.unwrap().is_none());
    store.clear().await.unwrap();
}

#[tokio::test]
async fn test_file_store_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("snapshot.json");
    let store = FileSnapshotStore::new(&path);

    let (api, _) = api_as("ada").await;
    board_with_lists(&api, "Saved").await;
    api.save_to(&store).await.unwrap();
    assert!(path.exists());
    assert!(!path.with_file_name("snapshot.json.tmp").exists());

    let fresh = new_api().await;
    assert!(fresh.load_from(&store).await.unwrap());
    assert_eq!(fresh.snapshot().await.unwrap().boards[0].title, "Saved");

    store.clear().await.unwrap();
    assert!(!path.exists());
    assert!(!new_api().await.load_from(&store).await.unwrap());
}

#[tokio::test]
async fn test_file_store_rejects_garbage() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snapshot.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = FileSnapshotStore::new(&path);
    assert!(store.load().await.is_err());
}

#[tokio::test]
async fn test_memory_store() {
    let store = MemorySnapshotStore::new();
    assert!(store.load().await.unwrap().is_none());

    let (api, _) = api_as("ada").await;
    api.save_to(&store).await.unwrap();
    assert_eq!(store.load().await.unwrap().unwrap().users.len(), 1);

    // Clones share the slot
    let other = store.clone();
    other.clear().await.unwrap();
    assert!(store.load().await.unwrap().is_none());
}

#[test]
fn test_open_store_follows_config() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.storage.snapshot_path = Some(dir.path().join("data.json"));

    let store = open_store(&config).unwrap();
    assert!(store.describe().contains("data.json"));

    config.storage.persist = false;
    let store = open_store(&config).unwrap();
    assert_eq!(store.describe(), "session memory");
}
