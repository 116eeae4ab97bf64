//! Integration tests for the local object store slice
//!
//! Covers keyed put/get, last-write-wins replacement, missing keys, and
//! durability across pool reopens.

mod test_helpers;

use chord_core::ObjectStore;
use chord_storage::SqliteObjectStore;
use test_helpers::TestDb;

#[tokio::test]
async fn test_put_then_get_round_trip() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    chord_storage::blobs::put(pool, "upload-1", b"audio bytes")
        .await
        .expect("Failed to store payload");

    let payload = chord_storage::blobs::get(pool, "upload-1")
        .await
        .expect("Failed to fetch payload");

    assert_eq!(payload.as_deref(), Some(b"audio bytes".as_slice()));
}

#[tokio::test]
async fn test_get_missing_id_returns_none() {
    let test_db = TestDb::new().await;

    let payload = chord_storage::blobs::get(test_db.pool(), "never-stored")
        .await
        .unwrap();

    assert!(payload.is_none());
}

#[tokio::test]
async fn test_put_same_id_replaces_payload() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    chord_storage::blobs::put(pool, "upload-1", b"first").await.unwrap();
    chord_storage::blobs::put(pool, "upload-1", b"second").await.unwrap();

    let payload = chord_storage::blobs::get(pool, "upload-1").await.unwrap();
    assert_eq!(payload.as_deref(), Some(b"second".as_slice()));
}

#[tokio::test]
async fn test_delete_removes_payload() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    chord_storage::blobs::put(pool, "upload-1", b"bytes").await.unwrap();
    chord_storage::blobs::delete(pool, "upload-1").await.unwrap();

    assert!(chord_storage::blobs::get(pool, "upload-1").await.unwrap().is_none());

    // Deleting again is a no-op
    chord_storage::blobs::delete(pool, "upload-1").await.unwrap();
}

#[tokio::test]
async fn test_object_store_trait_delegates_to_slice() {
    let test_db = TestDb::new().await;
    let store = SqliteObjectStore::new(test_db.pool().clone());

    store.put("upload-2", b"via trait").await.unwrap();

    let direct = chord_storage::blobs::get(test_db.pool(), "upload-2")
        .await
        .unwrap();
    assert_eq!(direct.as_deref(), Some(b"via trait".as_slice()));

    let via_trait = store.get("upload-2").await.unwrap();
    assert_eq!(via_trait.as_deref(), Some(b"via trait".as_slice()));
}

#[tokio::test]
async fn test_payload_survives_pool_reopen() {
    let test_db = TestDb::new().await;

    chord_storage::blobs::put(test_db.pool(), "upload-3", b"durable")
        .await
        .unwrap();
    test_db.pool().close().await;

    let reopened = chord_storage::create_pool(&test_db.url())
        .await
        .expect("Failed to reopen pool");

    let payload = chord_storage::blobs::get(&reopened, "upload-3").await.unwrap();
    assert_eq!(payload.as_deref(), Some(b"durable".as_slice()));
}
