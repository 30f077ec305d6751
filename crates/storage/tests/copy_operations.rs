//! Integration tests for bucket-to-bucket copy.

mod common;

use std::path::PathBuf;

use bucket_sync_storage::{
    CopyOrchestrator, CopyRequest, Marker, StorageError, TransferKey, TransferState,
    TransferStatistics,
};
use common::{Call, TestStorageClient};
use tempfile::TempDir;

fn request() -> CopyRequest {
    CopyRequest {
        source_bucket: "dev".to_string(),
        target_bucket: "prod".to_string(),
        prefix: "images".to_string(),
    }
}

fn state_path(dir: &TempDir) -> PathBuf {
    dir.path().join("localCache.json")
}

#[tokio::test]
async fn test_copies_missing_object() {
    let dir: TempDir = TempDir::new().unwrap();
    let client: TestStorageClient = TestStorageClient::new();
    client.insert("dev", "images/x.png", b"png");

    let state: TransferState = TransferState::open(state_path(&dir)).await;
    let mut orchestrator = CopyOrchestrator::new(&client, state);
    let stats: TransferStatistics = orchestrator.copy_prefix(&request()).await.unwrap();

    assert_eq!(stats.files_transferred, 1);
    assert_eq!(client.copies(), 1);
    assert!(client.calls().contains(&Call::Copy {
        source_bucket: "dev".to_string(),
        source_key: "images/x.png".to_string(),
        target_bucket: "prod".to_string(),
        target_key: "images/x.png".to_string(),
    }));

    let key: TransferKey = TransferKey::for_copy("dev", "prod", "images/x.png");
    assert_eq!(orchestrator.state().get(&key), Some(&Marker::Confirmed));

    // Persisted, not just in memory.
    let reloaded: TransferState = TransferState::open(state_path(&dir)).await;
    assert_eq!(reloaded.get(&key), Some(&Marker::Confirmed));
}

#[tokio::test]
async fn test_existing_target_short_circuits_copy() {
    let dir: TempDir = TempDir::new().unwrap();
    let client: TestStorageClient = TestStorageClient::new();
    client.insert("dev", "images/x.png", b"png");
    client.insert("prod", "images/x.png", b"png");

    let state: TransferState = TransferState::open(state_path(&dir)).await;
    let mut orchestrator = CopyOrchestrator::new(&client, state);
    let stats: TransferStatistics = orchestrator.copy_prefix(&request()).await.unwrap();

    assert_eq!(client.heads(), 1);
    assert_eq!(client.copies(), 0);
    assert_eq!(stats.files_skipped, 1);

    let reloaded: TransferState = TransferState::open(state_path(&dir)).await;
    assert_eq!(
        reloaded.get(&TransferKey::for_copy("dev", "prod", "images/x.png")),
        Some(&Marker::Confirmed)
    );
}

#[tokio::test]
async fn test_confirmed_object_skips_head_and_copy() {
    let dir: TempDir = TempDir::new().unwrap();
    let client: TestStorageClient = TestStorageClient::new();
    client.insert("dev", "images/x.png", b"png");
    client.insert("dev", "images/y.png", b"png");

    let mut state: TransferState = TransferState::open(state_path(&dir)).await;
    state.set(
        TransferKey::for_copy("dev", "prod", "images/x.png"),
        Marker::Confirmed,
    );

    let mut orchestrator = CopyOrchestrator::new(&client, state);
    orchestrator.copy_prefix(&request()).await.unwrap();

    let touched_x: bool = client.calls().iter().any(|c| match c {
        Call::Head { key, .. } => key == "images/x.png",
        Call::Copy { source_key, .. } => source_key == "images/x.png",
        _ => false,
    });
    assert!(!touched_x);
    assert_eq!(client.copies(), 1);
}

#[tokio::test]
async fn test_second_run_issues_no_storage_calls_per_object() {
    let dir: TempDir = TempDir::new().unwrap();
    let client: TestStorageClient = TestStorageClient::new();
    client.insert("dev", "images/x.png", b"png");
    client.insert("dev", "images/sub/y.png", b"png");

    let state: TransferState = TransferState::open(state_path(&dir)).await;
    CopyOrchestrator::new(&client, state)
        .copy_prefix(&request())
        .await
        .unwrap();
    client.clear_calls();

    let state: TransferState = TransferState::open(state_path(&dir)).await;
    let stats: TransferStatistics = CopyOrchestrator::new(&client, state)
        .copy_prefix(&request())
        .await
        .unwrap();

    assert_eq!(stats.files_skipped, 2);
    assert_eq!(client.heads(), 0);
    assert_eq!(client.copies(), 0);
}

#[tokio::test]
async fn test_head_failure_leaves_object_untouched() {
    let dir: TempDir = TempDir::new().unwrap();
    let client: TestStorageClient = TestStorageClient::new();
    client.insert("dev", "images/bad.png", b"png");
    client.insert("dev", "images/good.png", b"png");
    client.fail_head("images/bad.png");

    let state: TransferState = TransferState::open(state_path(&dir)).await;
    let mut orchestrator = CopyOrchestrator::new(&client, state);
    let stats: TransferStatistics = orchestrator.copy_prefix(&request()).await.unwrap();

    assert_eq!(stats.files_failed(), 1);
    assert_eq!(stats.errors[0].key, "images/bad.png");
    assert_eq!(stats.files_transferred, 1);
    assert_eq!(
        orchestrator
            .state()
            .get(&TransferKey::for_copy("dev", "prod", "images/bad.png")),
        None
    );
    assert!(client.object("prod", "images/good.png").is_some());
}

#[tokio::test]
async fn test_listing_failure_aborts() {
    let dir: TempDir = TempDir::new().unwrap();
    let client: TestStorageClient = TestStorageClient::new();
    client.fail_list("dev");

    let state: TransferState = TransferState::open(state_path(&dir)).await;
    let result = CopyOrchestrator::new(&client, state)
        .copy_prefix(&request())
        .await;

    assert!(matches!(result, Err(StorageError::NetworkError { .. })));
    assert_eq!(client.heads(), 0);
}

#[tokio::test]
async fn test_prefix_gets_trailing_separator() {
    let dir: TempDir = TempDir::new().unwrap();
    let client: TestStorageClient = TestStorageClient::new();
    client.insert("dev", "images/x.png", b"png");
    client.insert("dev", "images-archive/old.png", b"png");

    let state: TransferState = TransferState::open(state_path(&dir)).await;
    let stats: TransferStatistics = CopyOrchestrator::new(&client, state)
        .copy_prefix(&request())
        .await
        .unwrap();

    assert_eq!(
        client.calls()[0],
        Call::List {
            bucket: "dev".to_string(),
            prefix: "images/".to_string(),
        }
    );
    assert_eq!(stats.files_processed, 1);
    assert!(client.object("prod", "images-archive/old.png").is_none());
}

#[tokio::test]
async fn test_copy_failure_records_nothing_and_continues() {
    let dir: TempDir = TempDir::new().unwrap();
    let client: TestStorageClient = TestStorageClient::new();
    client.insert("dev", "images/a.png", b"a");
    client.insert("dev", "images/b.png", b"b");
    client.fail_copy("images/a.png");

    let state: TransferState = TransferState::open(state_path(&dir)).await;
    let mut orchestrator = CopyOrchestrator::new(&client, state);
    let stats: TransferStatistics = orchestrator.copy_prefix(&request()).await.unwrap();

    assert_eq!(stats.files_failed(), 1);
    assert_eq!(stats.errors[0].key, "images/a.png");
    assert_eq!(stats.files_transferred, 1);
    assert!(client.object("prod", "images/b.png").is_some());

    let failed: TransferKey = TransferKey::for_copy("dev", "prod", "images/a.png");
    let copied: TransferKey = TransferKey::for_copy("dev", "prod", "images/b.png");
    assert_eq!(orchestrator.state().get(&failed), None);

    let reloaded: TransferState = TransferState::open(state_path(&dir)).await;
    assert_eq!(reloaded.get(&failed), None);
    assert_eq!(reloaded.get(&copied), Some(&Marker::Confirmed));
}
