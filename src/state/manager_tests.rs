//! Tests for StateManager

use super::*;
use crate::context::Context;
use crate::Error;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

// ============================================================================
// Construction Tests
// ============================================================================

#[tokio::test]
async fn test_state_manager_in_memory() {
    let manager = StateManager::in_memory();
    assert_eq!(manager.snapshot().await, State::new());
}

#[tokio::test]
async fn test_from_file_loads_state() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"bookmarks": {{"events": {{"partitions": [{{"context": {{"organization_id": "7"}}}}]}}}}}}"#
    )
    .unwrap();

    let manager = StateManager::from_file(file.path()).unwrap();
    let state = manager.snapshot().await;
    assert_eq!(
        state.bookmarks["events"].partitions[0].context,
        Context::new().with("organization_id", "7")
    );
}

#[tokio::test]
async fn test_from_file_missing_starts_empty() {
    let dir = tempdir().unwrap();
    let manager = StateManager::from_file(dir.path().join("absent.json")).unwrap();
    assert!(manager.snapshot().await.bookmarks.is_empty());
}

#[test]
fn test_from_file_malformed() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();

    let err = StateManager::from_file(file.path()).unwrap_err();
    assert!(matches!(err, Error::State { .. }));
}

#[tokio::test]
async fn test_from_json_empty_string() {
    let manager = StateManager::from_json("  ").unwrap();
    assert!(manager.snapshot().await.bookmarks.is_empty());
}

// ============================================================================
// Partition Tests
// ============================================================================

#[tokio::test]
async fn test_mark_partition_completed() {
    let manager = StateManager::in_memory();
    let ctx = Context::new().with("organization_id", "111");

    manager.mark_partition_completed("events", &ctx).await;
    manager.mark_partition_completed("events", &ctx).await;

    let state = serde_json::to_value(manager.snapshot().await).unwrap();
    assert_eq!(
        state,
        json!({"bookmarks": {"events": {"partitions": [{"context": {"organization_id": "111"}}]}}})
    );
}

#[tokio::test]
async fn test_clones_share_state() {
    let manager = StateManager::in_memory();
    let clone = manager.clone();

    clone.touch_stream("organizations").await;
    assert!(manager
        .snapshot()
        .await
        .bookmarks
        .contains_key("organizations"));
}
