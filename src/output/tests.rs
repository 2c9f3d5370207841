//! Tests for output module

use super::*;
use crate::context::Context;
use crate::state::State;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_schema_message_shape() {
    let msg = SingerMessage::schema(
        "organizations",
        json!({"type": "object", "properties": {}}),
        &["id"],
    );

    assert_eq!(
        serde_json::to_value(&msg).unwrap(),
        json!({
            "type": "SCHEMA",
            "stream": "organizations",
            "schema": {"type": "object", "properties": {}},
            "key_properties": ["id"],
            "bookmark_properties": []
        })
    );
    assert!(msg.is_schema());
    assert_eq!(msg.stream(), Some("organizations"));
}

#[test]
fn test_record_message_shape() {
    let msg = SingerMessage::record("events", json!({"id": "1"}));
    let value = serde_json::to_value(&msg).unwrap();

    assert_eq!(value["type"], "RECORD");
    assert_eq!(value["stream"], "events");
    assert_eq!(value["record"], json!({"id": "1"}));
    let extracted = value["time_extracted"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(extracted).is_ok());
}

#[test]
fn test_state_message_shape() {
    let mut state = State::new();
    state
        .get_stream_mut("events")
        .get_partition_mut(&Context::new().with("organization_id", "1"));

    let line = SingerMessage::state(state).to_line().unwrap();
    assert_eq!(
        line,
        r#"{"type":"STATE","value":{"bookmarks":{"events":{"partitions":[{"context":{"organization_id":"1"}}]}}}}"#
    );
    assert!(!line.contains('\n'));
}

#[test]
fn test_message_parses_back() {
    let line = r#"{"type":"RECORD","stream":"events","record":{"id":"9"},"time_extracted":"2024-05-01T10:00:00Z"}"#;
    let msg: SingerMessage = serde_json::from_str(line).unwrap();
    assert!(matches!(msg, SingerMessage::Record { .. }));
    assert_eq!(msg.stream(), Some("events"));
}

#[tokio::test]
async fn test_memory_writer_helpers() {
    let mut writer = MemoryWriter::new();
    writer
        .write(&SingerMessage::schema("events", json!({}), &["id"]))
        .await
        .unwrap();
    writer
        .write(&SingerMessage::record("events", json!({"id": "1"})))
        .await
        .unwrap();
    writer
        .write(&SingerMessage::record("organizations", json!({"id": "2"})))
        .await
        .unwrap();
    writer
        .write(&SingerMessage::state(State::new()))
        .await
        .unwrap();

    assert_eq!(writer.schema_streams(), vec!["events"]);
    assert_eq!(writer.records("events"), vec![&json!({"id": "1"})]);
    assert_eq!(writer.last_state(), Some(&State::new()));
    assert!(matches!(writer.messages[3], SingerMessage::State { .. }));
}

#[tokio::test]
async fn test_stdout_writer_writes() {
    let mut writer = StdoutWriter::new();
    writer
        .write(&SingerMessage::state(State::new()))
        .await
        .unwrap();
}
