//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: config → HTTP requests → Singer messages

use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;
use tap_eventbrite::config::{ConfigSource, TapConfig};
use tap_eventbrite::http::HttpClientConfig;
use tap_eventbrite::output::{MemoryWriter, SingerMessage};
use tap_eventbrite::state::StateManager;
use tap_eventbrite::tap::Tap;
use tap_eventbrite::Error;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ORGS_PATH: &str = "/v3/users/me/organizations/";

fn tap_for(server: &MockServer) -> Tap {
    let config = TapConfig::new("test-token").with_base_url(server.uri());
    let http = HttpClientConfig::builder()
        .base_url(server.uri())
        .max_retries(0)
        .no_rate_limit()
        .build();
    Tap::new(config).with_http_config(http)
}

async fn mount_events(server: &MockServer, org: &str, events: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v3/organizations/{org}/events/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "events": events,
            "pagination": {"has_more_items": false}
        })))
        .mount(server)
        .await;
}

// ============================================================================
// Pagination
// ============================================================================

#[tokio::test]
async fn test_organizations_follow_continuation() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ORGS_PATH))
        .and(query_param_is_missing("continuation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organizations": [{"id": "111"}],
            "pagination": {"has_more_items": true, "continuation": "ABC"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(ORGS_PATH))
        .and(query_param("continuation", "ABC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organizations": [{"id": "112"}],
            "pagination": {"has_more_items": false}
        })))
        .expect(1)
        .mount(&server)
        .await;

    mount_events(&server, "111", json!([])).await;
    mount_events(&server, "112", json!([])).await;

    let tap = tap_for(&server);
    let mut writer = MemoryWriter::new();
    let stats = tap
        .sync(None, StateManager::in_memory(), &mut writer)
        .await
        .unwrap();

    let ids: Vec<_> = writer
        .records("organizations")
        .iter()
        .map(|r| r["id"].clone())
        .collect();
    assert_eq!(ids, vec![json!("111"), json!("112")]);
    assert_eq!(stats.pages_fetched, 4);
}

#[tokio::test]
async fn test_single_page_issues_one_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ORGS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organizations": [{"id": "111"}],
            "pagination": {"has_more_items": false}
        })))
        .expect(1)
        .mount(&server)
        .await;

    mount_events(&server, "111", json!([{"id": "e1"}])).await;

    let tap = tap_for(&server);
    let mut writer = MemoryWriter::new();
    tap.sync(None, StateManager::in_memory(), &mut writer)
        .await
        .unwrap();

    let state = serde_json::to_value(writer.last_state().unwrap()).unwrap();
    assert_eq!(
        state["bookmarks"]["events"]["partitions"],
        json!([{"context": {"organization_id": "111"}}])
    );
}

#[tokio::test]
async fn test_missing_pagination_ends_stream() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ORGS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organizations": [{"id": "5"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    mount_events(&server, "5", json!([])).await;

    let tap = tap_for(&server);
    let mut writer = MemoryWriter::new();
    let result = tap.sync(None, StateManager::in_memory(), &mut writer).await;

    assert!(result.is_ok());
    assert_eq!(writer.records("organizations").len(), 1);
}

#[tokio::test]
async fn test_repeated_continuation_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ORGS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organizations": [{"id": "1"}],
            "pagination": {"has_more_items": true, "continuation": "SAME"}
        })))
        .mount(&server)
        .await;

    let tap = tap_for(&server);
    let mut writer = MemoryWriter::new();
    let err = tap
        .sync(None, StateManager::in_memory(), &mut writer)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::PaginationLoop { .. }));
}

// ============================================================================
// Events
// ============================================================================

#[tokio::test]
async fn test_events_request_shape() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ORGS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organizations": [{"id": "222"}],
            "pagination": {"has_more_items": false}
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v3/organizations/222/events/"))
        .and(query_param("expand", "bookmark_info"))
        .and(query_param_is_missing("continuation"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "events": [{"id": "e1", "organization_id": "222"}],
            "pagination": {"has_more_items": true, "continuation": "NEXT"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v3/organizations/222/events/"))
        .and(query_param("expand", "bookmark_info"))
        .and(query_param("continuation", "NEXT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "events": [{"id": "e2", "organization_id": "222"}],
            "pagination": {"has_more_items": false}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tap = tap_for(&server);
    let mut writer = MemoryWriter::new();
    tap.sync(None, StateManager::in_memory(), &mut writer)
        .await
        .unwrap();

    assert_eq!(writer.records("events").len(), 2);
}

#[tokio::test]
async fn test_events_fetched_once_per_organization() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ORGS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organizations": [{"id": "1"}, {"id": "2"}],
            "pagination": {"has_more_items": false}
        })))
        .mount(&server)
        .await;

    mount_events(&server, "1", json!([{"id": "a"}])).await;
    mount_events(&server, "2", json!([{"id": "b"}, {"id": "c"}])).await;

    let tap = tap_for(&server);
    let mut writer = MemoryWriter::new();
    let stats = tap
        .sync(None, StateManager::in_memory(), &mut writer)
        .await
        .unwrap();

    assert_eq!(writer.records("events").len(), 3);
    assert_eq!(stats.partitions_synced, 2);

    let requests = server.received_requests().await.unwrap();
    let event_paths: Vec<_> = requests
        .iter()
        .map(|r| r.url.path().to_string())
        .filter(|p| p.contains("/events/"))
        .collect();
    assert_eq!(
        event_paths,
        vec!["/v3/organizations/1/events/", "/v3/organizations/2/events/"]
    );

    // One STATE after organizations, one per organization partition
    let states = writer
        .messages
        .iter()
        .filter(|m| matches!(m, SingerMessage::State { .. }))
        .count();
    assert_eq!(states, 3);
}

#[tokio::test]
async fn test_message_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ORGS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organizations": [{"id": "1", "name": "Acme"}],
            "pagination": {"has_more_items": false}
        })))
        .mount(&server)
        .await;
    mount_events(&server, "1", json!([{"id": "a"}])).await;

    let tap = tap_for(&server);
    let mut writer = MemoryWriter::new();
    tap.sync(None, StateManager::in_memory(), &mut writer)
        .await
        .unwrap();

    let kinds: Vec<_> = writer
        .messages
        .iter()
        .map(|m| {
            let line: serde_json::Value = serde_json::from_str(&m.to_line().unwrap()).unwrap();
            format!(
                "{}:{}",
                line["type"].as_str().unwrap(),
                line["stream"].as_str().unwrap_or("-")
            )
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "SCHEMA:organizations",
            "RECORD:organizations",
            "STATE:-",
            "SCHEMA:events",
            "RECORD:events",
            "STATE:-",
        ]
    );
}

// ============================================================================
// Errors
// ============================================================================

#[tokio::test]
async fn test_unauthorized_fails_sync() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ORGS_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
        .mount(&server)
        .await;

    let tap = tap_for(&server);
    let mut writer = MemoryWriter::new();
    let err = tap
        .sync(None, StateManager::in_memory(), &mut writer)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 401, .. }));
    assert!(writer.records("organizations").is_empty());
}

#[tokio::test]
async fn test_check_reports_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ORGS_PATH))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let result = tap_for(&server).check().await;
    assert!(!result.success);
    assert!(result.message.unwrap().contains("403"));
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_missing_token_fails_before_any_request() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"start_date": "2024-01-01T00:00:00Z"}}"#).unwrap();

    let err = TapConfig::load(&[ConfigSource::File(file.path().to_path_buf())]).unwrap_err();
    assert!(matches!(err, Error::MissingConfigField { ref field } if field == "token"));
}

#[test]
fn test_config_from_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{"token": "abc", "start_date": "2024-01-01", "base_url": "http://localhost:1"}}"#
    )
    .unwrap();

    let config = TapConfig::load(&[ConfigSource::File(file.path().to_path_buf())]).unwrap();
    assert_eq!(config.token, "abc");
    assert_eq!(config.base_url, "http://localhost:1");
    assert!(config.start_date.is_some());
}

#[test]
fn test_state_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"bookmarks": {{"events": {{"partitions": [{{"context": {{"organization_id": "9"}}}}]}}}}}}"#
    )
    .unwrap();

    let manager = StateManager::from_file(file.path()).unwrap();
    let rt = tokio::runtime::Runtime::new().unwrap();
    let value = serde_json::to_value(rt.block_on(manager.snapshot())).unwrap();
    assert_eq!(
        value["bookmarks"]["events"]["partitions"][0]["context"]["organization_id"],
        json!("9")
    );
}
