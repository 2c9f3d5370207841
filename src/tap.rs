//! The tap: configuration, stream list and top-level operations
//!
//! Ties the streams to the engine. `sync` runs streams in declared order;
//! a parent stream is synced to completion before its children run once per
//! collected context.

use crate::config::{Catalog, TapConfig};
use crate::context::Context;
use crate::engine::{StreamSelection, SyncConfig, SyncEngine, SyncStats};
use crate::error::Result;
use crate::http::HttpClientConfig;
use crate::output::{MessageWriter, SingerMessage};
use crate::state::StateManager;
use crate::streams::{self, base, RestStream};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Instant;
use tracing::info;

/// Capabilities advertised by `--about`
pub const CAPABILITIES: &[&str] = &["about", "catalog", "discover", "state"];

// ============================================================================
// About
// ============================================================================

/// Tap description printed by `--about`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutInfo {
    /// Tap name
    pub name: String,
    /// Crate version
    pub version: String,
    /// One-line description
    pub description: String,
    /// Supported capabilities
    pub capabilities: Vec<String>,
    /// JSON schema of the accepted settings
    pub settings: Value,
}

impl AboutInfo {
    /// Render as Markdown
    pub fn to_markdown(&self) -> String {
        let mut out = format!(
            "# {}\n\n{}\n\nVersion: {}\n\n",
            self.name, self.description, self.version
        );

        out.push_str("## Capabilities\n\n");
        for capability in &self.capabilities {
            out.push_str(&format!("* `{capability}`\n"));
        }

        out.push_str("\n## Settings\n\n| Setting | Required | Default | Description |\n");
        out.push_str("|:--------|:--------:|:-------:|:------------|\n");

        let required: Vec<&str> = self.settings["required"]
            .as_array()
            .map(|r| r.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        if let Some(props) = self.settings["properties"].as_object() {
            for (name, prop) in props {
                let default = prop.get("default").map(Value::to_string).unwrap_or_default();
                let description = prop["description"].as_str().unwrap_or_default();
                let is_required = if required.contains(&name.as_str()) {
                    "True"
                } else {
                    "False"
                };
                out.push_str(&format!(
                    "| {name} | {is_required} | {default} | {description} |\n"
                ));
            }
        }

        out
    }
}

// ============================================================================
// Check Result
// ============================================================================

/// Result of a connection check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Whether the check succeeded
    pub success: bool,

    /// Error message if failed
    pub message: Option<String>,
}

impl CheckResult {
    /// Create a successful check result
    pub fn success() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// Create a failed check result
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

// ============================================================================
// Tap
// ============================================================================

/// Singer tap for Eventbrite
pub struct Tap {
    config: TapConfig,
    http: HttpClientConfig,
    streams: Vec<Box<dyn RestStream>>,
}

impl Tap {
    /// Create a tap from validated configuration
    pub fn new(config: TapConfig) -> Self {
        let http = base::http_config(&config);
        Self {
            config,
            http,
            streams: streams::all_streams(),
        }
    }

    /// Override the HTTP client settings (retries, rate limits)
    #[must_use]
    pub fn with_http_config(mut self, http: HttpClientConfig) -> Self {
        self.http = http;
        self
    }

    /// Tap configuration
    pub fn config(&self) -> &TapConfig {
        &self.config
    }

    /// Streams in sync order
    pub fn discover_streams(&self) -> &[Box<dyn RestStream>] {
        &self.streams
    }

    /// Catalog with every stream selected
    pub fn catalog(&self) -> Catalog {
        Catalog {
            streams: self
                .discover_streams()
                .iter()
                .map(|s| s.catalog_entry())
                .collect(),
        }
    }

    /// Name, version, capabilities and settings schema
    pub fn about() -> AboutInfo {
        AboutInfo {
            name: crate::NAME.to_string(),
            version: crate::VERSION.to_string(),
            description: "Singer tap for Eventbrite, extracting organizations and their events"
                .to_string(),
            capabilities: CAPABILITIES.iter().map(ToString::to_string).collect(),
            settings: TapConfig::settings_spec().to_json_schema(),
        }
    }

    /// Fetch the first page of the first top-level stream
    pub async fn check(&self) -> CheckResult {
        match self.try_check().await {
            Ok(()) => CheckResult::success(),
            Err(e) => CheckResult::failure(e.to_string()),
        }
    }

    async fn try_check(&self) -> Result<()> {
        let Some(stream) = self
            .discover_streams()
            .iter()
            .find(|s| s.parent_stream().is_none())
        else {
            return Ok(());
        };

        let client = base::build_client(&self.config, self.http.clone())?;
        let mut engine = SyncEngine::new(client, StateManager::in_memory())
            .with_config(SyncConfig::new().with_max_pages(1));
        let mut sink = crate::output::MemoryWriter::new();
        engine
            .sync_stream(stream.as_ref(), None, &StreamSelection::silent(), &mut sink)
            .await?;
        Ok(())
    }

    /// Sync selected streams, writing SCHEMA, RECORD and STATE messages.
    ///
    /// Without a catalog every stream is selected. An unselected parent of a
    /// selected child is still fetched for its contexts but writes nothing.
    pub async fn sync(
        &self,
        catalog: Option<&Catalog>,
        state: StateManager,
        writer: &mut dyn MessageWriter,
    ) -> Result<SyncStats> {
        let start = Instant::now();
        let client = base::build_client(&self.config, self.http.clone())?;
        let mut engine = SyncEngine::new(client, state);
        let mut contexts: HashMap<&str, Vec<Context>> = HashMap::new();

        for stream in self.discover_streams() {
            let name = stream.name();
            if !self.is_needed(name, catalog) {
                info!("Skipping stream {name}: not selected");
                continue;
            }

            let emit = is_selected(name, catalog);
            let collect_children = self
                .children_of(name)
                .any(|child| self.is_needed(child.name(), catalog));
            let deselected = catalog
                .and_then(|c| c.get(name))
                .map(|entry| entry.deselected_properties())
                .unwrap_or_default();
            let selection = StreamSelection {
                emit,
                collect_children,
                deselected,
            };

            if emit {
                writer
                    .write(&SingerMessage::schema(
                        name,
                        stream.schema().to_json(),
                        stream.primary_keys(),
                    ))
                    .await?;
            }

            let mut produced = Vec::new();
            match stream.parent_stream() {
                None => {
                    let outcome = engine
                        .sync_stream(stream.as_ref(), None, &selection, writer)
                        .await?;
                    produced.extend(outcome.child_contexts);
                    if emit {
                        engine.state().touch_stream(name).await;
                        let snapshot = engine.state().snapshot().await;
                        writer.write(&SingerMessage::state(snapshot)).await?;
                    }
                }
                Some(parent) => {
                    let parent_contexts = contexts.get(parent).cloned().unwrap_or_default();
                    info!(
                        "Syncing {name} for {} {parent} contexts",
                        parent_contexts.len()
                    );
                    for ctx in &parent_contexts {
                        let outcome = engine
                            .sync_stream(stream.as_ref(), Some(ctx), &selection, writer)
                            .await?;
                        produced.extend(outcome.child_contexts);
                        engine.finish_partition();
                        if emit {
                            engine.state().mark_partition_completed(name, ctx).await;
                            let snapshot = engine.state().snapshot().await;
                            writer.write(&SingerMessage::state(snapshot)).await?;
                        }
                    }
                }
            }

            if collect_children {
                contexts.insert(name, produced);
            }
            engine.finish_stream();
        }

        let mut stats = engine.stats().clone();
        #[allow(clippy::cast_possible_truncation)]
        stats.set_duration(start.elapsed().as_millis() as u64);
        info!(
            "Sync finished: {} records, {} pages, {} streams in {}ms",
            stats.records_synced, stats.pages_fetched, stats.streams_synced, stats.duration_ms
        );
        Ok(stats)
    }

    fn children_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Box<dyn RestStream>> {
        self.streams
            .iter()
            .filter(move |s| s.parent_stream() == Some(name))
    }

    /// Selected itself, or an ancestor of a selected stream
    fn is_needed(&self, name: &str, catalog: Option<&Catalog>) -> bool {
        is_selected(name, catalog)
            || self
                .children_of(name)
                .any(|child| self.is_needed(child.name(), catalog))
    }
}

fn is_selected(name: &str, catalog: Option<&Catalog>) -> bool {
    match catalog {
        None => true,
        Some(catalog) => catalog.get(name).is_some_and(|entry| entry.is_selected()),
    }
}

impl std::fmt::Debug for Tap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tap")
            .field("config", &self.config)
            .field(
                "streams",
                &self.streams.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Catalog;
    use crate::output::MemoryWriter;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tap_for(server: &MockServer) -> Tap {
        let config = TapConfig::new("secret").with_base_url(server.uri());
        let http = HttpClientConfig::builder()
            .base_url(server.uri())
            .max_retries(0)
            .no_rate_limit()
            .build();
        Tap::new(config).with_http_config(http)
    }

    async fn mount_one_org_with_events(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/v3/users/me/organizations/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "organizations": [{"id": "1", "name": "Acme"}],
                "pagination": {"has_more_items": false}
            })))
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v3/organizations/1/events/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "events": [{"id": "e1", "organization_id": "1"}],
                "pagination": {"has_more_items": false}
            })))
            .mount(server)
            .await;
    }

    fn catalog_selecting(tap: &Tap, selected: &[&str]) -> Catalog {
        let mut catalog = tap.catalog();
        for entry in &mut catalog.streams {
            let keep = selected.contains(&entry.tap_stream_id.as_str());
            for md in &mut entry.metadata {
                if md.breadcrumb.is_empty() {
                    md.metadata.selected = Some(keep);
                }
            }
        }
        catalog
    }

    #[test]
    fn test_about() {
        let about = Tap::about();
        assert_eq!(about.name, "tap-eventbrite");
        assert_eq!(about.version, crate::VERSION);
        assert_eq!(about.settings["required"], json!(["token"]));
        assert_eq!(
            about.settings["properties"]["base_url"]["default"],
            json!("https://api.eventbrite.com")
        );

        let md = about.to_markdown();
        assert!(md.starts_with("# tap-eventbrite"));
        assert!(md.contains("| token | True |"));
        assert!(md.contains("* `discover`"));
    }

    #[test]
    fn test_catalog_lists_streams_in_order() {
        let tap = Tap::new(TapConfig::new("t"));
        let catalog = tap.catalog();
        let ids: Vec<_> = catalog.streams.iter().map(|s| s.tap_stream_id.as_str()).collect();
        assert_eq!(ids, vec!["organizations", "events"]);
        assert!(!format!("{tap:?}").contains("\"t\""));
    }

    #[tokio::test]
    async fn test_sync_all_streams() {
        let server = MockServer::start().await;
        mount_one_org_with_events(&server).await;

        let tap = tap_for(&server);
        let mut writer = MemoryWriter::new();
        let stats = tap
            .sync(None, StateManager::in_memory(), &mut writer)
            .await
            .unwrap();

        assert_eq!(writer.schema_streams(), vec!["organizations", "events"]);
        assert_eq!(writer.records("organizations").len(), 1);
        assert_eq!(writer.records("events").len(), 1);
        assert_eq!(stats.records_synced, 2);
        assert_eq!(stats.partitions_synced, 1);

        let state = serde_json::to_value(writer.last_state().unwrap()).unwrap();
        assert_eq!(
            state,
            json!({"bookmarks": {
                "events": {"partitions": [{"context": {"organization_id": "1"}}]},
                "organizations": {}
            }})
        );
    }

    #[tokio::test]
    async fn test_unselected_parent_is_fetched_silently() {
        let server = MockServer::start().await;
        mount_one_org_with_events(&server).await;

        let tap = tap_for(&server);
        let catalog = catalog_selecting(&tap, &["events"]);
        let mut writer = MemoryWriter::new();
        tap.sync(Some(&catalog), StateManager::in_memory(), &mut writer)
            .await
            .unwrap();

        assert_eq!(writer.schema_streams(), vec!["events"]);
        assert!(writer.records("organizations").is_empty());
        assert_eq!(writer.records("events").len(), 1);
    }

    #[tokio::test]
    async fn test_unselected_child_is_skipped() {
        let server = MockServer::start().await;
        mount_one_org_with_events(&server).await;

        let tap = tap_for(&server);
        let catalog = catalog_selecting(&tap, &["organizations"]);
        let mut writer = MemoryWriter::new();
        tap.sync(Some(&catalog), StateManager::in_memory(), &mut writer)
            .await
            .unwrap();

        assert_eq!(writer.schema_streams(), vec!["organizations"]);
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
    }

    #[tokio::test]
    async fn test_check_success_and_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/users/me/organizations/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "organizations": [],
                "pagination": {"has_more_items": true, "continuation": "X"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = tap_for(&server).check().await;
        assert!(result.success);

        let failing = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&failing)
            .await;

        let result = tap_for(&failing).check().await;
        assert!(!result.success);
        assert!(result.message.unwrap().contains("401"));
    }
}
