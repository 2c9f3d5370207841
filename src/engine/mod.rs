//! Execution engine module
//!
//! Main read loop for one stream.
//!
//! # Overview
//!
//! The engine module provides:
//! - `SyncEngine` - fetches pages, conforms records and writes them
//! - `SyncConfig` - record and page limits
//! - `StreamSelection` - whether records are written and which properties
//!   are dropped
//!
//! For each page the engine renders the request path from the context,
//! asks the stream for its query parameters, decodes the records, conforms
//! them to the schema, collects child contexts and lets the paginator
//! decide whether to continue.

mod types;

pub use types::{StreamOutcome, StreamSelection, SyncConfig, SyncStats};

use crate::context::Context;
use crate::decode::RecordDecoder;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::output::{MessageWriter, SingerMessage};
use crate::pagination::{NextPage, PaginationState};
use crate::schema::conform_record;
use crate::state::StateManager;
use crate::streams::RestStream;
use serde_json::Value;
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Sync engine for orchestrating data extraction
pub struct SyncEngine {
    /// HTTP client
    client: HttpClient,
    /// State manager
    state: StateManager,
    /// Sync configuration
    config: SyncConfig,
    /// Statistics
    stats: SyncStats,
    /// Streams already warned about undeclared properties
    warned: HashSet<String>,
}

impl SyncEngine {
    /// Create a new sync engine
    pub fn new(client: HttpClient, state: StateManager) -> Self {
        Self {
            client,
            state,
            config: SyncConfig::default(),
            stats: SyncStats::default(),
            warned: HashSet::new(),
        }
    }

    /// Set sync configuration
    #[must_use]
    pub fn with_config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the state manager
    pub fn state(&self) -> &StateManager {
        &self.state
    }

    /// Get statistics
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Sync one stream for one context (None for top-level streams)
    pub async fn sync_stream(
        &mut self,
        stream: &dyn RestStream,
        context: Option<&Context>,
        selection: &StreamSelection,
        writer: &mut dyn MessageWriter,
    ) -> Result<StreamOutcome> {
        let start = Instant::now();
        let name = stream.name();
        let path = stream.request_path(context)?;
        let paginator = stream.paginator();
        let decoder = stream.decoder();

        match context {
            Some(ctx) => info!("Syncing stream {name} with context {ctx}"),
            None => info!("Syncing stream {name}"),
        }

        let mut outcome = StreamOutcome::default();
        let mut pagination_state = PaginationState::new();
        let mut token: Option<String> = None;

        loop {
            let params = stream.url_params(context, token.as_deref());
            let body = self
                .client
                .get_json_with_config(&path, RequestConfig::with_query(params))
                .await?;

            outcome.pages += 1;
            self.stats.add_page();

            let records = decoder.records(&body)?;
            let record_count = records.len();
            debug!("{name}: page {} returned {record_count} records", outcome.pages);

            for raw in &records {
                if selection.collect_children {
                    if let Some(child) = stream.child_context(raw, context)? {
                        outcome.child_contexts.push(child);
                    }
                }

                if selection.emit {
                    let record = self.prepare_record(stream, raw, &selection.deselected);
                    writer.write(&SingerMessage::record(name, record)).await?;
                }

                outcome.records += 1;
                self.stats.add_records(1);
            }

            if self.config.max_pages > 0 && outcome.pages >= self.config.max_pages {
                debug!("{name}: reached max pages ({})", self.config.max_pages);
                break;
            }

            match paginator.advance(name, &body, record_count, &mut pagination_state)? {
                NextPage::Continue { token: next } => token = Some(next),
                NextPage::Done => break,
            }
        }

        #[allow(clippy::cast_possible_truncation)]
        self.stats.set_duration(start.elapsed().as_millis() as u64);

        info!(
            "Completed {name}: {} records in {} pages",
            outcome.records, outcome.pages
        );

        Ok(outcome)
    }

    /// Conform a raw record and drop deselected properties
    fn prepare_record(
        &mut self,
        stream: &dyn RestStream,
        raw: &Value,
        deselected: &HashSet<String>,
    ) -> Value {
        let conformed = conform_record(raw, stream.schema());

        if !conformed.removed.is_empty() && self.warned.insert(stream.name().to_string()) {
            warn!(
                "Properties not declared in the {} schema were removed: {}",
                stream.name(),
                conformed.removed.join(", ")
            );
        }

        let mut record = conformed.record;
        if let Value::Object(map) = &mut record {
            map.retain(|key, _| !deselected.contains(key));
        }
        record
    }

    /// Count a finished stream
    pub fn finish_stream(&mut self) {
        self.stats.add_stream();
    }

    /// Count a finished child context
    pub fn finish_partition(&mut self) {
        self.stats.add_partition();
    }
}
