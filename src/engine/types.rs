//! Engine types
//!
//! Configuration, per-stream selection and results for the sync engine.

use crate::context::Context;
use std::collections::HashSet;

/// Configuration for sync operation
#[derive(Debug, Clone, Default)]
pub struct SyncConfig {
    /// Maximum pages per stream run (0 = unlimited)
    pub max_pages: usize,
}

impl SyncConfig {
    /// Create a new sync config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set max pages
    #[must_use]
    pub fn with_max_pages(mut self, max: usize) -> Self {
        self.max_pages = max;
        self
    }
}

/// What a stream run writes
#[derive(Debug, Clone)]
pub struct StreamSelection {
    /// Whether RECORD messages are written at all
    pub emit: bool,
    /// Whether child contexts are collected from the records
    pub collect_children: bool,
    /// Top-level properties removed before writing
    pub deselected: HashSet<String>,
}

impl Default for StreamSelection {
    fn default() -> Self {
        Self {
            emit: true,
            collect_children: false,
            deselected: HashSet::new(),
        }
    }
}

impl StreamSelection {
    /// Fetch without writing records (parents of selected children, checks)
    pub fn silent() -> Self {
        Self {
            emit: false,
            ..Self::default()
        }
    }
}

/// Result of one stream run (one context)
#[derive(Debug, Clone, Default)]
pub struct StreamOutcome {
    /// Records fetched
    pub records: usize,
    /// Pages fetched
    pub pages: usize,
    /// Contexts for child streams, one per record, in record order
    pub child_contexts: Vec<Context>,
}

/// Statistics from a sync operation
#[derive(Debug, Clone, Default)]
pub struct SyncStats {
    /// Total records synced
    pub records_synced: usize,
    /// Total pages fetched
    pub pages_fetched: usize,
    /// Total streams synced
    pub streams_synced: usize,
    /// Total partitions (child contexts) synced
    pub partitions_synced: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl SyncStats {
    /// Add records
    pub fn add_records(&mut self, count: usize) {
        self.records_synced += count;
    }

    /// Add a page
    pub fn add_page(&mut self) {
        self.pages_fetched += 1;
    }

    /// Add a stream
    pub fn add_stream(&mut self) {
        self.streams_synced += 1;
    }

    /// Add a partition
    pub fn add_partition(&mut self) {
        self.partitions_synced += 1;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}
