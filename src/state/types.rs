//! State types for tracking sync progress
//!
//! These types serialize to the Singer state layout:
//!
//! ```json
//! {"bookmarks": {"events": {"partitions": [{"context": {"organization_id": "1"}}]}}}
//! ```

use crate::context::Context;
use crate::types::JsonObject;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete state for the tap
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// Per-stream bookmarks
    #[serde(default)]
    pub bookmarks: BTreeMap<String, StreamState>,

    /// Top-level keys written by other tools
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl State {
    /// Create a new empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get mutable state for a stream, creating if needed
    pub fn get_stream_mut(&mut self, stream: &str) -> &mut StreamState {
        self.bookmarks.entry(stream.to_string()).or_default()
    }
}

/// State for a single stream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamState {
    /// Per-context state (for child streams)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub partitions: Vec<PartitionState>,

    /// Other bookmark keys (replication values and the like)
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl StreamState {
    /// Get mutable partition state, creating if needed
    pub fn get_partition_mut(&mut self, context: &Context) -> &mut PartitionState {
        let index = match self.partitions.iter().position(|p| &p.context == context) {
            Some(index) => index,
            None => {
                self.partitions.push(PartitionState::new(context.clone()));
                self.partitions.len() - 1
            }
        };
        &mut self.partitions[index]
    }
}

/// State for one context of a child stream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartitionState {
    /// Context the partition was synced with
    pub context: Context,

    /// Other bookmark keys
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl PartitionState {
    /// Create partition state for a context
    pub fn new(context: Context) -> Self {
        Self {
            context,
            extra: JsonObject::new(),
        }
    }
}
