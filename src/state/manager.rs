//! State manager implementation
//!
//! Holds the run's state behind a lock so the engine and the tap can share
//! it; snapshots become STATE messages.

use super::types::State;
use crate::context::Context;
use crate::error::{Error, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// State manager for loading and updating state
#[derive(Debug, Clone, Default)]
pub struct StateManager {
    /// Current state
    state: Arc<RwLock<State>>,
}

impl StateManager {
    /// Create a state manager seeded with a state
    pub fn new(state: State) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Create an empty in-memory state manager
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Create a state manager from a state file.
    ///
    /// A missing file starts from empty state; an unreadable or malformed
    /// one is an error.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::in_memory());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::state(format!("Failed to read state file {}: {e}", path.display()))
        })?;
        Self::from_json(&contents)
    }

    /// Create a state manager from inline JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::in_memory());
        }
        let state: State = serde_json::from_str(json)
            .map_err(|e| Error::state(format!("Failed to parse state JSON: {e}")))?;
        Ok(Self::new(state))
    }

    /// Clone of the current state
    pub async fn snapshot(&self) -> State {
        self.state.read().await.clone()
    }

    /// Make sure a stream has a bookmark entry
    pub async fn touch_stream(&self, stream: &str) {
        let mut state = self.state.write().await;
        state.get_stream_mut(stream);
    }

    /// Record a completed context of a child stream
    pub async fn mark_partition_completed(&self, stream: &str, context: &Context) {
        let mut state = self.state.write().await;
        state.get_stream_mut(stream).get_partition_mut(context);
    }
}
