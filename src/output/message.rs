//! Singer message types

use crate::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One Singer protocol message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SingerMessage {
    /// Declares a stream's schema; precedes its records
    Schema {
        stream: String,
        schema: Value,
        key_properties: Vec<String>,
        #[serde(default)]
        bookmark_properties: Vec<String>,
    },
    /// One extracted record
    Record {
        stream: String,
        record: Value,
        time_extracted: DateTime<Utc>,
    },
    /// Checkpoint of the tap's bookmarks
    State { value: State },
}

impl SingerMessage {
    /// Create a schema message
    pub fn schema(stream: impl Into<String>, schema: Value, key_properties: &[&str]) -> Self {
        Self::Schema {
            stream: stream.into(),
            schema,
            key_properties: key_properties.iter().map(ToString::to_string).collect(),
            bookmark_properties: Vec::new(),
        }
    }

    /// Create a record message stamped with the current time
    pub fn record(stream: impl Into<String>, record: Value) -> Self {
        Self::Record {
            stream: stream.into(),
            record,
            time_extracted: Utc::now(),
        }
    }

    /// Create a state message
    pub fn state(value: State) -> Self {
        Self::State { value }
    }

    /// Stream the message belongs to (None for STATE)
    pub fn stream(&self) -> Option<&str> {
        match self {
            Self::Schema { stream, .. } | Self::Record { stream, .. } => Some(stream),
            Self::State { .. } => None,
        }
    }

    /// Check if this is a schema message
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }

    /// Serialize as one compact JSON line (no trailing newline)
    pub fn to_line(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
