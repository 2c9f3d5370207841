//! Common types used throughout tap-eventbrite
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON object type
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// Query parameters for a single request, ordered for stable URLs
pub type UrlParams = BTreeMap<String, String>;

// ============================================================================
// Replication Method
// ============================================================================

/// How a stream is replicated, as advertised in catalog metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReplicationMethod {
    /// Every sync re-reads the full stream
    #[default]
    FullTable,
}

// ============================================================================
// Inclusion
// ============================================================================

/// Catalog inclusion of a stream or property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Inclusion {
    /// May be selected or deselected
    #[default]
    Available,
    /// Always emitted (primary keys)
    Automatic,
    /// Never emitted
    Unsupported,
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait turning empty strings into `None`
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replication_method_serde() {
        let json = serde_json::to_string(&ReplicationMethod::FullTable).unwrap();
        assert_eq!(json, "\"FULL_TABLE\"");

        let method: ReplicationMethod = serde_json::from_str("\"FULL_TABLE\"").unwrap();
        assert_eq!(method, ReplicationMethod::FullTable);
    }

    #[test]
    fn test_inclusion_serde() {
        let json = serde_json::to_string(&Inclusion::Automatic).unwrap();
        assert_eq!(json, "\"automatic\"");
        assert_eq!(Inclusion::default(), Inclusion::Available);
    }

    #[test]
    fn test_option_string_none_if_empty() {
        assert_eq!("test".to_string().none_if_empty(), Some("test".to_string()));
        assert_eq!(String::new().none_if_empty(), None);
    }
}
