//! Pagination strategy implementations

use super::types::Paginator;
use crate::decode::{extract_jsonpath, extract_jsonpath_value};
use serde_json::Value;

// ============================================================================
// Has-More-Items Pagination
// ============================================================================

/// Continuation-token pagination keyed off a boolean flag (Eventbrite)
///
/// Reads `pagination.has_more_items` and `pagination.continuation` from the
/// response body. Anything but a literal `true` flag means no more pages.
#[derive(Debug, Clone)]
pub struct HasMoreItemsPaginator {
    /// Path to the boolean "more pages" flag
    pub flag_path: String,
    /// Path to the continuation token
    pub token_path: String,
}

impl HasMoreItemsPaginator {
    /// Create a paginator reading the flag and token from custom paths
    pub fn new(flag_path: impl Into<String>, token_path: impl Into<String>) -> Self {
        Self {
            flag_path: flag_path.into(),
            token_path: token_path.into(),
        }
    }
}

impl Default for HasMoreItemsPaginator {
    fn default() -> Self {
        Self::new("$.pagination.has_more_items", "$.pagination.continuation")
    }
}

impl Paginator for HasMoreItemsPaginator {
    fn has_more(&self, body: &Value) -> bool {
        extract_jsonpath_value(body, &self.flag_path)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    fn next_token(&self, body: &Value) -> Option<String> {
        extract_jsonpath(body, &self.token_path)
    }
}
