//! Scoping contexts passed from parent streams to child streams
//!
//! A parent record yields a small key/value map (for Eventbrite,
//! `{"organization_id": "222"}`) that fills the child stream's path
//! placeholders. Contexts also key completed partitions in state.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Key/value scope for one run of a child stream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context(BTreeMap<String, Value>);

impl Context {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Iterate over entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Whether the context holds no values
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert to a JSON object
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = serde_json::to_string(&self.0).map_err(|_| std::fmt::Error)?;
        f.write_str(&json)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_context_builder() {
        let ctx = Context::new().with("organization_id", "222");
        assert_eq!(ctx.get("organization_id"), Some(&json!("222")));
        assert!(ctx.get("missing").is_none());
        assert!(!ctx.is_empty());
        assert!(Context::new().is_empty());
    }

    #[test]
    fn test_context_serde_is_transparent() {
        let ctx = Context::new().with("organization_id", "111");
        assert_eq!(ctx.to_json(), json!({"organization_id": "111"}));

        let parsed: Context = serde_json::from_value(json!({"organization_id": "111"})).unwrap();
        assert_eq!(parsed, ctx);
    }

    #[test]
    fn test_context_display() {
        let ctx: Context = [("organization_id", "1"), ("a", "2")].into_iter().collect();
        assert_eq!(ctx.to_string(), r#"{"a":"2","organization_id":"1"}"#);
    }
}
