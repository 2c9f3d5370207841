//! Decoder implementations

use super::path::extract_jsonpath_value;
use crate::error::{Error, Result};
use serde_json::Value;

/// Trait for decoding response bodies into records
pub trait RecordDecoder: Send + Sync {
    /// Extract records from an already parsed response body
    fn records(&self, body: &Value) -> Result<Vec<Value>>;
}

/// JSON decoder extracting records at a path
#[derive(Debug, Clone)]
pub struct JsonDecoder {
    record_path: String,
}

impl JsonDecoder {
    /// Create a JSON decoder with a record path
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            record_path: path.into(),
        }
    }
}

impl RecordDecoder for JsonDecoder {
    fn records(&self, value: &Value) -> Result<Vec<Value>> {
        let path = self.record_path.as_str();

        // `$.a.b[*]` is resolved directly; anything fancier goes through jsonpath-rust
        match simple_array_path(path) {
            Some(prefix) => match extract_jsonpath_value(value, prefix) {
                None | Some(Value::Null) => Ok(Vec::new()),
                Some(Value::Array(arr)) => Ok(arr.clone()),
                Some(_) => Err(Error::record_extraction(path, "expected an array")),
            },
            None => extract_with_jsonpath(value, path),
        }
    }
}

/// Returns the dotted prefix of a `prefix[*]` path with no other selectors
fn simple_array_path(path: &str) -> Option<&str> {
    let prefix = path.strip_suffix("[*]")?;
    let is_plain = prefix
        .strip_prefix("$.")
        .unwrap_or(prefix)
        .split('.')
        .all(|part| !part.is_empty() && part.chars().all(|c| c.is_alphanumeric() || c == '_'));
    is_plain.then_some(prefix)
}

fn extract_with_jsonpath(value: &Value, path: &str) -> Result<Vec<Value>> {
    use jsonpath_rust::JsonPath;

    let jp = JsonPath::try_from(path)
        .map_err(|e| Error::json_path(format!("Invalid JSONPath '{path}': {e}")))?;

    match jp.find(value) {
        Value::Array(arr) => Ok(arr),
        Value::Null => Ok(vec![]),
        other => Ok(vec![other]),
    }
}
