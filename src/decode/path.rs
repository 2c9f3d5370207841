//! Dotted-path lookups into JSON values

use serde_json::Value;

/// Look up a dotted path (`$.a.b` or `a.b`) and return the raw value
pub fn extract_jsonpath_value<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    if path.is_empty() || path == "$" {
        return Some(value);
    }

    let mut current = value;
    for part in path.split('.') {
        match current {
            Value::Object(map) => {
                current = map.get(part)?;
            }
            _ => return None,
        }
    }

    Some(current)
}

/// Look up a dotted path and render scalars as a string
pub fn extract_jsonpath(value: &Value, path: &str) -> Option<String> {
    match extract_jsonpath_value(value, path)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
