//! Conform fetched records to a declared schema

use super::types::{JsonSchema, JsonType, SchemaProperty};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A record after conforming, plus the paths of properties that were dropped
#[derive(Debug, Clone, PartialEq)]
pub struct ConformedRecord {
    /// The conformed record
    pub record: Value,
    /// Dotted paths of undeclared properties removed from the record
    pub removed: Vec<String>,
}

/// Drop undeclared properties and coerce numeric flags into booleans.
///
/// Arrays of objects are walked element by element; their removed paths
/// use `name[]` for the array segment. Values of any other shape pass
/// through untouched.
pub fn conform_record(record: &Value, schema: &JsonSchema) -> ConformedRecord {
    let mut removed = Vec::new();
    let record = match record {
        Value::Object(map) => Value::Object(conform_object(map, &schema.properties, "", &mut removed)),
        other => other.clone(),
    };
    ConformedRecord { record, removed }
}

fn conform_object(
    map: &Map<String, Value>,
    properties: &BTreeMap<String, SchemaProperty>,
    prefix: &str,
    removed: &mut Vec<String>,
) -> Map<String, Value> {
    let mut out = Map::with_capacity(map.len());
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        match properties.get(key) {
            Some(property) => {
                out.insert(key.clone(), conform_value(value, property, &path, removed));
            }
            None => {
                if !removed.contains(&path) {
                    removed.push(path);
                }
            }
        }
    }
    out
}

fn conform_value(
    value: &Value,
    property: &SchemaProperty,
    path: &str,
    removed: &mut Vec<String>,
) -> Value {
    match (property.primary_type(), value) {
        (Some(JsonType::Boolean), Value::Number(n)) => {
            Value::Bool(n.as_f64().is_some_and(|f| f != 0.0))
        }
        (Some(JsonType::Object), Value::Object(map)) => match &property.properties {
            Some(nested) => Value::Object(conform_object(map, nested, path, removed)),
            None => value.clone(),
        },
        (Some(JsonType::Array), Value::Array(items)) => match &property.items {
            Some(item_schema) => {
                let item_path = format!("{path}[]");
                Value::Array(
                    items
                        .iter()
                        .map(|item| conform_value(item, item_schema, &item_path, removed))
                        .collect(),
                )
            }
            None => value.clone(),
        },
        _ => value.clone(),
    }
}
