//! Organizations stream

use super::RestStream;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::schema::{JsonSchema, SchemaProperty};
use serde_json::Value;
use std::sync::LazyLock;

static SCHEMA: LazyLock<JsonSchema> = LazyLock::new(|| {
    JsonSchema::from_properties([
        (
            "id",
            SchemaProperty::string().with_description("The organization id"),
        ),
        (
            "name",
            SchemaProperty::string().with_description("The organization name"),
        ),
        (
            "vertical",
            SchemaProperty::string().with_description("The organization vertical"),
        ),
        (
            "image_id",
            SchemaProperty::string().with_description("The organization image id"),
        ),
    ])
});

/// Organizations the token's user belongs to
#[derive(Debug, Clone, Copy, Default)]
pub struct Organizations;

impl RestStream for Organizations {
    fn name(&self) -> &'static str {
        "organizations"
    }

    fn path(&self) -> &'static str {
        "/v3/users/me/organizations/"
    }

    fn records_path(&self) -> &'static str {
        "$.organizations[*]"
    }

    fn primary_keys(&self) -> &'static [&'static str] {
        &["id"]
    }

    fn schema(&self) -> &JsonSchema {
        &SCHEMA
    }

    fn child_context(&self, record: &Value, _context: Option<&Context>) -> Result<Option<Context>> {
        let id = match record.get("id") {
            Some(Value::String(id)) if !id.is_empty() => Value::String(id.clone()),
            Some(Value::Number(id)) => Value::String(id.to_string()),
            _ => {
                return Err(Error::record_extraction(
                    "id",
                    format!("organization record has no usable id: {record}"),
                ))
            }
        };
        Ok(Some(Context::new().with("organization_id", id)))
    }
}
