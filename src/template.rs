//! Path templates for scoped endpoints
//!
//! Handles `{variable}` placeholders in stream paths, such as
//! `/v3/organizations/{organization_id}/events/`, filled from a [`Context`].

use crate::context::Context;
use crate::error::{Error, Result};
use regex::{Captures, Regex};
use serde_json::Value;
use std::sync::LazyLock;

/// Regex for matching path placeholders: {variable}
static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-zA-Z_][a-zA-Z0-9_]*)\}").unwrap());

/// Render a path template with values from the context.
///
/// Values are inserted verbatim. Every placeholder must be present in the
/// context; the names of all missing ones are reported together.
pub fn render_path(template: &str, ctx: Option<&Context>) -> Result<String> {
    let mut missing = Vec::new();

    let rendered = PLACEHOLDER_REGEX.replace_all(template, |cap: &Captures<'_>| {
        let name = &cap[1];
        match ctx.and_then(|c| c.get(name)) {
            Some(value) => value_to_string(value),
            None => {
                missing.push(name.to_string());
                String::new()
            }
        }
    });

    if missing.is_empty() {
        Ok(rendered.into_owned())
    } else {
        Err(Error::undefined_var(missing.join(", ")))
    }
}

/// Convert a JSON value to a string for substitution
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        // For complex types, use JSON serialization
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
