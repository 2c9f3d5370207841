//! Tap configuration and Singer catalog types
//!
//! This module contains the runtime configuration accepted by the tap,
//! its settings schema (for `--about`), and the catalog structures used by
//! `--discover` and `--catalog`.

use crate::error::{Error, Result};
use crate::types::{Inclusion, JsonObject, OptionStringExt, ReplicationMethod};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Production API host
pub const DEFAULT_BASE_URL: &str = "https://api.eventbrite.com";

/// Prefix for settings read from the environment
pub const ENV_PREFIX: &str = "TAP_EVENTBRITE_";

// ============================================================================
// Tap Config
// ============================================================================

/// Validated tap configuration
#[derive(Clone, PartialEq, Eq)]
pub struct TapConfig {
    /// API token, sent as a bearer token
    pub token: String,

    /// API root
    pub base_url: String,

    /// Earliest datetime to get data from. Accepted but not applied to
    /// any request.
    pub start_date: Option<DateTime<Utc>>,

    /// Overrides the default `tap-eventbrite/<version>` user agent
    pub user_agent: Option<String>,
}

impl std::fmt::Debug for TapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TapConfig")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("start_date", &self.start_date)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl TapConfig {
    /// Create a config with the given token and default settings
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            start_date: None,
            user_agent: None,
        }
    }

    /// Override the API root
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Validate a raw JSON config object
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| Error::config("Config must be a JSON object"))?;

        let token = match map.get("token") {
            None | Some(Value::Null) => return Err(Error::missing_field("token")),
            Some(Value::String(s)) => s
                .clone()
                .none_if_empty()
                .ok_or_else(|| Error::missing_field("token"))?,
            Some(_) => return Err(Error::invalid_value("token", "expected a string")),
        };

        let base_url = match map.get("base_url") {
            None | Some(Value::Null) => DEFAULT_BASE_URL.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(_) => return Err(Error::invalid_value("base_url", "expected a string")),
        };

        let start_date = match map.get("start_date") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(parse_start_date(s)?),
            Some(_) => {
                return Err(Error::invalid_value(
                    "start_date",
                    "expected a date-time string",
                ))
            }
        };

        let user_agent = match map.get("user_agent") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => s.clone().none_if_empty(),
            Some(_) => return Err(Error::invalid_value("user_agent", "expected a string")),
        };

        Ok(Self {
            token,
            base_url,
            start_date,
            user_agent,
        })
    }

    /// Load and merge config sources left to right, then validate
    pub fn load(sources: &[ConfigSource]) -> Result<Self> {
        let mut merged = JsonObject::new();
        for source in sources {
            let value = source.read()?;
            match value {
                Value::Object(map) => merged.extend(map),
                Value::Null => {}
                _ => {
                    return Err(Error::config(format!(
                        "Config source {source} is not an object"
                    )))
                }
            }
        }
        Self::from_value(&Value::Object(merged))
    }

    /// Settings accepted by the tap
    pub fn settings_spec() -> SpecConfig {
        let mut properties = BTreeMap::new();
        properties.insert(
            "token".to_string(),
            PropertyConfig::string()
                .with_description("API Token for Eventbrite")
                .secret()
                .required(),
        );
        properties.insert(
            "base_url".to_string(),
            PropertyConfig::string().with_default(Value::String(DEFAULT_BASE_URL.to_string())),
        );
        properties.insert(
            "start_date".to_string(),
            PropertyConfig::string()
                .with_format("date-time")
                .with_description("Earliest datetime to get data from"),
        );
        properties.insert(
            "user_agent".to_string(),
            PropertyConfig::string().with_description("User agent to present to the API"),
        );
        SpecConfig { properties }
    }
}

/// Parse `start_date` as RFC 3339, falling back to a plain date at midnight UTC
fn parse_start_date(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| Error::invalid_value("start_date", format!("'{raw}' is not a date-time")))
}

// ============================================================================
// Config Sources
// ============================================================================

/// Where a piece of configuration comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// JSON or YAML file (by extension)
    File(PathBuf),
    /// `TAP_EVENTBRITE_*` environment variables
    Env,
}

impl ConfigSource {
    /// Parse a `--config` argument; the literal `ENV` selects the environment
    pub fn parse(arg: &str) -> Self {
        if arg == "ENV" {
            Self::Env
        } else {
            Self::File(PathBuf::from(arg))
        }
    }

    /// Read this source into a JSON value
    pub fn read(&self) -> Result<Value> {
        match self {
            Self::File(path) => read_config_file(path),
            Self::Env => Ok(Value::Object(read_env(std::env::vars()))),
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Env => write!(f, "ENV"),
        }
    }
}

fn read_config_file(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read config file {}: {e}",
            path.display()
        ))
    })?;
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
    if is_yaml {
        Ok(serde_yaml::from_str(&content)?)
    } else {
        serde_json::from_str(&content)
            .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))
    }
}

/// Collect known settings from `TAP_EVENTBRITE_*` variables
fn read_env(vars: impl Iterator<Item = (String, String)>) -> JsonObject {
    let known: HashSet<String> = TapConfig::settings_spec().properties.into_keys().collect();
    let mut map = JsonObject::new();
    for (key, value) in vars {
        let Some(name) = key.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        let name = name.to_ascii_lowercase();
        if known.contains(&name) {
            if let Some(value) = value.none_if_empty() {
                map.insert(name, Value::String(value));
            }
        }
    }
    map
}

// ============================================================================
// Settings Spec
// ============================================================================

/// Settings schema advertised by `--about`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecConfig {
    /// Configuration properties
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyConfig>,
}

impl SpecConfig {
    /// Render as a JSON schema document
    pub fn to_json_schema(&self) -> Value {
        let mut properties = JsonObject::new();
        let mut required = Vec::new();
        for (name, prop) in &self.properties {
            if prop.required {
                required.push(Value::String(name.clone()));
            }
            properties.insert(name.clone(), prop.to_json_schema());
        }
        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// Configuration property definition. Every setting is a string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyConfig {
    /// Property description
    #[serde(default)]
    pub description: Option<String>,

    /// Whether this is a secret (should be masked)
    #[serde(default)]
    pub secret: bool,

    /// Whether this property is required
    #[serde(default)]
    pub required: bool,

    /// Default value
    #[serde(default)]
    pub default: Option<Value>,

    /// Format hint (e.g., "date-time")
    #[serde(default)]
    pub format: Option<String>,
}

impl PropertyConfig {
    /// A string property
    pub fn string() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    #[must_use]
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    #[must_use]
    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn to_json_schema(&self) -> Value {
        let mut schema = JsonObject::new();
        let type_value = Value::String("string".to_string());
        if self.required {
            schema.insert("type".to_string(), type_value);
        } else {
            schema.insert(
                "type".to_string(),
                Value::Array(vec![type_value, Value::String("null".to_string())]),
            );
        }
        if let Some(description) = &self.description {
            schema.insert("description".to_string(), Value::String(description.clone()));
        }
        if let Some(format) = &self.format {
            schema.insert("format".to_string(), Value::String(format.clone()));
        }
        if let Some(default) = &self.default {
            schema.insert("default".to_string(), default.clone());
        }
        if self.secret {
            schema.insert("secret".to_string(), Value::Bool(true));
            schema.insert("writeOnly".to_string(), Value::Bool(true));
        }
        Value::Object(schema)
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Singer catalog: the discoverable streams and their selection metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Catalog entries
    #[serde(default)]
    pub streams: Vec<CatalogEntry>,
}

impl Catalog {
    /// Load a catalog from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read catalog file {}: {e}",
                path.display()
            ))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Find the entry for a stream
    pub fn get(&self, stream: &str) -> Option<&CatalogEntry> {
        self.streams.iter().find(|s| s.tap_stream_id == stream)
    }
}

/// Single stream in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Stream identifier
    pub tap_stream_id: String,

    /// Stream name
    pub stream: String,

    /// JSON schema of the stream's records
    #[serde(default)]
    pub schema: Value,

    /// Primary key properties
    #[serde(default)]
    pub key_properties: Vec<String>,

    /// Breadcrumb metadata
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,
}

impl CatalogEntry {
    /// Build a catalog entry with default (all selected) metadata
    pub fn new(
        name: &str,
        schema: Value,
        key_properties: &[&str],
        parent: Option<&str>,
    ) -> Self {
        let key_properties: Vec<String> = key_properties.iter().map(ToString::to_string).collect();

        let mut metadata = vec![MetadataEntry {
            breadcrumb: Vec::new(),
            metadata: Metadata {
                inclusion: Some(Inclusion::Available),
                selected: Some(true),
                selected_by_default: Some(true),
                table_key_properties: Some(key_properties.clone()),
                forced_replication_method: Some(ReplicationMethod::FullTable),
                parent_tap_stream_id: parent.map(ToString::to_string),
                ..Metadata::default()
            },
        }];

        if let Some(props) = schema.get("properties").and_then(Value::as_object) {
            for name in props.keys() {
                let inclusion = if key_properties.contains(name) {
                    Inclusion::Automatic
                } else {
                    Inclusion::Available
                };
                metadata.push(MetadataEntry {
                    breadcrumb: vec!["properties".to_string(), name.clone()],
                    metadata: Metadata {
                        inclusion: Some(inclusion),
                        selected_by_default: Some(true),
                        ..Metadata::default()
                    },
                });
            }
        }

        Self {
            tap_stream_id: name.to_string(),
            stream: name.to_string(),
            schema,
            key_properties,
            metadata,
        }
    }

    /// Metadata for the empty breadcrumb
    pub fn root_metadata(&self) -> Option<&Metadata> {
        self.metadata
            .iter()
            .find(|m| m.breadcrumb.is_empty())
            .map(|m| &m.metadata)
    }

    /// Whether the stream is selected for sync
    pub fn is_selected(&self) -> bool {
        self.root_metadata().is_some_and(Metadata::is_selected)
    }

    /// Top-level properties the catalog leaves unselected.
    ///
    /// A property without `selected` or `selected-by-default` follows the
    /// stream's own selection.
    pub fn deselected_properties(&self) -> HashSet<String> {
        let stream_selected = self.is_selected();
        self.metadata
            .iter()
            .filter_map(|m| match m.breadcrumb.as_slice() {
                [kind, name] if kind == "properties" => Some((name, &m.metadata)),
                _ => None,
            })
            .filter(|(_, md)| !md.resolve_selected(stream_selected))
            .map(|(name, _)| name.clone())
            .collect()
    }
}

/// One metadata entry, addressed by breadcrumb
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    /// Path into the schema (empty for the stream itself)
    #[serde(default)]
    pub breadcrumb: Vec<String>,

    /// Metadata values
    #[serde(default)]
    pub metadata: Metadata,
}

/// Known Singer metadata keys; unknown keys are preserved
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inclusion: Option<Inclusion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,

    #[serde(
        rename = "selected-by-default",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub selected_by_default: Option<bool>,

    #[serde(
        rename = "table-key-properties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub table_key_properties: Option<Vec<String>>,

    #[serde(
        rename = "forced-replication-method",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub forced_replication_method: Option<ReplicationMethod>,

    #[serde(
        rename = "parent-tap-stream-id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_tap_stream_id: Option<String>,

    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Metadata {
    /// Selection of a stream's root metadata
    pub fn is_selected(&self) -> bool {
        self.resolve_selected(false)
    }

    /// Selection given the selection of the enclosing breadcrumb.
    ///
    /// `unsupported` is never selected and `automatic` always is; otherwise
    /// `selected`, then `selected-by-default`, then the parent decide.
    pub fn resolve_selected(&self, parent: bool) -> bool {
        match self.inclusion {
            Some(Inclusion::Unsupported) => false,
            Some(Inclusion::Automatic) => true,
            _ => self.selected.or(self.selected_by_default).unwrap_or(parent),
        }
    }
}
