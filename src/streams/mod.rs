//! Stream definitions
//!
//! # Overview
//!
//! A stream is one extractable entity type: its endpoint, record path,
//! schema, primary keys and, for child streams, the parent whose records
//! scope its requests. [`RestStream`] carries the shared REST behaviour as
//! default methods; the concrete streams only declare what differs.
//!
//! | Stream          | Path                                          | Parent          |
//! |-----------------|-----------------------------------------------|-----------------|
//! | `organizations` | `/v3/users/me/organizations/`                 |                 |
//! | `events`        | `/v3/organizations/{organization_id}/events/` | `organizations` |

pub mod base;
mod events;
mod organizations;

pub use events::Events;
pub use organizations::Organizations;

use crate::config::CatalogEntry;
use crate::context::Context;
use crate::decode::JsonDecoder;
use crate::error::Result;
use crate::pagination::{HasMoreItemsPaginator, Paginator};
use crate::schema::JsonSchema;
use crate::template;
use crate::types::UrlParams;
use serde_json::Value;

/// Shared behaviour of every Eventbrite REST stream
pub trait RestStream: Send + Sync {
    /// Stream name (also the tap_stream_id)
    fn name(&self) -> &'static str;

    /// Endpoint path, possibly with `{placeholders}` filled from the context
    fn path(&self) -> &'static str;

    /// JSONPath selecting the records in a response body
    fn records_path(&self) -> &'static str;

    /// Primary key properties
    fn primary_keys(&self) -> &'static [&'static str];

    /// Declared record schema
    fn schema(&self) -> &JsonSchema;

    /// Name of the stream whose records scope this one
    fn parent_stream(&self) -> Option<&'static str> {
        None
    }

    /// Query parameters for one request
    fn url_params(&self, _context: Option<&Context>, token: Option<&str>) -> UrlParams {
        base::base_url_params(token)
    }

    /// Scoping context handed to child streams for one record
    fn child_context(&self, _record: &Value, _context: Option<&Context>) -> Result<Option<Context>> {
        Ok(None)
    }

    /// Fresh paginator for one sequence of requests
    fn paginator(&self) -> Box<dyn Paginator> {
        Box::new(HasMoreItemsPaginator::default())
    }

    /// Decoder extracting records from a response body
    fn decoder(&self) -> JsonDecoder {
        JsonDecoder::with_path(self.records_path())
    }

    /// Endpoint path rendered for a context
    fn request_path(&self, context: Option<&Context>) -> Result<String> {
        template::render_path(self.path(), context)
    }

    /// Catalog entry with default selection metadata
    fn catalog_entry(&self) -> CatalogEntry {
        CatalogEntry::new(
            self.name(),
            self.schema().to_json(),
            self.primary_keys(),
            self.parent_stream(),
        )
    }
}

/// All streams in sync order: parents before children
pub fn all_streams() -> Vec<Box<dyn RestStream>> {
    vec![Box::new(Organizations), Box::new(Events)]
}
