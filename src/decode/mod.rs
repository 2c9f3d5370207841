//! Response decoder module
//!
//! # Overview
//!
//! Each stream's response body is a JSON envelope; the decoder pulls the
//! record array out of it with a JSONPath expression such as
//! `$.organizations[*]`. The path helpers are shared with the paginator,
//! which reads `pagination.*` from the same envelope.

mod decoders;
mod path;

pub use decoders::{JsonDecoder, RecordDecoder};
pub use path::{extract_jsonpath, extract_jsonpath_value};
