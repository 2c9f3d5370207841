//! Output module
//!
//! Singer protocol messages and the writers that emit them.
//!
//! # Overview
//!
//! Every message is one compact JSON document per line on stdout:
//!
//! ```text
//! {"type":"SCHEMA","stream":"events","schema":{...},"key_properties":["id"],"bookmark_properties":[]}
//! {"type":"RECORD","stream":"events","record":{...},"time_extracted":"2024-01-01T00:00:00Z"}
//! {"type":"STATE","value":{"bookmarks":{...}}}
//! ```

mod message;
mod writer;

pub use message::SingerMessage;
pub use writer::{MemoryWriter, MessageWriter, StdoutWriter};

#[cfg(test)]
mod tests;
