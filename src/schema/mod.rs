//! Stream schema module
//!
//! Declares the JSON schemas streams advertise in SCHEMA messages and the
//! catalog, and conforms fetched records to them before they are written.
//!
//! # Features
//!
//! - **Nullable Builders**: every declared property accepts `null`
//! - **Nested Objects and Arrays**: declared recursively
//! - **Record Conforming**: undeclared properties are dropped, numeric flags
//!   become booleans

mod conform;
mod types;

pub use conform::{conform_record, ConformedRecord};
pub use types::{JsonSchema, JsonType, JsonTypeOrArray, SchemaProperty};
