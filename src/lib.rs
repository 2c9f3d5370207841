//! # tap-eventbrite
//!
//! A Singer tap that extracts Eventbrite organizations and their events.
//!
//! ## Features
//!
//! - **Singer protocol**: SCHEMA, RECORD and STATE messages on stdout
//! - **Discovery**: catalog with stream and property selection
//! - **Parent/child streams**: events are fetched once per organization
//! - **Continuation pagination**: driven by `pagination.has_more_items`
//! - **Resilient HTTP**: bearer auth, retries with backoff, rate limiting
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tap_eventbrite::{config::TapConfig, output::StdoutWriter, state::StateManager, tap::Tap};
//!
//! #[tokio::main]
//! async fn main() -> tap_eventbrite::Result<()> {
//!     let tap = Tap::new(TapConfig::new("my-token"));
//!     let mut writer = StdoutWriter::new();
//!     tap.sync(None, StateManager::in_memory(), &mut writer).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            Tap                                  │
//! │  about() → AboutInfo   check() → CheckResult   catalog()        │
//! │  sync(catalog, state, writer) → SyncStats                       │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │   Auth   │   HTTP    │   Paginate    │  Streams  │   Output    │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ Bearer   │ GET       │ has_more_items│ Orgs      │ SCHEMA      │
//! │          │ Retry     │ continuation  │ Events    │ RECORD      │
//! │          │ Rate Limit│               │ Context   │ STATE       │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the tap
pub mod error;

/// Common types and type aliases
pub mod types;

/// Tap configuration and catalog
pub mod config;

/// Authentication
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Record extraction from response bodies
pub mod decode;

/// Pagination strategies
pub mod pagination;

/// Stream schemas and record conformance
pub mod schema;

/// Parent-to-child stream context
pub mod context;

/// Path template rendering
pub mod template;

/// Stream definitions
pub mod streams;

/// State management and checkpointing
pub mod state;

/// Singer message output
pub mod output;

/// Stream execution engine
pub mod engine;

/// Tap entry points: about, discover, check, sync
pub mod tap;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
