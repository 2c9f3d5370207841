//! CLI module
//!
//! Singer-style command-line interface.
//!
//! # Modes
//!
//! - `--about` - Print name, version, capabilities and settings
//! - `--discover` - Print the catalog
//! - `--test` - Test the connection
//! - no mode flag - Sync the selected streams

mod commands;
mod runner;

pub use commands::{AboutFormat, Cli, Command};
pub use runner::Runner;

use tracing_subscriber::EnvFilter;

/// Log filter from `RUST_LOG` directives, INFO when unset or invalid
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
