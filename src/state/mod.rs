//! State management module
//!
//! Tracks sync progress in the Singer bookmark layout and hands it back as
//! STATE messages. A prior state passed with `--state` is loaded as the
//! starting point; keys this tap does not understand are carried through
//! untouched.
//!
//! # Overview
//!
//! The state module provides:
//! - `State` - Singer `bookmarks` document with per-stream partitions
//! - `StateManager` - shared, lock-protected state for one run

mod manager;
mod types;

pub use manager::StateManager;
pub use types::{PartitionState, State, StreamState};

#[cfg(test)]
mod manager_tests;
