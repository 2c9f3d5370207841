//! CLI commands and argument parsing

use clap::Parser;
use std::path::PathBuf;

/// Singer tap for Eventbrite
#[derive(Parser, Debug)]
#[command(name = "tap-eventbrite")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print tap information and exit
    #[arg(long)]
    pub about: bool,

    /// Format for --about
    #[arg(long, value_enum, default_value = "json")]
    pub format: AboutFormat,

    /// Configuration file (JSON or YAML), or ENV for TAP_EVENTBRITE_* variables.
    /// May be repeated; later sources override earlier ones.
    #[arg(long = "config", value_name = "FILE|ENV")]
    pub config: Vec<String>,

    /// Print the catalog and exit
    #[arg(long, conflicts_with_all = ["about", "test"])]
    pub discover: bool,

    /// Catalog file selecting streams and properties
    #[arg(long, alias = "properties", value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// State file from a previous run
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,

    /// Test the connection and exit
    #[arg(long, conflicts_with = "about")]
    pub test: bool,
}

/// What the invocation asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Print tap information
    About,
    /// Print the catalog
    Discover,
    /// Test the connection
    Test,
    /// Sync streams
    Sync,
}

impl Cli {
    /// Resolve the mode flags into a single command
    pub fn command(&self) -> Command {
        if self.about {
            Command::About
        } else if self.discover {
            Command::Discover
        } else if self.test {
            Command::Test
        } else {
            Command::Sync
        }
    }
}

/// Output format for --about
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum AboutFormat {
    /// JSON document
    Json,
    /// Markdown (README-style)
    Markdown,
}
