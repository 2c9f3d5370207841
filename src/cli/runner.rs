//! CLI runner - executes commands

use crate::cli::commands::{AboutFormat, Cli, Command};
use crate::config::{Catalog, ConfigSource, TapConfig};
use crate::error::{Error, Result};
use crate::output::StdoutWriter;
use crate::state::StateManager;
use crate::tap::Tap;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match self.cli.command() {
            Command::About => self.about(),
            Command::Discover => self.discover(),
            Command::Test => self.test().await,
            Command::Sync => self.sync().await,
        }
    }

    /// Load and validate configuration from every `--config` source
    fn load_config(&self) -> Result<TapConfig> {
        let sources: Vec<ConfigSource> = self
            .cli
            .config
            .iter()
            .map(|arg| ConfigSource::parse(arg))
            .collect();
        TapConfig::load(&sources)
    }

    /// Load state
    fn load_state(&self) -> Result<StateManager> {
        match &self.cli.state {
            Some(path) => StateManager::from_file(path),
            None => Ok(StateManager::in_memory()),
        }
    }

    /// Print tap information
    fn about(&self) -> Result<()> {
        let about = Tap::about();
        match self.cli.format {
            AboutFormat::Json => println!("{}", serde_json::to_string_pretty(&about)?),
            AboutFormat::Markdown => print!("{}", about.to_markdown()),
        }
        Ok(())
    }

    /// Print the catalog
    fn discover(&self) -> Result<()> {
        let tap = Tap::new(self.load_config()?);
        println!("{}", serde_json::to_string_pretty(&tap.catalog())?);
        Ok(())
    }

    /// Check connection
    async fn test(&self) -> Result<()> {
        let tap = Tap::new(self.load_config()?);
        let result = tap.check().await;
        if result.success {
            info!("Connection test succeeded");
            Ok(())
        } else {
            Err(Error::Other(format!(
                "Connection test failed: {}",
                result.message.unwrap_or_default()
            )))
        }
    }

    /// Sync selected streams to stdout
    async fn sync(&self) -> Result<()> {
        let tap = Tap::new(self.load_config()?);
        let catalog = self
            .cli
            .catalog
            .as_ref()
            .map(Catalog::from_file)
            .transpose()?;
        let state = self.load_state()?;

        let mut writer = StdoutWriter::new();
        tap.sync(catalog.as_ref(), state, &mut writer).await?;
        Ok(())
    }
}
