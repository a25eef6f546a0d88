//! Command-line interface wiring for motion-prep.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod clean;
pub mod download;
pub mod preprocess;
pub mod read;
pub mod run;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Motion title training data pipeline", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Download => download::run(settings).await,
            Commands::Read => read::run(settings).await,
            Commands::Preprocess => preprocess::run(settings).await,
            Commands::Run(args) => run::run(args, settings).await,
            Commands::Clean(args) => clean::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Download motion archives listed in the dataset catalogue.
    Download,
    /// Parse every downloaded archive into the raw motion store.
    Read,
    /// Clean and filter the raw store into the training table.
    Preprocess,
    /// Download, parse when needed, and preprocess.
    Run(run::Args),
    /// Clean a single motion text the way training texts are cleaned.
    Clean(clean::Args),
}
