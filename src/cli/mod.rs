//! Command-line interface wiring for abstract-skimmer.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Settings;

pub mod classify;
pub mod serve;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Biomedical abstract skimming service", long_about = None)]
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
            Commands::Serve(args) => serve::run(args, settings).await,
            Commands::Classify(args) => classify::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the JSON API and static UI.
    Serve(serve::Args),
    /// Classify abstracts from files, raw text, or PubMed ids.
    Classify(classify::Args),
}

/// Output format for offline classification.
#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
    Text,
}
