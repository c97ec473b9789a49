//! Top-level CLI definition and command dispatch

use crate::cli::commands;
use crate::cli::error::CliResult;
use clap::{Parser, Subcommand};

/// Browser-accessible file manager
#[derive(Debug, Parser)]
#[command(name = "filedeck", version, about)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Serve the file manager over HTTP
    Serve(commands::serve::ServeArgs),
}

impl Cli {
    pub async fn execute(self) -> CliResult<()> {
        filedeck::init_logging();

        match self.command {
            Commands::Serve(args) => commands::serve::execute_serve(args).await,
        }
    }
}
