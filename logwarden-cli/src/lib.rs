//! logwarden CLI library
//!
//! Argument parsing, command handlers and output rendering live here so the
//! binary stays a thin entry point and handlers can be exercised from tests.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;

use cli::{Cli, Commands};
use commands::ConfigSource;
use error::CliError;
use output::OutputWriter;

/// Dispatch a parsed command line to its handler.
pub async fn run(cli: Cli) -> Result<(), CliError> {
    let source = ConfigSource::new(cli.config, cli.root);
    let writer = OutputWriter::new(cli.output);

    match cli.command {
        Commands::Check(args) => commands::check::execute(args, &source, &writer).await,
        Commands::Config(args) => commands::config::execute(args, &source, &writer).await,
    }
}
