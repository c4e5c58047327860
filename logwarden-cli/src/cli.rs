//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// logwarden -- validate console output captured during a test run.
///
/// Use `logwarden <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "logwarden", version, about, long_about = None)]
pub struct Cli {
    /// Explicit configuration file (.json or .toml). Skips discovery when set.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Project root used for configuration discovery.
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Diagnostic log format written to stderr.
    #[arg(long, global = true, default_value = "pretty")]
    pub log_format: LogFormat,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table / text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Supported tracing formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// JSON lines.
    Json,
    /// Human-readable output.
    Pretty,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate captured log messages against the configuration.
    Check(CheckArgs),
    /// Configuration inspection.
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Text file with one captured message per line (repeatable).
    #[arg(long = "logs", value_name = "FILE")]
    pub logs: Vec<PathBuf>,

    /// JSON array of test results with captured console entries (repeatable).
    #[arg(long = "results", value_name = "FILE")]
    pub results: Vec<PathBuf>,

    /// Stop at the first failing validation phase.
    #[arg(long)]
    pub fail_fast: bool,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Load the configuration and report every schema violation.
    Validate,
    /// Print the effective merged configuration.
    Show,
}
