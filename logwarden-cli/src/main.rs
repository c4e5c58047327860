use clap::Parser;
use colored::Colorize;

use logwarden_cli::cli::Cli;
use logwarden_cli::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.log_level.as_deref(), cli.log_format) {
        eprintln!("{} {e:#}", "error:".red().bold());
        std::process::exit(1);
    }

    tracing::debug!(command = ?cli.command, root = %cli.root.display(), "logwarden starting");

    if let Err(e) = logwarden_cli::run(cli).await {
        tracing::debug!(error = %e, exit_code = e.exit_code(), "command failed");
        eprintln!("{} {e}", "error:".red().bold());
        std::process::exit(e.exit_code());
    }
}
