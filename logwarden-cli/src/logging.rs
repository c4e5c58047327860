//! Logging initialization for the logwarden CLI.
//!
//! Configures `tracing-subscriber` from the global `--log-level` and
//! `--log-format` flags. Diagnostics go to stderr so stdout carries only
//! command output.

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::LogFormat;

/// Default filter when neither `--log-level` nor `RUST_LOG` is set.
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Initialize the global tracing subscriber.
///
/// Must be called exactly once, before any tracing macros are used.
/// An explicit `log_level` wins over `RUST_LOG`.
pub fn init_tracing(log_level: Option<&str>, format: LogFormat) -> Result<()> {
    let env_filter = match log_level {
        Some(level) => EnvFilter::try_new(level)
            .map_err(|e| anyhow::anyhow!("invalid log level '{}': {}", level, e))?,
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
    };

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .map_err(|e| {
                    anyhow::anyhow!("failed to initialize JSON tracing subscriber: {}", e)
                })?;
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .map_err(|e| {
                    anyhow::anyhow!("failed to initialize pretty tracing subscriber: {}", e)
                })?;
        }
    }

    Ok(())
}
