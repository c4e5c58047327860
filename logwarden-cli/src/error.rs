//! CLI-specific error types and exit code mapping

use logwarden_core::error::LogwardenError;
use logwarden_validator::ValidatorError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// Validation ran and at least one phase failed.
    #[error("{0}")]
    ValidationFailed(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from logwarden-core.
    #[error("{0}")]
    Core(#[from] LogwardenError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                              |
    /// |------|--------------------------------------|
    /// | 0    | Success                              |
    /// | 1    | General / command error              |
    /// | 2    | Configuration error                  |
    /// | 3    | Log validation failed                |
    /// | 10   | IO error                             |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Core(LogwardenError::Config(_)) => 2,
            Self::ValidationFailed(_) => 3,
            Self::Io(_) | Self::Core(LogwardenError::Io(_)) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Core(_) => 1,
        }
    }
}

impl From<ValidatorError> for CliError {
    fn from(e: ValidatorError) -> Self {
        match e {
            ValidatorError::ValidationFailed { .. } => Self::ValidationFailed(e.to_string()),
            ValidatorError::Config(inner) => Self::Core(inner),
            ValidatorError::Collector { .. } => Self::Command(e.to_string()),
        }
    }
}
