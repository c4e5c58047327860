//! `logwarden config` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use logwarden_core::config::ValidatorConfig;
use logwarden_core::error::{ConfigError, LogwardenError};

use super::ConfigSource;
use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `config` command.
pub async fn execute(
    args: ConfigArgs,
    source: &ConfigSource,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(source, writer).await,
        ConfigAction::Show => execute_show(source, writer).await,
    }
}

/// Execute the config validate subcommand.
///
/// Reports every schema violation at once.
///
/// # Errors
///
/// Returns `CliError::Config` if the configuration cannot be loaded.
async fn execute_validate(source: &ConfigSource, writer: &OutputWriter) -> Result<(), CliError> {
    info!(source = %source.describe(), "validating configuration");

    let report = validation_report(source.describe(), source.load().await);
    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }

    Ok(())
}

/// Build a validation report from a load result.
pub fn validation_report(
    source: String,
    result: Result<ValidatorConfig, LogwardenError>,
) -> ConfigValidationReport {
    match result {
        Ok(config) => ConfigValidationReport {
            source,
            valid: true,
            rules: config.log_validations.len(),
            errors: Vec::new(),
        },
        Err(LogwardenError::Config(ConfigError::Schema { errors })) => ConfigValidationReport {
            source,
            valid: false,
            rules: 0,
            errors,
        },
        Err(e) => ConfigValidationReport {
            source,
            valid: false,
            rules: 0,
            errors: vec![e.to_string()],
        },
    }
}

/// Execute the config show subcommand.
///
/// Loads and displays the effective configuration (all layers + env overrides).
async fn execute_show(source: &ConfigSource, writer: &OutputWriter) -> Result<(), CliError> {
    info!(source = %source.describe(), "loading configuration");

    let config = source.load().await?;
    writer.render(&ConfigReport::new(source.describe(), config)?)?;

    Ok(())
}

/// Effective configuration report.
#[derive(Serialize)]
pub struct ConfigReport {
    /// Configuration source description
    pub source: String,
    /// Effective configuration
    pub config: ValidatorConfig,
    /// Serialized TOML configuration
    #[serde(skip)]
    pub config_toml: String,
}

impl ConfigReport {
    pub fn new(source: String, config: ValidatorConfig) -> Result<Self, CliError> {
        let config_toml = render_toml(&config)?;
        Ok(Self {
            source,
            config,
            config_toml,
        })
    }
}

/// Serialize a value as pretty TOML.
///
/// # Errors
///
/// Returns `CliError::Command` if the value has no TOML representation.
pub fn render_toml<T: Serialize>(value: &T) -> Result<String, CliError> {
    toml::to_string_pretty(value)
        .map_err(|e| CliError::Command(format!("failed to serialize configuration as TOML: {e}")))
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Configuration (source: {})", self.source.bold())?;
        writeln!(w)?;
        write!(w, "{}", self.config_toml)?;

        Ok(())
    }
}

/// Configuration validation report.
///
/// Contains validation result and any error messages encountered.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    /// Configuration source description
    pub source: String,
    /// Whether the configuration is valid
    pub valid: bool,
    /// Number of declared rules (0 if invalid)
    pub rules: usize,
    /// Validation error messages (empty if valid)
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Configuration: {}", self.source.bold())?;
        if self.valid {
            writeln!(
                w,
                "{} valid ({} log validations)",
                "✓".green().bold(),
                self.rules
            )?;
        } else {
            writeln!(
                w,
                "{} invalid ({} errors)",
                "✗".red().bold(),
                self.errors.len()
            )?;
            for e in &self.errors {
                writeln!(w, "  - {}", e.red())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logwarden_core::types::{ExemptLog, LogValidation};

    #[test]
    fn test_validation_report_lists_every_schema_error() {
        let result = Err(LogwardenError::Config(ConfigError::Schema {
            errors: vec![
                "logValidations[0].max is required".to_owned(),
                "exemptLogs[0].patterns is required".to_owned(),
            ],
        }));
        let report = validation_report("test".to_owned(), result);
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn test_validation_report_valid() {
        let config = ValidatorConfig {
            log_validations: vec![LogValidation::new(["unique"], 2)],
            ..ValidatorConfig::default()
        };
        let report = validation_report("test".to_owned(), Ok(config));
        assert!(report.valid);
        assert_eq!(report.rules, 1);

        colored::control::set_override(false);
        let mut out = Vec::new();
        report.render_text(&mut out).expect("render should succeed");
        assert!(String::from_utf8(out).expect("utf8").contains("1 log validations"));
    }

    #[test]
    fn test_config_report_renders_toml() {
        let config = ValidatorConfig {
            log_validations: vec![LogValidation::new(["unique"], 2)],
            fail_if_log_validations_outdated: true,
            fail_if_unknown_logs_found: false,
            exempt_logs: vec![ExemptLog::new(["Error: Uncaught"])],
        };
        let report = ConfigReport::new("test".to_owned(), config).expect("config is TOML-safe");
        assert!(report.config_toml.contains("failIfLogValidationsOutdated = true"));
        assert!(report.config_toml.contains("[[logValidations]]"));
    }

    #[test]
    fn test_config_report_json_uses_camel_case() {
        let report = ConfigReport::new("test".to_owned(), ValidatorConfig::default())
            .expect("default config is TOML-safe");
        let json = serde_json::to_value(&report).expect("should serialize");
        assert_eq!(json["config"]["failIfUnknownLogsFound"], false);
        assert!(json.get("config_toml").is_none());
    }

    #[test]
    fn test_render_toml_failure_is_command_error() {
        // TOML documents must be tables
        let err = render_toml(&5u32).expect_err("bare integer is not a TOML document");
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("failed to serialize configuration as TOML"));
    }
}
