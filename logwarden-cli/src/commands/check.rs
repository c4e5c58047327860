//! `logwarden check` command handler

use std::io::{self, Write};

use serde::Serialize;
use tracing::info;

use logwarden_core::config::ValidatorConfig;
use logwarden_validator::{
    LogCollector, PhasePolicy, RecordingSink, ReportEvent, ValidationOutcome, Validator,
};

use super::ConfigSource;
use crate::cli::{CheckArgs, OutputFormat};
use crate::error::CliError;
use crate::output::{ConsoleSink, OutputWriter, Render};

/// Execute the `check` command.
pub async fn execute(
    args: CheckArgs,
    source: &ConfigSource,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let collector = collect(&args).await?;
    let config = source.load().await?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    evaluate(
        &config,
        collector.messages(),
        policy(&args),
        &source.describe(),
        writer,
        &mut handle,
    )
}

/// Phase policy selected by `--fail-fast`.
pub fn policy(args: &CheckArgs) -> PhasePolicy {
    if args.fail_fast {
        PhasePolicy::StopAtFirstFailure
    } else {
        PhasePolicy::Aggregate
    }
}

/// Read every `--logs` and `--results` source in the order given.
pub async fn collect(args: &CheckArgs) -> Result<LogCollector, CliError> {
    let mut collector = LogCollector::new();

    for path in &args.logs {
        let added = collector.load_lines(path).await?;
        info!(path = %path.display(), added, "loaded log file");
    }
    for path in &args.results {
        let results = collector.load_results(path).await?;
        info!(path = %path.display(), results, "loaded test results");
    }

    Ok(collector)
}

/// Run the engine and write diagnostics plus the summary to `out`.
///
/// Returns `CliError::ValidationFailed` when any phase fails.
pub fn evaluate(
    config: &ValidatorConfig,
    messages: &[String],
    policy: PhasePolicy,
    source: &str,
    writer: &OutputWriter,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let validator = Validator::new().with_phase_policy(policy);

    let (outcome, diagnostics) = match writer.format() {
        OutputFormat::Text => {
            let mut sink = ConsoleSink::new(&mut *out);
            let outcome = validator.run(config, messages, &mut sink);
            sink.finish()?;
            (outcome, Vec::new())
        }
        OutputFormat::Json => {
            let mut sink = RecordingSink::new();
            let outcome = validator.run(config, messages, &mut sink);
            (outcome, sink.into_events())
        }
    };

    let report = CheckReport {
        source: source.to_owned(),
        messages: messages.len(),
        rules: config.log_validations.len(),
        outcome,
        diagnostics,
    };
    writer.render_to(&report, out)?;

    report.outcome.verdict.into_result()?;
    Ok(())
}

/// Result of a `check` run.
#[derive(Serialize)]
pub struct CheckReport {
    /// Configuration source description
    pub source: String,
    /// Number of collected messages
    pub messages: usize,
    /// Number of declared rules
    pub rules: usize,
    /// Engine outcome (verdict, counts, failing rules)
    pub outcome: ValidationOutcome,
    /// Recorded diagnostics (JSON output only)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<ReportEvent>,
}

impl Render for CheckReport {
    fn render_text(&self, w: &mut dyn Write) -> io::Result<()> {
        use colored::Colorize;

        let verdict = &self.outcome.verdict;
        if verdict.is_success() {
            writeln!(
                w,
                "{} {} messages checked against {} rules",
                "✓".green().bold(),
                self.messages,
                self.rules
            )?;
        } else {
            let reasons: Vec<String> = verdict.reasons().iter().map(ToString::to_string).collect();
            writeln!(
                w,
                "{} log validation failed: {}",
                "✗".red().bold(),
                reasons.join(", ")
            )?;
        }
        writeln!(w, "Configuration: {}", self.source.dimmed())?;

        Ok(())
    }
}
