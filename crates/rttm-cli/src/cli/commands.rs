//! CLI command definitions for the RTTM validator
//!
//! Provides Clap-based command definitions for checking RTTM files and
//! listing the supported record kinds.

use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use rttm_core::{RecordKind, RttmError, RttmValidator, ValidationReport, ValidatorConfig};

use super::output::{BatchOutput, OutputFormat};
use super::ExitCode;

/// RTTM validator CLI
///
/// Check Rich Transcription Time-Marked files for syntax errors and temporal
/// inconsistencies before they are scored.
#[derive(Parser, Debug)]
#[command(name = "rttm-validate")]
#[command(about = "RTTM Validator - Check RTTM files for temporal consistency", long_about = None)]
#[command(version)]
pub struct ValidateCli {
    /// Output verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit log events as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: ValidateCommands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum ValidateCommands {
    /// Validate one or more RTTM files
    ///
    /// Runs field syntax checks on every line, then the temporal consistency
    /// checks on each (source, channel, speaker) partition.
    Check {
        /// RTTM files to validate
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Path to a TOML configuration file
        #[arg(short, long, env = "RTTM_VALIDATE_CONFIG")]
        config: Option<PathBuf>,

        /// Output format for validation results
        #[arg(long, value_enum, default_value = "table")]
        format: Option<OutputFormat>,

        /// Only check field syntax
        #[arg(long)]
        syntax_only: bool,

        /// Treat warnings as a failed run
        #[arg(long)]
        strict: bool,

        /// Do not require words to lie inside an SU
        #[arg(long)]
        no_su_coverage: bool,

        /// Do not require words to lie inside a SPEAKER span
        #[arg(long)]
        no_speaker_coverage: bool,

        /// Do not require an IP after each EDIT
        #[arg(long)]
        no_edit_ip: bool,

        /// Do not require an IP before or after each FILLER
        #[arg(long)]
        no_filler_ip: bool,
    },

    /// List record kinds with their merge priority and field rules
    Kinds {
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: Option<OutputFormat>,
    },
}

/// Checks switched off on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisabledChecks {
    pub su_coverage: bool,
    pub speaker_coverage: bool,
    pub edit_ip: bool,
    pub filler_ip: bool,
}

/// Everything `check` needs besides the file list
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    pub config: Option<PathBuf>,
    pub format: OutputFormat,
    pub syntax_only: bool,
    pub strict: bool,
    pub quiet: bool,
    pub disabled: DisabledChecks,
}

/// Resolve configuration: defaults, then file, then environment, then flags
pub fn build_config(
    config_path: Option<&Path>,
    disabled: DisabledChecks,
) -> Result<ValidatorConfig, RttmError> {
    let config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading configuration file");
            ValidatorConfig::from_file(path)?
        }
        None => ValidatorConfig::default(),
    };
    let config = config.with_env_overrides()?;
    Ok(apply_disabled(config, disabled))
}

fn apply_disabled(config: ValidatorConfig, disabled: DisabledChecks) -> ValidatorConfig {
    let mut checks = config.checks;
    checks.su_coverage &= !disabled.su_coverage;
    checks.speaker_coverage &= !disabled.speaker_coverage;
    checks.edit_ip &= !disabled.edit_ip;
    checks.filler_ip &= !disabled.filler_ip;
    config.with_checks(checks)
}

/// Execute the check command
pub fn execute_check(files: &[PathBuf], options: &CheckOptions) -> Result<ExitCode, RttmError> {
    let config = build_config(options.config.as_deref(), options.disabled)?;
    let validator = RttmValidator::new(&config)?.with_syntax_only(options.syntax_only);

    let (reports, mut exit_code) = validate_all(&validator, files, options.strict);

    if !options.quiet {
        BatchOutput::from_reports(&reports).render(options.format)?;
    }

    for report in &reports {
        exit_code = exit_code.worst(ExitCode::from_validation_result(
            report.has_errors(),
            report.has_warnings(),
            options.strict,
        ));
    }
    Ok(exit_code)
}

/// Validate every file, continuing past unreadable ones
fn validate_all(
    validator: &RttmValidator,
    files: &[PathBuf],
    strict: bool,
) -> (Vec<ValidationReport>, ExitCode) {
    let mut reports = Vec::with_capacity(files.len());
    let mut exit_code = ExitCode::Success;

    for path in files {
        let result = if path.is_dir() {
            Err(RttmError::invalid_input(format!(
                "'{}' is a directory, expected an RTTM file",
                path.display()
            )))
        } else {
            validator.validate_file(path)
        };
        match result {
            Ok(report) => {
                tracing::info!(
                    file = %report.file,
                    valid = report.valid,
                    errors = report.stats.errors,
                    warnings = report.stats.warnings,
                    strict,
                    "File checked"
                );
                reports.push(report);
            }
            Err(e) => {
                tracing::error!(file = %path.display(), error = %e, "Could not validate file");
                eprintln!("Error: {}", e);
                exit_code = exit_code.worst(ExitCode::from_error(&e));
            }
        }
    }
    (reports, exit_code)
}

/// One line of the `kinds` listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KindRow {
    pub kind: String,
    pub priority: usize,
    pub begin_required: bool,
    pub duration_required: bool,
    pub overlap_checked: bool,
    pub subtypes: Vec<String>,
}

impl KindRow {
    fn from_kind(kind: RecordKind) -> Self {
        Self {
            kind: kind.as_str().to_string(),
            priority: kind.merge_priority(),
            begin_required: !kind.allows_missing_begin(),
            duration_required: !kind.allows_missing_duration(),
            overlap_checked: kind.is_overlap_checked(),
            subtypes: kind.subtypes().iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Rows for every known kind in merge order
pub fn kind_rows() -> Vec<KindRow> {
    RecordKind::ALL.iter().copied().map(KindRow::from_kind).collect()
}

/// Execute the kinds command
pub fn execute_kinds(format: OutputFormat) -> Result<ExitCode, RttmError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_kinds(&kind_rows(), format, &mut out)?;
    out.flush()?;
    Ok(ExitCode::Success)
}

fn render_kinds(
    rows: &[KindRow],
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<(), RttmError> {
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(rows)?)?,
        OutputFormat::Yaml => write!(out, "{}", serde_yaml::to_string(rows)?)?,
        OutputFormat::Table => {
            writeln!(
                out,
                "{:<4} {:<16} {:<6} {:<9} {:<8} {}",
                "#".bold(),
                "KIND".bold(),
                "BEGIN".bold(),
                "DURATION".bold(),
                "OVERLAP".bold(),
                "SUBTYPES".bold()
            )?;
            for row in rows {
                writeln!(
                    out,
                    "{:<4} {:<16} {:<6} {:<9} {:<8} {}",
                    row.priority,
                    row.kind.cyan(),
                    required_label(row.begin_required),
                    required_label(row.duration_required),
                    if row.overlap_checked { "yes" } else { "no" },
                    row.subtypes.join(", ")
                )?;
            }
        }
    }
    Ok(())
}

fn required_label(required: bool) -> &'static str {
    if required {
        "req"
    } else {
        "opt"
    }
}
