//! Output formatting for the RTTM validator CLI
//!
//! Renders validation reports as JSON, YAML, or a human-readable table with
//! severity-based coloring.

use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

use rttm_core::{Diagnostic, RttmError, ValidationReport};

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable table format with colors
    #[default]
    Table,
    /// JSON format for machine processing
    Json,
    /// YAML format
    Yaml,
}

/// Rendered result of one file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutput {
    pub file: String,
    pub valid: bool,
    pub input_digest: String,
    pub error_count: usize,
    pub warning_count: usize,
    pub records: usize,
    pub partitions: usize,
    pub logic_checked: bool,
    pub checks_run: Vec<String>,
    pub summary: String,
    pub findings: Vec<FindingOutput>,
}

/// Individual finding output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindingOutput {
    pub severity: String,
    pub check: String,
    pub location: String,
    pub message: String,
}

/// Everything printed for one invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutput {
    pub valid: bool,
    pub files: Vec<FileOutput>,
}

impl FileOutput {
    /// Create output from a validation report
    pub fn from_report(report: &ValidationReport) -> Self {
        let error_count = report.stats.errors;
        let warning_count = report.stats.warnings;

        let summary = if report.valid && warning_count == 0 {
            "File is valid".to_string()
        } else if report.valid {
            format!("File is valid with {} warning(s)", warning_count)
        } else {
            format!(
                "File has {} error(s) and {} warning(s)",
                error_count, warning_count
            )
        };

        Self {
            file: report.file.clone(),
            valid: report.valid,
            input_digest: report.input_digest.clone(),
            error_count,
            warning_count,
            records: report.stats.records,
            partitions: report.stats.partitions,
            logic_checked: report.logic_checked,
            checks_run: report.checks_run.clone(),
            summary,
            findings: report
                .diagnostics
                .iter()
                .map(FindingOutput::from_diagnostic)
                .collect(),
        }
    }

    fn render_table(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", self.file.cyan().bold())?;
        writeln!(out, "{}", "=".repeat(60))?;

        let status = if self.valid { "+".green() } else { "x".red() };
        writeln!(out, "{} {}", status, self.summary)?;
        writeln!(
            out,
            "  {} records, {} partition(s), sha256 {}",
            self.records,
            self.partitions,
            self.input_digest.dimmed()
        )?;
        if !self.logic_checked {
            writeln!(out, "  {}", "consistency checks not run".yellow())?;
        }

        if !self.findings.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", "Findings:".cyan().bold())?;
            writeln!(out, "{}", "-".repeat(60))?;
            for finding in &self.findings {
                finding.render_table_row(out)?;
            }
        }
        Ok(())
    }
}

impl FindingOutput {
    /// Create from a diagnostic
    pub fn from_diagnostic(diagnostic: &Diagnostic) -> Self {
        Self {
            severity: diagnostic.severity.to_string(),
            check: diagnostic.family.to_string(),
            location: diagnostic.origin.to_string(),
            message: diagnostic.message.clone(),
        }
    }

    fn render_table_row(&self, out: &mut impl Write) -> io::Result<()> {
        let label = match self.severity.as_str() {
            "error" => "ERROR".red().bold(),
            "warning" => "WARNING".yellow().bold(),
            _ => self.severity.as_str().white(),
        };
        writeln!(
            out,
            "{} [{}] {} {}",
            label,
            self.check.dimmed(),
            self.location.cyan(),
            self.message
        )
    }
}

impl BatchOutput {
    pub fn from_reports(reports: &[ValidationReport]) -> Self {
        Self {
            valid: reports.iter().all(|r| r.valid),
            files: reports.iter().map(FileOutput::from_report).collect(),
        }
    }

    /// Render output in the specified format
    pub fn render(&self, format: OutputFormat) -> Result<(), RttmError> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.render_to(format, &mut out)?;
        out.flush()?;
        Ok(())
    }

    /// Render into any writer
    pub fn render_to(&self, format: OutputFormat, out: &mut impl Write) -> Result<(), RttmError> {
        match format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(self)?;
                writeln!(out, "{}", json)?;
            }
            OutputFormat::Yaml => {
                let yaml = serde_yaml::to_string(self)?;
                write!(out, "{}", yaml)?;
            }
            OutputFormat::Table => {
                for file in &self.files {
                    file.render_table(out)?;
                }
                let total_errors: usize = self.files.iter().map(|f| f.error_count).sum();
                let total_warnings: usize = self.files.iter().map(|f| f.warning_count).sum();
                writeln!(out)?;
                let verdict = if self.valid {
                    "PASS".green().bold()
                } else {
                    "FAIL".red().bold()
                };
                writeln!(
                    out,
                    "{} {} file(s), {} error(s), {} warning(s)",
                    verdict,
                    self.files.len(),
                    total_errors,
                    total_warnings
                )?;
            }
        }
        Ok(())
    }
}
