//! Per-file validation reports

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::diagnostic::{CheckFamily, Diagnostic, Severity};

/// Counters for a validated file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStats {
    pub lines: usize,
    pub records: usize,
    pub partitions: usize,
    pub errors: usize,
    pub warnings: usize,
}

/// Outcome of validating one RTTM source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub file: String,
    /// SHA-256 of the file content, hex encoded
    pub input_digest: String,
    pub generated_at: DateTime<Utc>,
    pub valid: bool,
    /// False when syntax errors or `--syntax-only` kept the engine from running
    pub logic_checked: bool,
    pub checks_run: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopped_at: Option<CheckFamily>,
    pub stats: ReportStats,
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    /// Start a report for `content`; findings are added with [`Self::finish`]
    pub fn new(file: impl Into<String>, content: &str) -> Self {
        Self {
            file: file.into(),
            input_digest: digest(content),
            generated_at: Utc::now(),
            valid: true,
            logic_checked: false,
            checks_run: Vec::new(),
            stopped_at: None,
            stats: ReportStats::default(),
            diagnostics: Vec::new(),
        }
    }

    /// Recompute counters and verdict from the collected diagnostics
    pub fn finish(mut self) -> Self {
        self.stats.errors = self.count(Severity::Error);
        self.stats.warnings = self.count(Severity::Warning);
        self.valid = self.stats.errors == 0;
        self
    }

    pub fn has_errors(&self) -> bool {
        self.stats.errors > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.stats.warnings > 0
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

/// SHA-256 of a document, hex encoded
pub fn digest(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
