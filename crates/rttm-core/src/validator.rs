//! File-level validation: syntax pass, then the consistency engine

use std::path::Path;

use crate::config::ValidatorConfig;
use crate::engine::ConsistencyEngine;
use crate::error::{Result, RttmError};
use crate::parser::parse_source;
use crate::report::ValidationReport;

/// Validates RTTM documents end to end
pub struct RttmValidator {
    engine: ConsistencyEngine,
    syntax_only: bool,
}

impl RttmValidator {
    /// Create a validator, rejecting unusable configuration
    pub fn new(config: &ValidatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            engine: ConsistencyEngine::new(config),
            syntax_only: false,
        })
    }

    /// Skip the consistency engine and report syntax findings only
    pub fn with_syntax_only(mut self, syntax_only: bool) -> Self {
        self.syntax_only = syntax_only;
        self
    }

    /// Validate an in-memory RTTM document
    pub fn validate_source(&self, text: &str, file_name: &str) -> ValidationReport {
        let mut report = ValidationReport::new(file_name, text);
        let parsed = parse_source(text, file_name);
        report.stats.lines = parsed.lines;
        report.stats.records = parsed.records.len();

        let syntax_failed = parsed.has_syntax_errors();
        report.diagnostics = parsed.diagnostics;

        if syntax_failed {
            tracing::warn!(
                file = file_name,
                "Syntax errors found, skipping consistency checks"
            );
        } else if !self.syntax_only {
            let outcome = self.engine.validate(&parsed.records);
            report.logic_checked = true;
            report.checks_run = outcome.checks_run;
            report.stopped_at = outcome.stopped_at;
            report.stats.partitions = outcome.partitions;
            report.diagnostics.extend(outcome.diagnostics);
        }

        report.finish()
    }

    /// Read and validate an RTTM file
    pub fn validate_file(&self, path: &Path) -> Result<ValidationReport> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RttmError::FileError(format!(
                "Failed to read RTTM file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(self.validate_source(&content, &path.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::CheckFamily;

    const CLEAN: &str = "\
SPEAKER f 1 0.00 3.00 <NA> <NA> A <NA>
SU f 1 0.00 3.00 <NA> statement A <NA>
LEXEME f 1 0.00 1.00 so lex A <NA>
LEXEME f 1 1.00 2.00 yes lex A <NA>
";

    #[test]
    fn test_clean_source() {
        let validator = RttmValidator::new(&ValidatorConfig::default()).unwrap();
        let report = validator.validate_source(CLEAN, "clean.rttm");
        assert!(report.valid, "{:?}", report.diagnostics);
        assert!(report.logic_checked);
        assert_eq!(report.stats.records, 4);
        assert_eq!(report.stats.partitions, 1);
    }

    #[test]
    fn test_syntax_errors_skip_engine() {
        let text = format!("{}SU f 1 9.0 <NA> <NA> statement A <NA>\n", CLEAN);
        let validator = RttmValidator::new(&ValidatorConfig::default()).unwrap();
        let report = validator.validate_source(&text, "bad.rttm");
        assert!(!report.valid);
        assert!(!report.logic_checked);
        assert!(report.checks_run.is_empty());
        assert!(report
            .diagnostics
            .iter()
            .all(|d| d.family == CheckFamily::Syntax));
    }

    #[test]
    fn test_syntax_only_mode() {
        let text = "SU f 1 0.0 1.0 <NA> statement A <NA>\n";
        let validator = RttmValidator::new(&ValidatorConfig::default())
            .unwrap()
            .with_syntax_only(true);
        let report = validator.validate_source(text, "x.rttm");
        assert!(report.valid);
        assert!(!report.logic_checked);
    }

    #[test]
    fn test_rejects_bad_config() {
        let config = ValidatorConfig::default().with_epsilon(0.0);
        assert!(RttmValidator::new(&config).is_err());
    }
}
