//! Validation findings

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::record::Origin;

/// Severity levels for validation findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Reported but does not fail the verdict
    Warning,
    /// Fails the verdict
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Which check produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckFamily {
    /// Field-level syntax (outer layer)
    Syntax,
    /// Same-kind spans overlapping beyond tolerance
    Overlap,
    /// SU/EDIT/FILLER span without any word
    Content,
    /// Word crossing an SU/EDIT/FILLER boundary
    PartialCoverage,
    /// Word outside every span of a required kind
    Coverage,
    /// EDIT/FILLER without a valid interruption point
    Adjacency,
}

impl CheckFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckFamily::Syntax => "syntax",
            CheckFamily::Overlap => "overlap",
            CheckFamily::Content => "content",
            CheckFamily::PartialCoverage => "partial-coverage",
            CheckFamily::Coverage => "coverage",
            CheckFamily::Adjacency => "adjacency",
        }
    }
}

impl fmt::Display for CheckFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub family: CheckFamily,
    pub message: String,
    pub origin: Origin,
}

impl Diagnostic {
    /// Create a new error finding
    pub fn error(family: CheckFamily, message: impl Into<String>, origin: &Origin) -> Self {
        Self {
            severity: Severity::Error,
            family,
            message: message.into(),
            origin: origin.clone(),
        }
    }

    /// Create a new warning finding
    pub fn warning(family: CheckFamily, message: impl Into<String>, origin: &Origin) -> Self {
        Self {
            severity: Severity::Warning,
            family,
            message: message.into(),
            origin: origin.clone(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} at {}: {}",
            self.severity, self.family, self.origin, self.message
        )
    }
}
