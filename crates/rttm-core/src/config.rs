//! Validator configuration
//!
//! Values come from defaults, then an optional TOML file, then environment
//! variables. The CLI applies its own flags last.
//!
//! ```toml
//! epsilon = 0.000999999
//!
//! [checks]
//! su_coverage = true
//! speaker_coverage = false
//! edit_ip = true
//! filler_ip = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, RttmError};
use crate::tolerance::{Tolerance, DEFAULT_EPSILON};

/// Switches for the optional second-phase checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckSelection {
    /// Every word must lie inside an SU span
    pub su_coverage: bool,
    /// Every word must lie inside a SPEAKER span
    pub speaker_coverage: bool,
    /// Every EDIT needs an adjacent IP
    pub edit_ip: bool,
    /// Every FILLER needs an adjacent IP
    pub filler_ip: bool,
}

impl Default for CheckSelection {
    fn default() -> Self {
        Self {
            su_coverage: true,
            speaker_coverage: true,
            edit_ip: true,
            filler_ip: true,
        }
    }
}

/// Top-level validator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Tolerance for every time comparison, in seconds
    pub epsilon: f64,
    pub checks: CheckSelection,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            checks: CheckSelection::default(),
        }
    }
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ValidatorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RttmError::FileError(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Override fields from `RTTM_*` environment variables
    ///
    /// Unparseable values are ignored and the current value kept.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Override fields from an arbitrary variable lookup
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |name: &str, current: bool| {
            lookup(name)
                .map(|v| v.parse().unwrap_or(current))
                .unwrap_or(current)
        };

        self.checks.su_coverage = flag("RTTM_CHECK_SU_COVERAGE", self.checks.su_coverage);
        self.checks.speaker_coverage =
            flag("RTTM_CHECK_SPEAKER_COVERAGE", self.checks.speaker_coverage);
        self.checks.edit_ip = flag("RTTM_CHECK_EDIT_IP", self.checks.edit_ip);
        self.checks.filler_ip = flag("RTTM_CHECK_FILLER_IP", self.checks.filler_ip);
        self.epsilon = lookup("RTTM_EPSILON")
            .map(|v| v.parse().unwrap_or(self.epsilon))
            .unwrap_or(self.epsilon);

        self.validate()?;
        Ok(self)
    }

    /// Set the tolerance
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the check selection
    pub fn with_checks(mut self, checks: CheckSelection) -> Self {
        self.checks = checks;
        self
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(RttmError::config_error(format!(
                "epsilon must be a positive finite number, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }

    pub fn tolerance(&self) -> Tolerance {
        Tolerance::new(self.epsilon)
    }
}
