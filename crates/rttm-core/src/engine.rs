//! Validation orchestrator
//!
//! Phase one runs overlap, content and partial-coverage in that order and
//! stops at the first family that reports an error; later checks assume
//! those invariants hold. Phase two runs every enabled coverage and IP
//! check to completion and aggregates their findings.

use serde::{Deserialize, Serialize};

use crate::checks::{
    ConsistencyCheck, ContentCheck, CoverageCheck, IpAdjacencyCheck, OverlapCheck,
    PartialCoverageCheck,
};
use crate::config::ValidatorConfig;
use crate::diagnostic::{CheckFamily, Diagnostic};
use crate::partition::PartitionIndex;
use crate::record::Record;
use crate::tolerance::Tolerance;

/// Verdict and findings of one engine run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineOutcome {
    pub valid: bool,
    pub diagnostics: Vec<Diagnostic>,
    /// Names of the checks that ran, in order
    pub checks_run: Vec<String>,
    /// Phase-one family that stopped the run, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopped_at: Option<CheckFamily>,
    pub partitions: usize,
}

/// Temporal consistency engine
pub struct ConsistencyEngine {
    tolerance: Tolerance,
    structural: Vec<Box<dyn ConsistencyCheck>>,
    requested: Vec<Box<dyn ConsistencyCheck>>,
}

impl Default for ConsistencyEngine {
    fn default() -> Self {
        Self::new(&ValidatorConfig::default())
    }
}

impl ConsistencyEngine {
    /// Build the check pipeline for a configuration
    pub fn new(config: &ValidatorConfig) -> Self {
        let structural: Vec<Box<dyn ConsistencyCheck>> = vec![
            Box::new(OverlapCheck),
            Box::new(ContentCheck),
            Box::new(PartialCoverageCheck),
        ];

        let checks = &config.checks;
        let mut requested: Vec<Box<dyn ConsistencyCheck>> = Vec::new();
        if checks.su_coverage {
            requested.push(Box::new(CoverageCheck::sentence_units()));
        }
        if checks.speaker_coverage {
            requested.push(Box::new(CoverageCheck::speakers()));
        }
        if checks.edit_ip || checks.filler_ip {
            requested.push(Box::new(IpAdjacencyCheck::new(checks.edit_ip, checks.filler_ip)));
        }

        Self {
            tolerance: config.tolerance(),
            structural,
            requested,
        }
    }

    /// Validate a loaded record set
    ///
    /// Records must already have passed field-level syntax checks.
    pub fn validate(&self, records: &[Record]) -> EngineOutcome {
        let index = PartitionIndex::build(records);
        let mut diagnostics = Vec::new();
        let mut checks_run = Vec::new();

        for check in &self.structural {
            let found = check.run(&index, &self.tolerance);
            checks_run.push(check.name().to_string());
            let failed = found.iter().any(Diagnostic::is_error);
            diagnostics.extend(found);
            if failed {
                tracing::info!(
                    check = check.name(),
                    errors = diagnostics.len(),
                    "Structural check failed, skipping remaining checks"
                );
                return EngineOutcome {
                    valid: false,
                    diagnostics,
                    checks_run,
                    stopped_at: Some(check.family()),
                    partitions: index.len(),
                };
            }
        }

        for check in &self.requested {
            diagnostics.extend(check.run(&index, &self.tolerance));
            checks_run.push(check.name().to_string());
        }

        let valid = !diagnostics.iter().any(Diagnostic::is_error);
        tracing::info!(
            valid,
            partitions = index.len(),
            findings = diagnostics.len(),
            "Consistency validation complete"
        );

        EngineOutcome {
            valid,
            diagnostics,
            checks_run,
            stopped_at: None,
            partitions: index.len(),
        }
    }
}
