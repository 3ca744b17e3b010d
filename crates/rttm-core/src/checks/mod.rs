//! Cross-record consistency checks
//!
//! Each check inspects one partition at a time and appends diagnostics.
//! Checks are pure: they read the partition index and never mutate records.

pub mod adjacency;
pub mod coverage;
pub mod overlap;
pub mod partial;

pub use adjacency::IpAdjacencyCheck;
pub use coverage::{has_content, is_contained, ContentCheck, CoverageCheck};
pub use overlap::OverlapCheck;
pub use partial::PartialCoverageCheck;

use crate::diagnostic::{CheckFamily, Diagnostic};
use crate::partition::{Partition, PartitionIndex, PartitionKey};
use crate::tolerance::Tolerance;

/// Trait for consistency checks
///
/// Implementations are deterministic: the same partition always yields the
/// same diagnostics in the same order.
pub trait ConsistencyCheck: Send + Sync {
    /// Family reported on every diagnostic this check emits
    fn family(&self) -> CheckFamily;

    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Check one partition
    fn check_partition(
        &self,
        key: &PartitionKey,
        partition: &Partition<'_>,
        tolerance: &Tolerance,
        out: &mut Vec<Diagnostic>,
    );

    /// Check every partition in key order, returning the diagnostics found
    fn run(&self, index: &PartitionIndex<'_>, tolerance: &Tolerance) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        for (key, partition) in index.iter() {
            let before = out.len();
            self.check_partition(key, partition, tolerance, &mut out);
            tracing::debug!(
                check = self.name(),
                partition = %key,
                findings = out.len() - before,
                "Checked partition"
            );
        }
        out
    }
}
