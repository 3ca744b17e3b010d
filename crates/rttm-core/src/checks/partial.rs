//! Word boundary crossing
//!
//! A word may sit before, after or inside an SU/EDIT/FILLER span. Anything
//! else means the word straddles one of the span's boundaries.

use super::ConsistencyCheck;
use crate::diagnostic::{CheckFamily, Diagnostic};
use crate::partition::{Partition, PartitionKey};
use crate::record::{Record, RecordKind};
use crate::tolerance::Tolerance;

/// How a word relates to a metadata span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanRelation {
    Before,
    After,
    Inside,
    Crossing,
}

/// Classify word `[start, end]` against span `[span_begin, span_end]`
pub fn classify(
    start: f64,
    end: f64,
    span_begin: f64,
    span_end: f64,
    tolerance: &Tolerance,
) -> SpanRelation {
    if !tolerance.greater_than(end, span_begin) {
        SpanRelation::Before
    } else if !tolerance.less_than(start, span_end) {
        SpanRelation::After
    } else if !tolerance.less_than(start, span_begin) && !tolerance.greater_than(end, span_end) {
        SpanRelation::Inside
    } else {
        SpanRelation::Crossing
    }
}

/// Flags every (word, span) pair where the word crosses a span boundary
pub struct PartialCoverageCheck;

impl PartialCoverageCheck {
    fn crossing(
        &self,
        word: &Record,
        span: &Record,
        tolerance: &Tolerance,
    ) -> Option<Diagnostic> {
        match classify(word.start(), word.end(), span.start(), span.end(), tolerance) {
            SpanRelation::Crossing => Some(Diagnostic::error(
                self.family(),
                format!(
                    "LEXEME '{}' [{}, {}] partially overlaps {} [{}, {}] (origin {})",
                    word.orthography.as_deref().unwrap_or("?"),
                    word.start(),
                    word.end(),
                    span.kind,
                    span.start(),
                    span.end(),
                    span.origin
                ),
                &word.origin,
            )),
            _ => None,
        }
    }
}

impl ConsistencyCheck for PartialCoverageCheck {
    fn family(&self) -> CheckFamily {
        CheckFamily::PartialCoverage
    }

    fn name(&self) -> &'static str {
        "partial-coverage"
    }

    fn check_partition(
        &self,
        _key: &PartitionKey,
        partition: &Partition<'_>,
        tolerance: &Tolerance,
        out: &mut Vec<Diagnostic>,
    ) {
        for word in partition.records(RecordKind::Lexeme) {
            for kind in RecordKind::METADATA_SPANS {
                for span in partition.records(kind) {
                    out.extend(self.crossing(word, span, tolerance));
                }
            }
        }
    }
}
