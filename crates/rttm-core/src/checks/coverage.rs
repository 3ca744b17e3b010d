//! Containment in both directions
//!
//! `is_contained` asks whether a range sits inside some reference span;
//! `has_content` asks whether a range holds at least one word. Both are
//! existential scans where the first match wins.

use super::ConsistencyCheck;
use crate::diagnostic::{CheckFamily, Diagnostic};
use crate::partition::{Partition, PartitionKey};
use crate::record::{Record, RecordKind};
use crate::tolerance::Tolerance;

/// True iff some span `r` satisfies `start + ε ≥ r.begin` and `end - ε ≤ r.end`
pub fn is_contained(spans: &[&Record], start: f64, end: f64, tolerance: &Tolerance) -> bool {
    spans.iter().any(|span| {
        !tolerance.less_than(start, span.start()) && !tolerance.greater_than(end, span.end())
    })
}

/// True iff some word `w` satisfies `w.begin + ε ≥ start` and `w.end - ε ≤ end`
pub fn has_content(words: &[&Record], start: f64, end: f64, tolerance: &Tolerance) -> bool {
    words.iter().any(|word| {
        !tolerance.less_than(word.start(), start) && !tolerance.greater_than(word.end(), end)
    })
}

/// Every SU, EDIT and FILLER span must hold at least one LEXEME
pub struct ContentCheck;

impl ConsistencyCheck for ContentCheck {
    fn family(&self) -> CheckFamily {
        CheckFamily::Content
    }

    fn name(&self) -> &'static str {
        "content"
    }

    fn check_partition(
        &self,
        _key: &PartitionKey,
        partition: &Partition<'_>,
        tolerance: &Tolerance,
        out: &mut Vec<Diagnostic>,
    ) {
        let words = partition.records(RecordKind::Lexeme);
        for kind in RecordKind::METADATA_SPANS {
            for span in partition.records(kind) {
                if !has_content(words, span.start(), span.end(), tolerance) {
                    out.push(Diagnostic::error(
                        self.family(),
                        format!("{} [{}, {}] contains no LEXEME", kind, span.start(), span.end()),
                        &span.origin,
                    ));
                }
            }
        }
    }
}

/// Every LEXEME must lie inside some span of the reference kind
pub struct CoverageCheck {
    kind: RecordKind,
}

impl CoverageCheck {
    /// Words covered by SU spans
    pub fn sentence_units() -> Self {
        Self {
            kind: RecordKind::Su,
        }
    }

    /// Words covered by SPEAKER spans
    pub fn speakers() -> Self {
        Self {
            kind: RecordKind::Speaker,
        }
    }
}

impl ConsistencyCheck for CoverageCheck {
    fn family(&self) -> CheckFamily {
        CheckFamily::Coverage
    }

    fn name(&self) -> &'static str {
        match self.kind {
            RecordKind::Su => "su-coverage",
            RecordKind::Speaker => "speaker-coverage",
            _ => "coverage",
        }
    }

    fn check_partition(
        &self,
        _key: &PartitionKey,
        partition: &Partition<'_>,
        tolerance: &Tolerance,
        out: &mut Vec<Diagnostic>,
    ) {
        let spans = partition.records(self.kind);
        for word in partition.records(RecordKind::Lexeme) {
            if !is_contained(spans, word.start(), word.end(), tolerance) {
                out.push(Diagnostic::error(
                    self.family(),
                    format!(
                        "LEXEME '{}' [{}, {}] is not inside any {} span",
                        word.orthography.as_deref().unwrap_or("?"),
                        word.start(),
                        word.end(),
                        self.kind
                    ),
                    &word.origin,
                ));
            }
        }
    }
}
