//! Same-kind overlap detection
//!
//! A linear boundary scan: each span is compared with the end of the span
//! walked just before it, not with the furthest end seen so far.

use super::ConsistencyCheck;
use crate::diagnostic::{CheckFamily, Diagnostic};
use crate::partition::{Partition, PartitionKey};
use crate::tolerance::Tolerance;

/// Flags a span starting measurably before the previous same-kind span ended
pub struct OverlapCheck;

impl ConsistencyCheck for OverlapCheck {
    fn family(&self) -> CheckFamily {
        CheckFamily::Overlap
    }

    fn name(&self) -> &'static str {
        "overlap"
    }

    fn check_partition(
        &self,
        key: &PartitionKey,
        partition: &Partition<'_>,
        tolerance: &Tolerance,
        out: &mut Vec<Diagnostic>,
    ) {
        for (kind, records) in partition.groups() {
            if !kind.is_overlap_checked() {
                continue;
            }

            let mut prev_end: Option<f64> = None;
            for record in records {
                if let Some(prev_end) = prev_end {
                    if tolerance.greater_than(prev_end, record.start()) {
                        out.push(Diagnostic::error(
                            self.family(),
                            format!(
                                "{} starting at {} overlaps the previous {} of speaker '{}' ending at {}",
                                kind,
                                record.start(),
                                kind,
                                key.speaker,
                                prev_end
                            ),
                            &record.origin,
                        ));
                    }
                }
                prev_end = Some(record.end());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::PartitionIndex;
    use crate::record::{Record, RecordKind};
    use crate::tolerance::DEFAULT_EPSILON;

    fn span(kind: RecordKind, begin: f64, duration: f64) -> Record {
        Record::new(kind, "f", 1, "spk", begin, Some(duration))
    }

    fn run(records: &[Record]) -> Vec<Diagnostic> {
        OverlapCheck.run(&PartitionIndex::build(records), &Tolerance::default())
    }

    #[test]
    fn test_adjacent_spans_pass() {
        let records = vec![span(RecordKind::Su, 0.0, 2.0), span(RecordKind::Su, 2.0, 3.0)];
        assert!(run(&records).is_empty());
    }

    #[test]
    fn test_overlap_is_flagged_once() {
        let records = vec![
            span(RecordKind::Lexeme, 0.0, 1.0),
            span(RecordKind::Lexeme, 0.5, 1.0),
            span(RecordKind::Lexeme, 2.0, 1.0),
        ];
        let diags = run(&records);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].family, CheckFamily::Overlap);
    }

    #[test]
    fn test_half_epsilon_is_tolerated() {
        let records = vec![
            span(RecordKind::Su, 0.0, 2.0),
            span(RecordKind::Su, 2.0 - DEFAULT_EPSILON / 2.0, 1.0),
        ];
        assert!(run(&records).is_empty());
    }

    #[test]
    fn test_two_epsilon_is_flagged() {
        let records = vec![
            span(RecordKind::Su, 0.0, 2.0),
            span(RecordKind::Su, 2.0 - DEFAULT_EPSILON * 2.0, 1.0),
        ];
        assert_eq!(run(&records).len(), 1);
    }

    #[test]
    fn test_different_kinds_may_overlap() {
        let records = vec![span(RecordKind::Su, 0.0, 5.0), span(RecordKind::Lexeme, 1.0, 1.0)];
        assert!(run(&records).is_empty());
    }

    #[test]
    fn test_exempt_kinds_skipped() {
        let records = vec![span(RecordKind::Cb, 0.0, 5.0), span(RecordKind::Cb, 1.0, 1.0)];
        assert!(run(&records).is_empty());
    }

    #[test]
    fn test_scan_uses_last_end_not_max() {
        // The long first span is only compared with the second one.
        let records = vec![
            span(RecordKind::NonSpeech, 0.0, 10.0),
            span(RecordKind::NonSpeech, 1.0, 1.0),
            span(RecordKind::NonSpeech, 3.0, 1.0),
        ];
        assert_eq!(run(&records).len(), 1);
    }

    #[test]
    fn test_other_speaker_never_overlaps() {
        let mut other = span(RecordKind::Su, 0.5, 1.0);
        other.speaker = "other".to_string();
        let records = vec![span(RecordKind::Su, 0.0, 2.0), other];
        assert!(run(&records).is_empty());
    }
}
