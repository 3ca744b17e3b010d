//! Chronological merge of a partition's records
//!
//! Two records whose begin times are within tolerance count as simultaneous
//! and are ordered by kind priority (SU before IP before EDIT before FILLER,
//! and so on). The merged stream drives the interruption-point protocol.

use std::cmp::Ordering;

use crate::partition::Partition;
use crate::record::{Record, RecordKind};
use crate::tolerance::Tolerance;

/// Pairwise merge order: tolerant begin time first, kind priority second
pub fn merge_cmp(tolerance: &Tolerance, a: &Record, b: &Record) -> Ordering {
    if tolerance.less_than(a.start(), b.start()) {
        Ordering::Less
    } else if tolerance.less_than(b.start(), a.start()) {
        Ordering::Greater
    } else {
        a.kind.merge_priority().cmp(&b.kind.merge_priority())
    }
}

/// Merge every kind of a partition except SPKR-INFO into one stream
///
/// K-way merge over the per-kind sorted lists. Heads are scanned in priority
/// order and the pick only changes when a later head strictly precedes it, so
/// the result does not depend on input order even though tolerant equality
/// is not transitive.
pub fn merged_stream<'a>(partition: &Partition<'a>, tolerance: &Tolerance) -> Vec<&'a Record> {
    let lists: Vec<&[&'a Record]> = partition
        .groups()
        .filter(|(kind, _)| *kind != RecordKind::SpkrInfo)
        .map(|(_, records)| records)
        .collect();

    let total = lists.iter().map(|l| l.len()).sum();
    let mut cursors = vec![0usize; lists.len()];
    let mut merged = Vec::with_capacity(total);

    while merged.len() < total {
        let mut pick: Option<(usize, &'a Record)> = None;
        for (slot, list) in lists.iter().enumerate() {
            let Some(head) = list.get(cursors[slot]).copied() else {
                continue;
            };
            pick = match pick {
                Some((_, best)) if merge_cmp(tolerance, head, best) != Ordering::Less => pick,
                _ => Some((slot, head)),
            };
        }
        match pick {
            Some((slot, record)) => {
                cursors[slot] += 1;
                merged.push(record);
            }
            None => break,
        }
    }

    merged
}
