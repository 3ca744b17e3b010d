//! Interruption-point adjacency protocol
//!
//! One ordered pass over the partition's merged stream. Two pieces of state
//! are threaded through the fold:
//!
//! - `current_su`: the most recent SU seen; IPs are only searched inside it.
//! - `pending_edit`: the most recent EDIT whose IP had subtype `edit&filler`.
//!   A later FILLER may lean on that IP instead of having its own.
//!
//! EDIT needs an IP at its end time with subtype `edit` or `edit&filler`.
//! FILLER needs an IP at its begin time with subtype `filler`, or an
//! `edit&filler` IP that closes the pending EDIT.

use super::ConsistencyCheck;
use crate::diagnostic::{CheckFamily, Diagnostic};
use crate::ordering::merged_stream;
use crate::partition::{Partition, PartitionKey};
use crate::record::{Record, RecordKind};
use crate::tolerance::Tolerance;

const IP_EDIT: &str = "edit";
const IP_FILLER: &str = "filler";
const IP_EDIT_FILLER: &str = "edit&filler";

#[derive(Debug, Clone, Copy, Default)]
struct ProtocolState<'a> {
    current_su: Option<&'a Record>,
    pending_edit: Option<&'a Record>,
}

/// First IP inside the current SU whose begin time equals `at`
fn find_ip<'a>(
    ips: &[&'a Record],
    su: Option<&Record>,
    at: f64,
    tolerance: &Tolerance,
) -> Option<&'a Record> {
    let su = su?;
    ips.iter().copied().find(|ip| {
        !tolerance.less_than(ip.start(), su.start())
            && !tolerance.greater_than(ip.start(), su.end())
            && tolerance.equal_to(ip.start(), at)
    })
}

/// EDIT/FILLER to IP adjacency, each side switchable
pub struct IpAdjacencyCheck {
    edits: bool,
    fillers: bool,
}

impl IpAdjacencyCheck {
    pub fn new(edits: bool, fillers: bool) -> Self {
        Self { edits, fillers }
    }

    fn step<'a>(
        &self,
        state: ProtocolState<'a>,
        record: &'a Record,
        ips: &[&'a Record],
        tolerance: &Tolerance,
        out: &mut Vec<Diagnostic>,
    ) -> ProtocolState<'a> {
        match record.kind {
            RecordKind::Su => ProtocolState {
                current_su: Some(record),
                ..state
            },
            RecordKind::Edit => self.on_edit(state, record, ips, tolerance, out),
            RecordKind::Filler => {
                if self.fillers {
                    self.on_filler(&state, record, ips, tolerance, out);
                }
                state
            }
            _ => state,
        }
    }

    fn on_edit<'a>(
        &self,
        state: ProtocolState<'a>,
        edit: &'a Record,
        ips: &[&'a Record],
        tolerance: &Tolerance,
        out: &mut Vec<Diagnostic>,
    ) -> ProtocolState<'a> {
        let ip = find_ip(ips, state.current_su, edit.end(), tolerance);
        match ip.map(|ip| (ip, ip.subtype_str())) {
            Some((_, IP_EDIT)) => state,
            Some((_, IP_EDIT_FILLER)) => ProtocolState {
                pending_edit: Some(edit),
                ..state
            },
            Some((ip, subtype)) => {
                if self.edits {
                    out.push(Diagnostic::error(
                        self.family(),
                        format!(
                            "IP at {} closing EDIT [{}, {}] has subtype '{}', expected '{}' or '{}'",
                            ip.start(),
                            edit.start(),
                            edit.end(),
                            subtype,
                            IP_EDIT,
                            IP_EDIT_FILLER
                        ),
                        &edit.origin,
                    ));
                }
                state
            }
            None => {
                if self.edits {
                    out.push(Diagnostic::error(
                        self.family(),
                        missing_ip_message("EDIT", edit, edit.end(), state.current_su),
                        &edit.origin,
                    ));
                }
                state
            }
        }
    }

    fn on_filler(
        &self,
        state: &ProtocolState<'_>,
        filler: &Record,
        ips: &[&Record],
        tolerance: &Tolerance,
        out: &mut Vec<Diagnostic>,
    ) {
        let message = match find_ip(ips, state.current_su, filler.start(), tolerance) {
            Some(ip) => match ip.subtype_str() {
                IP_FILLER => None,
                IP_EDIT_FILLER => match state.pending_edit {
                    Some(edit) if tolerance.equal_to(edit.end(), ip.start()) => None,
                    _ => Some(format!(
                        "IP '{}' at {} before FILLER [{}, {}] does not close a preceding EDIT",
                        IP_EDIT_FILLER,
                        ip.start(),
                        filler.start(),
                        filler.end()
                    )),
                },
                subtype => Some(format!(
                    "IP at {} before FILLER [{}, {}] has subtype '{}', expected '{}' or '{}'",
                    ip.start(),
                    filler.start(),
                    filler.end(),
                    subtype,
                    IP_FILLER,
                    IP_EDIT_FILLER
                )),
            },
            None => match state.pending_edit {
                Some(edit) if find_ip(ips, state.current_su, edit.end(), tolerance).is_some() => {
                    None
                }
                Some(edit) => Some(format!(
                    "FILLER [{}, {}] has no IP at its begin time and the pending EDIT ending at {} has none either",
                    filler.start(),
                    filler.end(),
                    edit.end()
                )),
                None => Some(missing_ip_message(
                    "FILLER",
                    filler,
                    filler.start(),
                    state.current_su,
                )),
            },
        };

        if let Some(message) = message {
            out.push(Diagnostic::error(self.family(), message, &filler.origin));
        }
    }
}

fn missing_ip_message(label: &str, record: &Record, at: f64, su: Option<&Record>) -> String {
    match su {
        Some(su) => format!(
            "{} [{}, {}] has no IP at {} within SU [{}, {}]",
            label,
            record.start(),
            record.end(),
            at,
            su.start(),
            su.end()
        ),
        None => format!(
            "{} [{}, {}] has no IP at {}: no SU precedes it",
            label,
            record.start(),
            record.end(),
            at
        ),
    }
}

impl ConsistencyCheck for IpAdjacencyCheck {
    fn family(&self) -> CheckFamily {
        CheckFamily::Adjacency
    }

    fn name(&self) -> &'static str {
        match (self.edits, self.fillers) {
            (true, false) => "edit-ip",
            (false, true) => "filler-ip",
            _ => "ip-adjacency",
        }
    }

    fn check_partition(
        &self,
        _key: &PartitionKey,
        partition: &Partition<'_>,
        tolerance: &Tolerance,
        out: &mut Vec<Diagnostic>,
    ) {
        if !self.edits && !self.fillers {
            return;
        }

        let ips = partition.records(RecordKind::Ip);
        merged_stream(partition, tolerance)
            .into_iter()
            .fold(ProtocolState::default(), |state, record| {
                self.step(state, record, ips, tolerance, out)
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::PartitionIndex;

    fn span(kind: RecordKind, begin: f64, duration: f64) -> Record {
        Record::new(kind, "f", 1, "spk", begin, Some(duration))
    }

    fn ip(begin: f64, subtype: &str) -> Record {
        Record::new(RecordKind::Ip, "f", 1, "spk", begin, None).with_subtype(subtype)
    }

    fn run(records: &[Record]) -> Vec<Diagnostic> {
        IpAdjacencyCheck::new(true, true).run(&PartitionIndex::build(records), &Tolerance::default())
    }

    #[test]
    fn test_edit_with_edit_ip_passes() {
        let records = vec![
            span(RecordKind::Su, 0.0, 10.0),
            span(RecordKind::Edit, 2.0, 2.0),
            ip(4.0, "edit"),
        ];
        assert!(run(&records).is_empty());
    }

    #[test]
    fn test_edit_with_wrong_subtype_fails() {
        let records = vec![
            span(RecordKind::Su, 0.0, 10.0),
            span(RecordKind::Edit, 2.0, 2.0),
            ip(4.0, "other"),
        ];
        let diags = run(&records);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("subtype 'other'"));
    }

    #[test]
    fn test_edit_without_ip_fails() {
        let records = vec![
            span(RecordKind::Su, 0.0, 10.0),
            span(RecordKind::Edit, 2.0, 2.0),
            ip(6.0, "edit"),
        ];
        let diags = run(&records);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].family, CheckFamily::Adjacency);
    }

    #[test]
    fn test_edit_ip_outside_current_su_fails() {
        let records = vec![
            span(RecordKind::Su, 0.0, 3.0),
            span(RecordKind::Edit, 2.0, 2.0),
            ip(4.0, "edit"),
        ];
        assert_eq!(run(&records).len(), 1);
    }

    #[test]
    fn test_edit_before_any_su_fails() {
        let records = vec![span(RecordKind::Edit, 2.0, 2.0), ip(4.0, "edit")];
        let diags = run(&records);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("no SU precedes it"));
    }

    #[test]
    fn test_filler_with_filler_ip_passes() {
        let records = vec![
            span(RecordKind::Su, 0.0, 10.0),
            ip(3.0, "filler"),
            span(RecordKind::Filler, 3.0, 1.0),
        ];
        assert!(run(&records).is_empty());
    }

    #[test]
    fn test_filler_chained_to_edit_passes() {
        let records = vec![
            span(RecordKind::Su, 0.0, 10.0),
            span(RecordKind::Edit, 2.0, 2.0),
            ip(4.0, "edit&filler"),
            span(RecordKind::Filler, 4.0, 1.0),
        ];
        assert!(run(&records).is_empty());
    }

    #[test]
    fn test_filler_falls_back_to_pending_edit_ip() {
        // The FILLER starts later than the shared IP, so it can only be
        // justified through the pending EDIT.
        let records = vec![
            span(RecordKind::Su, 0.0, 10.0),
            span(RecordKind::Edit, 2.0, 2.0),
            ip(4.0, "edit&filler"),
            span(RecordKind::Filler, 4.5, 1.0),
        ];
        assert!(run(&records).is_empty());
    }

    #[test]
    fn test_edit_filler_ip_without_edit_fails() {
        let records = vec![
            span(RecordKind::Su, 0.0, 10.0),
            ip(4.0, "edit&filler"),
            span(RecordKind::Filler, 4.0, 1.0),
        ];
        let diags = run(&records);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("does not close a preceding EDIT"));
    }

    #[test]
    fn test_edit_filler_ip_not_closing_pending_edit_fails() {
        let records = vec![
            span(RecordKind::Su, 0.0, 10.0),
            span(RecordKind::Edit, 1.0, 1.0),
            ip(2.0, "edit&filler"),
            ip(5.0, "edit&filler"),
            span(RecordKind::Filler, 5.0, 1.0),
        ];
        let diags = run(&records);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("IP 'edit&filler' at 5"));
        assert!(diags[0].message.contains("does not close a preceding EDIT"));
    }

    #[test]
    fn test_plain_edit_ip_keeps_earlier_pending_edit() {
        // The FILLER has no IP of its own; only the first EDIT's shared IP
        // can justify it, so it must survive the second EDIT.
        let records = vec![
            span(RecordKind::Su, 0.0, 10.0),
            span(RecordKind::Edit, 1.0, 1.0),
            ip(2.0, "edit&filler"),
            span(RecordKind::Edit, 3.0, 1.0),
            ip(4.0, "edit"),
            span(RecordKind::Filler, 6.0, 1.0),
        ];
        assert!(run(&records).is_empty());

        let without_shared_ip: Vec<Record> = records
            .iter()
            .filter(|r| r.subtype_str() != "edit&filler")
            .cloned()
            .collect();
        let diags = run(&without_shared_ip);
        assert_eq!(diags.len(), 2);
    }

    #[test]
    fn test_filler_without_ip_or_pending_edit_fails() {
        let records = vec![
            span(RecordKind::Su, 0.0, 10.0),
            span(RecordKind::Filler, 4.0, 1.0),
        ];
        assert_eq!(run(&records).len(), 1);
    }

    #[test]
    fn test_filler_with_edit_ip_fails() {
        let records = vec![
            span(RecordKind::Su, 0.0, 10.0),
            ip(4.0, "edit"),
            span(RecordKind::Filler, 4.0, 1.0),
        ];
        let diags = run(&records);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("subtype 'edit'"));
    }

    #[test]
    fn test_disabled_sides_are_silent() {
        let records = vec![
            span(RecordKind::Su, 0.0, 10.0),
            span(RecordKind::Edit, 2.0, 2.0),
            span(RecordKind::Filler, 6.0, 1.0),
        ];
        let index = PartitionIndex::build(&records);
        let tol = Tolerance::default();
        assert_eq!(IpAdjacencyCheck::new(true, false).run(&index, &tol).len(), 1);
        assert_eq!(IpAdjacencyCheck::new(false, true).run(&index, &tol).len(), 1);
        assert!(IpAdjacencyCheck::new(false, false).run(&index, &tol).is_empty());
    }

    #[test]
    fn test_pending_edit_tracked_when_edit_side_disabled() {
        let records = vec![
            span(RecordKind::Su, 0.0, 10.0),
            span(RecordKind::Edit, 2.0, 2.0),
            ip(4.0, "edit&filler"),
            span(RecordKind::Filler, 4.0, 1.0),
        ];
        let index = PartitionIndex::build(&records);
        let diags = IpAdjacencyCheck::new(false, true).run(&index, &Tolerance::default());
        assert!(diags.is_empty());
    }
}
