//! Partitioning of records into independent validation scopes
//!
//! All consistency checks run inside one `(source, channel, speaker)`
//! partition and never compare records across partitions. Inside a
//! partition records are kept per kind, sorted by begin time.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::record::{Record, RecordKind};

/// Composite key of a validation partition
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PartitionKey {
    pub source: String,
    pub channel: u8,
    pub speaker: String,
}

impl PartitionKey {
    pub fn of(record: &Record) -> Self {
        Self {
            source: record.source.clone(),
            channel: record.channel,
            speaker: record.speaker.clone(),
        }
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.source, self.channel, self.speaker)
    }
}

/// Records of one partition, grouped by kind
#[derive(Debug, Default)]
pub struct Partition<'a> {
    by_kind: BTreeMap<RecordKind, Vec<&'a Record>>,
}

impl<'a> Partition<'a> {
    /// Records of `kind`, sorted by begin time, then end time
    pub fn records(&self, kind: RecordKind) -> &[&'a Record] {
        self.by_kind.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Kinds present, in merge-priority order, with their sorted records
    pub fn groups(&self) -> impl Iterator<Item = (RecordKind, &[&'a Record])> + '_ {
        self.by_kind.iter().map(|(kind, records)| (*kind, records.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.by_kind.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_kind.is_empty()
    }

    fn push(&mut self, record: &'a Record) {
        self.by_kind.entry(record.kind).or_default().push(record);
    }

    fn sort(&mut self) {
        for records in self.by_kind.values_mut() {
            records.sort_by(|a, b| {
                a.start()
                    .total_cmp(&b.start())
                    .then_with(|| a.end().total_cmp(&b.end()))
                    .then_with(|| a.origin.cmp(&b.origin))
            });
        }
    }
}

/// `(source, channel, speaker) -> kind -> sorted records`
#[derive(Debug, Default)]
pub struct PartitionIndex<'a> {
    partitions: BTreeMap<PartitionKey, Partition<'a>>,
}

impl<'a> PartitionIndex<'a> {
    /// Group and sort a loaded record set
    pub fn build(records: &'a [Record]) -> Self {
        let mut partitions: BTreeMap<PartitionKey, Partition<'a>> = BTreeMap::new();
        for record in records {
            partitions
                .entry(PartitionKey::of(record))
                .or_default()
                .push(record);
        }
        for partition in partitions.values_mut() {
            partition.sort();
        }
        Self { partitions }
    }

    /// Partitions in key order
    pub fn iter(&self) -> impl Iterator<Item = (&PartitionKey, &Partition<'a>)> {
        self.partitions.iter()
    }

    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }
}
