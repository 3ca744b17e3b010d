//! Typed RTTM annotation records
//!
//! A [`Record`] is one parsed line of an RTTM file. Records are immutable once
//! loaded; validation only orders references to them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placeholder used by RTTM for "not applicable" fields
pub const NOT_APPLICABLE: &str = "<NA>";

/// The closed set of RTTM record types
///
/// Variants are declared in merge-priority order, so the derived `Ord`
/// is the tie-break table used when two records start at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    #[serde(rename = "NOSCORE")]
    NoScore,
    #[serde(rename = "NO_RT_METADATA")]
    NoRtMetadata,
    #[serde(rename = "SEGMENT")]
    Segment,
    #[serde(rename = "SPEAKER")]
    Speaker,
    #[serde(rename = "SU")]
    Su,
    #[serde(rename = "A/P")]
    AP,
    #[serde(rename = "CB")]
    Cb,
    #[serde(rename = "IP")]
    Ip,
    #[serde(rename = "EDIT")]
    Edit,
    #[serde(rename = "FILLER")]
    Filler,
    #[serde(rename = "NON-SPEECH")]
    NonSpeech,
    #[serde(rename = "NON-LEX")]
    NonLex,
    #[serde(rename = "LEXEME")]
    Lexeme,
    #[serde(rename = "SPKR-INFO")]
    SpkrInfo,
}

impl RecordKind {
    /// Every kind, in merge-priority order
    pub const ALL: [RecordKind; 14] = [
        RecordKind::NoScore,
        RecordKind::NoRtMetadata,
        RecordKind::Segment,
        RecordKind::Speaker,
        RecordKind::Su,
        RecordKind::AP,
        RecordKind::Cb,
        RecordKind::Ip,
        RecordKind::Edit,
        RecordKind::Filler,
        RecordKind::NonSpeech,
        RecordKind::NonLex,
        RecordKind::Lexeme,
        RecordKind::SpkrInfo,
    ];

    /// Kinds whose spans are checked against LEXEME content and boundaries
    pub const METADATA_SPANS: [RecordKind; 3] = [RecordKind::Su, RecordKind::Edit, RecordKind::Filler];

    /// The name used in RTTM files
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::NoScore => "NOSCORE",
            RecordKind::NoRtMetadata => "NO_RT_METADATA",
            RecordKind::Segment => "SEGMENT",
            RecordKind::Speaker => "SPEAKER",
            RecordKind::Su => "SU",
            RecordKind::AP => "A/P",
            RecordKind::Cb => "CB",
            RecordKind::Ip => "IP",
            RecordKind::Edit => "EDIT",
            RecordKind::Filler => "FILLER",
            RecordKind::NonSpeech => "NON-SPEECH",
            RecordKind::NonLex => "NON-LEX",
            RecordKind::Lexeme => "LEXEME",
            RecordKind::SpkrInfo => "SPKR-INFO",
        }
    }

    /// Position in the merge tie-break table (lower sorts first)
    pub fn merge_priority(&self) -> usize {
        *self as usize
    }

    /// Allowed values of the subtype field
    pub fn subtypes(&self) -> &'static [&'static str] {
        match self {
            RecordKind::Segment => &["eval", NOT_APPLICABLE],
            RecordKind::NoScore | RecordKind::NoRtMetadata | RecordKind::AP | RecordKind::Speaker => {
                &[NOT_APPLICABLE]
            }
            RecordKind::Lexeme => &[
                "lex",
                "fp",
                "frag",
                "un-lex",
                "for-lex",
                "alpha",
                "acronym",
                "interjection",
                "propernoun",
                "other",
            ],
            RecordKind::NonLex => &["laugh", "breath", "lipsmack", "cough", "sneeze", "other"],
            RecordKind::NonSpeech => &["noise", "music", "other"],
            RecordKind::Filler => &[
                "filled_pause",
                "discourse_marker",
                "explicit_editing_term",
                "other",
            ],
            RecordKind::Edit => &["repetition", "restart", "revision", "simple", "complex", "other"],
            RecordKind::Ip => &["edit", "filler", "edit&filler", "other"],
            RecordKind::Su => &[
                "statement",
                "backchannel",
                "question",
                "incomplete",
                "unannotated",
                "other",
            ],
            RecordKind::Cb => &["coordinating", "clausal", "other"],
            RecordKind::SpkrInfo => &["adult_male", "adult_female", "child", "unknown"],
        }
    }

    /// Whether the begin time may be `<NA>`
    pub fn allows_missing_begin(&self) -> bool {
        matches!(self, RecordKind::SpkrInfo)
    }

    /// Whether the duration may be `<NA>`
    pub fn allows_missing_duration(&self) -> bool {
        matches!(self, RecordKind::SpkrInfo | RecordKind::Ip | RecordKind::Cb)
    }

    /// Whether same-kind spans of this kind must not overlap
    pub fn is_overlap_checked(&self) -> bool {
        !matches!(self, RecordKind::SpkrInfo | RecordKind::Ip | RecordKind::Cb)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown record type '{}'", s))
    }
}

/// Where a record came from, for diagnostics
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Origin {
    pub file: String,
    pub line: usize,
}

impl Origin {
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// One RTTM annotation record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub kind: RecordKind,
    pub source: String,
    pub channel: u8,
    pub speaker: String,
    /// Start time in seconds; `None` only for SPKR-INFO
    pub begin: Option<f64>,
    /// Length in seconds; `None` for SPKR-INFO, IP and CB
    pub duration: Option<f64>,
    pub orthography: Option<String>,
    pub subtype: Option<String>,
    pub confidence: Option<f64>,
    pub origin: Origin,
}

impl Record {
    /// Create a record with only the fields the consistency checks read
    pub fn new(
        kind: RecordKind,
        source: impl Into<String>,
        channel: u8,
        speaker: impl Into<String>,
        begin: f64,
        duration: Option<f64>,
    ) -> Self {
        Self {
            kind,
            source: source.into(),
            channel,
            speaker: speaker.into(),
            begin: Some(begin),
            duration,
            orthography: None,
            subtype: None,
            confidence: None,
            origin: Origin::new("<memory>", 0),
        }
    }

    /// Set the subtype
    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    /// Set the orthography
    pub fn with_orthography(mut self, orthography: impl Into<String>) -> Self {
        self.orthography = Some(orthography.into());
        self
    }

    /// Set the origin tag
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    /// Start time, `0.0` when not applicable
    pub fn start(&self) -> f64 {
        self.begin.unwrap_or(0.0)
    }

    /// `begin + duration`, or `begin` for point-in-time records
    pub fn end(&self) -> f64 {
        match self.duration {
            Some(duration) => self.start() + duration,
            None => self.start(),
        }
    }

    /// Subtype, or `<NA>` when absent
    pub fn subtype_str(&self) -> &str {
        self.subtype.as_deref().unwrap_or(NOT_APPLICABLE)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}, {}]", self.kind, self.start(), self.end())
    }
}
