//! RTTM line parsing and field-level syntax checks
//!
//! Each non-comment line is split into the nine fields
//! `type file chnl tbeg tdur ortho stype name conf`. A record is produced
//! only when every field passes its syntax rule; failures become `syntax`
//! diagnostics and the line is dropped.

use regex::Regex;
use std::sync::OnceLock;

use crate::diagnostic::{CheckFamily, Diagnostic};
use crate::record::{Origin, Record, RecordKind, NOT_APPLICABLE};

/// Number of fields in an RTTM line
pub const FIELD_COUNT: usize = 9;

/// Lines starting with this prefix are comments
pub const COMMENT_PREFIX: &str = ";;";

fn number_pattern() -> Option<&'static Regex> {
    static NUMBER: OnceLock<Option<Regex>> = OnceLock::new();
    NUMBER
        .get_or_init(|| Regex::new(r"^[-+]?(\d+\.?\d*|\.\d+)([eE][-+]?\d+)?$").ok())
        .as_ref()
}

/// Records and syntax findings of one RTTM source
#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
    pub records: Vec<Record>,
    pub diagnostics: Vec<Diagnostic>,
    /// Lines read, comments included
    pub lines: usize,
}

impl ParsedFile {
    pub fn has_syntax_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Parse a whole RTTM document
pub fn parse_source(text: &str, file_name: &str) -> ParsedFile {
    let mut parsed = ParsedFile::default();
    for (n, line) in text.lines().enumerate() {
        parsed.lines += 1;
        let origin = Origin::new(file_name, n + 1);
        if let Some(record) = parse_line(line, &origin, &mut parsed.diagnostics) {
            parsed.records.push(record);
        }
    }
    tracing::debug!(
        file = file_name,
        lines = parsed.lines,
        records = parsed.records.len(),
        findings = parsed.diagnostics.len(),
        "Parsed RTTM source"
    );
    parsed
}

/// Parse one line, pushing any syntax findings into `out`
///
/// Returns `None` for comments, blank lines and lines with syntax errors.
pub fn parse_line(line: &str, origin: &Origin, out: &mut Vec<Diagnostic>) -> Option<Record> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
        return None;
    }

    let fields: Vec<&str> = trimmed.split_ascii_whitespace().collect();
    if fields.len() < FIELD_COUNT {
        out.push(syntax_error(
            format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
            origin,
        ));
        return None;
    }
    if fields.len() > FIELD_COUNT {
        out.push(Diagnostic::warning(
            CheckFamily::Syntax,
            format!(
                "{} field(s) after the confidence field ignored",
                fields.len() - FIELD_COUNT
            ),
            origin,
        ));
    }

    let kind: RecordKind = match fields[0].parse() {
        Ok(kind) => kind,
        Err(e) => {
            out.push(syntax_error(e, origin));
            return None;
        }
    };

    let errors_before = out.iter().filter(|d| d.is_error()).count();

    let channel = parse_channel(fields[2], origin, out);
    let begin = parse_time(kind, "begin time", fields[3], kind.allows_missing_begin(), origin, out);
    let duration = parse_time(kind, "duration", fields[4], kind.allows_missing_duration(), origin, out);
    let orthography = optional(fields[5]);
    if kind == RecordKind::Lexeme && orthography.is_none() {
        out.push(syntax_error("LEXEME requires an orthography", origin));
    }
    let subtype = fields[6];
    if !kind.subtypes().contains(&subtype) {
        out.push(syntax_error(
            format!(
                "subtype '{}' is not valid for {} (expected one of: {})",
                subtype,
                kind,
                kind.subtypes().join(", ")
            ),
            origin,
        ));
    }
    let confidence = parse_confidence(fields[8], origin, out);

    if out.iter().filter(|d| d.is_error()).count() > errors_before {
        return None;
    }

    Some(Record {
        kind,
        source: fields[1].to_string(),
        channel: channel?,
        speaker: fields[7].to_string(),
        begin: begin?,
        duration: duration?,
        orthography,
        subtype: optional(subtype),
        confidence: confidence?,
        origin: origin.clone(),
    })
}

fn syntax_error(message: impl Into<String>, origin: &Origin) -> Diagnostic {
    Diagnostic::error(CheckFamily::Syntax, message, origin)
}

fn optional(field: &str) -> Option<String> {
    (field != NOT_APPLICABLE).then(|| field.to_string())
}

fn parse_number(field: &str) -> Option<f64> {
    if !number_pattern().is_some_and(|re| re.is_match(field)) {
        return None;
    }
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_channel(field: &str, origin: &Origin, out: &mut Vec<Diagnostic>) -> Option<u8> {
    match field {
        "1" => Some(1),
        "2" => Some(2),
        _ => {
            out.push(syntax_error(
                format!("channel must be 1 or 2, found '{}'", field),
                origin,
            ));
            None
        }
    }
}

/// Outer `None` means the field was rejected
fn parse_time(
    kind: RecordKind,
    label: &str,
    field: &str,
    allow_missing: bool,
    origin: &Origin,
    out: &mut Vec<Diagnostic>,
) -> Option<Option<f64>> {
    if field == NOT_APPLICABLE {
        if allow_missing {
            return Some(None);
        }
        out.push(syntax_error(
            format!("{} may not be {} for {}", label, NOT_APPLICABLE, kind),
            origin,
        ));
        return None;
    }

    match parse_number(field) {
        Some(value) if value >= 0.0 => Some(Some(value)),
        Some(value) => {
            out.push(syntax_error(
                format!("{} must not be negative, found {}", label, value),
                origin,
            ));
            None
        }
        None => {
            out.push(syntax_error(
                format!("{} '{}' is not a number", label, field),
                origin,
            ));
            None
        }
    }
}

fn parse_confidence(field: &str, origin: &Origin, out: &mut Vec<Diagnostic>) -> Option<Option<f64>> {
    if field == NOT_APPLICABLE {
        return Some(None);
    }
    match parse_number(field) {
        Some(value) if (0.0..=1.0).contains(&value) => Some(Some(value)),
        _ => {
            out.push(syntax_error(
                format!("confidence must be {} or a number in [0, 1], found '{}'", NOT_APPLICABLE, field),
                origin,
            ));
            None
        }
    }
}
