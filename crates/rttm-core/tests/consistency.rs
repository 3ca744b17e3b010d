//! Integration tests for RTTM consistency validation
//!
//! Exercises the full path from RTTM text to report:
//! - Overlap and boundary tolerance
//! - Content and partial-coverage failures stopping the run
//! - Coverage switches
//! - EDIT/FILLER interruption-point scenarios
//! - Determinism across runs and input orderings

use rttm_core::{CheckFamily, CheckSelection, RttmValidator, ValidationReport, ValidatorConfig};
use std::io::Write;

fn validate(text: &str) -> ValidationReport {
    validate_with(text, ValidatorConfig::default())
}

fn validate_with(text: &str, config: ValidatorConfig) -> ValidationReport {
    RttmValidator::new(&config)
        .unwrap()
        .validate_source(text, "test.rttm")
}

fn families(report: &ValidationReport) -> Vec<CheckFamily> {
    report.diagnostics.iter().map(|d| d.family).collect()
}

const DISFLUENT: &str = "\
;; one speaker, one sentence with an edit followed by a filler
SPKR-INFO sw01 1 <NA> <NA> <NA> adult_female A <NA>
SPEAKER sw01 1 0.000 10.000 <NA> <NA> A <NA>
SU sw01 1 0.000 10.000 <NA> statement A <NA>
LEXEME sw01 1 0.500 1.000 i lex A 0.98
EDIT sw01 1 2.000 2.000 <NA> repetition A <NA>
LEXEME sw01 1 2.000 2.000 i lex A 0.97
IP sw01 1 4.000 <NA> <NA> edit&filler A <NA>
FILLER sw01 1 4.000 1.000 <NA> filled_pause A <NA>
LEXEME sw01 1 4.000 1.000 uh fp A 0.50
LEXEME sw01 1 5.000 2.000 think lex A 0.99
";

#[test]
fn test_disfluent_sentence_is_valid() {
    let report = validate(DISFLUENT);
    assert!(report.valid, "{:?}", report.diagnostics);
    assert!(report.logic_checked);
    assert_eq!(report.stats.records, 10);
    assert_eq!(report.stats.partitions, 1);
}

#[test]
fn test_input_order_does_not_matter() {
    let mut lines: Vec<&str> = DISFLUENT.lines().collect();
    lines.reverse();
    let reversed = lines.join("\n");
    let report = validate(&reversed);
    assert!(report.valid, "{:?}", report.diagnostics);
}

#[test]
fn test_overlap_boundary_tolerance() {
    let within = "\
SU f 1 0.0000 2.0000 <NA> statement A <NA>
SU f 1 1.9995 1.0000 <NA> statement A <NA>
LEXEME f 1 0.0000 1.0000 a lex A <NA>
LEXEME f 1 2.5000 0.4000 b lex A <NA>
";
    let config = ValidatorConfig::default().with_checks(CheckSelection {
        speaker_coverage: false,
        ..CheckSelection::default()
    });
    let report = validate_with(within, config.clone());
    assert!(report.valid, "{:?}", report.diagnostics);

    let beyond = within.replace("1.9995", "1.9980");
    let report = validate_with(&beyond, config);
    assert_eq!(families(&report), vec![CheckFamily::Overlap]);
    assert_eq!(report.stopped_at, Some(CheckFamily::Overlap));
}

#[test]
fn test_overlap_findings_ignore_line_order() {
    let long = "NON-SPEECH f 1 0.0 5.0 <NA> noise A <NA>";
    let short = "NON-SPEECH f 1 0.0 1.0 <NA> noise A <NA>";
    let later = "NON-SPEECH f 1 2.0 1.0 <NA> music A <NA>";

    let first = validate(&[long, short, later].join("\n"));
    let second = validate(&[short, later, long].join("\n"));

    let messages = |report: &ValidationReport| -> Vec<String> {
        report.diagnostics.iter().map(|d| d.message.clone()).collect()
    };
    assert_eq!(families(&first), vec![CheckFamily::Overlap; 2]);
    assert_eq!(messages(&first), messages(&second));
}

#[test]
fn test_empty_su_stops_before_coverage() {
    let text = "\
SU f 1 0.0 1.0 <NA> statement A <NA>
SU f 1 1.0 1.0 <NA> question A <NA>
LEXEME f 1 0.2 0.5 hi lex A <NA>
";
    let report = validate(text);
    assert!(!report.valid);
    // Speaker coverage would also fail, but never runs.
    assert_eq!(families(&report), vec![CheckFamily::Content]);
    assert_eq!(report.checks_run, vec!["overlap", "content"]);
}

#[test]
fn test_word_crossing_su_boundary() {
    let text = "\
SPEAKER f 1 0.0 4.0 <NA> <NA> A <NA>
SU f 1 0.0 2.0 <NA> statement A <NA>
SU f 1 2.0 2.0 <NA> statement A <NA>
LEXEME f 1 0.5 0.5 one lex A <NA>
LEXEME f 1 1.5 1.0 two lex A <NA>
LEXEME f 1 3.0 0.5 three lex A <NA>
";
    let report = validate(text);
    assert_eq!(
        families(&report),
        vec![CheckFamily::PartialCoverage, CheckFamily::PartialCoverage]
    );
    assert!(report.diagnostics.iter().all(|d| d.origin.line == 5));
}

#[test]
fn test_speaker_coverage_switch() {
    let text = "\
SU f 1 0.0 2.0 <NA> statement A <NA>
LEXEME f 1 0.5 0.5 one lex A <NA>
";
    let report = validate(text);
    assert_eq!(families(&report), vec![CheckFamily::Coverage]);
    assert!(report.diagnostics[0].message.contains("SPEAKER"));

    let config = ValidatorConfig::default().with_checks(CheckSelection {
        speaker_coverage: false,
        ..CheckSelection::default()
    });
    assert!(validate_with(text, config).valid);
}

#[test]
fn test_edit_ip_subtypes() {
    let template = "\
SPEAKER f 1 0.0 10.0 <NA> <NA> A <NA>
SU f 1 0.0 10.0 <NA> statement A <NA>
EDIT f 1 2.0 2.0 <NA> revision A <NA>
LEXEME f 1 2.0 2.0 went lex A <NA>
IP f 1 4.0 <NA> <NA> SUBTYPE A <NA>
LEXEME f 1 4.0 1.0 go lex A <NA>
";
    assert!(validate(&template.replace("SUBTYPE", "edit")).valid);

    let report = validate(&template.replace("SUBTYPE", "other"));
    assert_eq!(families(&report), vec![CheckFamily::Adjacency]);

    let no_ip = template.replace("IP f 1 4.0", "IP f 1 6.0");
    let report = validate(&no_ip.replace("SUBTYPE", "edit"));
    assert_eq!(families(&report), vec![CheckFamily::Adjacency]);

    let config = ValidatorConfig::default().with_checks(CheckSelection {
        edit_ip: false,
        ..CheckSelection::default()
    });
    assert!(validate_with(&template.replace("SUBTYPE", "other"), config).valid);
}

#[test]
fn test_filler_without_ip() {
    let text = "\
SPEAKER f 1 0.0 10.0 <NA> <NA> A <NA>
SU f 1 0.0 10.0 <NA> statement A <NA>
FILLER f 1 3.0 1.0 <NA> filled_pause A <NA>
LEXEME f 1 3.0 1.0 um fp A <NA>
";
    let report = validate(text);
    assert_eq!(families(&report), vec![CheckFamily::Adjacency]);

    let config = ValidatorConfig::default().with_checks(CheckSelection {
        filler_ip: false,
        ..CheckSelection::default()
    });
    assert!(validate_with(text, config).valid);
}

#[test]
fn test_speakers_are_independent() {
    let text = "\
SPEAKER f 1 0.0 5.0 <NA> <NA> A <NA>
SU f 1 0.0 5.0 <NA> statement A <NA>
LEXEME f 1 0.0 5.0 long lex A <NA>
SPEAKER f 1 1.0 2.0 <NA> <NA> B <NA>
SU f 1 1.0 2.0 <NA> backchannel B <NA>
LEXEME f 1 1.0 2.0 yeah lex B <NA>
";
    let report = validate(text);
    assert!(report.valid, "{:?}", report.diagnostics);
    assert_eq!(report.stats.partitions, 2);
}

#[test]
fn test_repeated_runs_are_identical() {
    let text = DISFLUENT.replace("edit&filler", "filler");
    let first = validate(&text);
    let second = validate(&text);
    assert!(!first.valid);
    assert_eq!(first.diagnostics, second.diagnostics);
    assert_eq!(first.input_digest, second.input_digest);
}

#[test]
fn test_validate_file_from_disk() {
    let mut file = tempfile::Builder::new().suffix(".rttm").tempfile().unwrap();
    file.write_all(DISFLUENT.as_bytes()).unwrap();

    let validator = RttmValidator::new(&ValidatorConfig::default()).unwrap();
    let report = validator.validate_file(file.path()).unwrap();
    assert!(report.valid);
    assert_eq!(report.file, file.path().display().to_string());
}

#[test]
fn test_missing_file_is_an_error() {
    let validator = RttmValidator::new(&ValidatorConfig::default()).unwrap();
    let err = validator
        .validate_file(std::path::Path::new("/nonexistent/file.rttm"))
        .unwrap_err();
    assert!(err.is_user_error());
}
