//! RTTM Validator Core
//!
//! Validation of Rich Transcription Time-Marked (RTTM) annotation files,
//! used as a correctness gate before files reach scoring pipelines.
//!
//! ## Architecture
//!
//! 1. **Parser** (`parser`): splits lines into the nine RTTM fields and runs
//!    field-level syntax checks.
//!
//! 2. **Partitions** (`partition`): groups records by
//!    `(source, channel, speaker)` and then by kind. No check ever compares
//!    records from different partitions.
//!
//! 3. **Checks** (`checks`): overlap, content, partial coverage, coverage and
//!    the interruption-point adjacency protocol, all built on the tolerant
//!    comparisons in `tolerance`.
//!
//! 4. **Engine** (`engine`): runs the checks in two phases. Structural
//!    failures stop the run; coverage and IP findings are aggregated.
//!
//! ## Example
//!
//! ```rust
//! use rttm_core::{RttmValidator, ValidatorConfig};
//!
//! let text = "\
//! SPEAKER f 1 0.00 2.00 <NA> <NA> A <NA>
//! SU f 1 0.00 2.00 <NA> statement A <NA>
//! LEXEME f 1 0.50 1.00 hello lex A <NA>
//! ";
//!
//! let validator = RttmValidator::new(&ValidatorConfig::default()).unwrap();
//! let report = validator.validate_source(text, "example.rttm");
//! assert!(report.valid);
//! ```

pub mod checks;
pub mod config;
pub mod diagnostic;
pub mod engine;
pub mod error;
pub mod ordering;
pub mod parser;
pub mod partition;
pub mod record;
pub mod report;
pub mod tolerance;
pub mod validator;

pub use checks::ConsistencyCheck;
pub use config::{CheckSelection, ValidatorConfig};
pub use diagnostic::{CheckFamily, Diagnostic, Severity};
pub use engine::{ConsistencyEngine, EngineOutcome};
pub use error::{Result, RttmError};
pub use parser::{parse_line, parse_source, ParsedFile};
pub use partition::{Partition, PartitionIndex, PartitionKey};
pub use record::{Origin, Record, RecordKind, NOT_APPLICABLE};
pub use report::{ReportStats, ValidationReport};
pub use tolerance::{Tolerance, DEFAULT_EPSILON};
pub use validator::RttmValidator;
