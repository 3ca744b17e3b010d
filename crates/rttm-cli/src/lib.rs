//! RTTM Validator CLI
//!
//! Command-line front end for [`rttm_core`].
//!
//! ## CLI Usage
//!
//! ```bash
//! # Validate files with every check enabled
//! rttm-validate check dev/*.rttm
//!
//! # Skip SPEAKER coverage, emit JSON, fail on warnings
//! rttm-validate check --no-speaker-coverage --format json --strict sw4019.rttm
//!
//! # List record kinds and their field rules
//! rttm-validate kinds
//! ```

pub mod cli;

pub use cli::{BatchOutput, ExitCode, OutputFormat, ValidateCli, ValidateCommands};

/// Run the CLI application
///
/// This is the main entry point for the CLI binary.
///
/// # Example
///
/// ```rust,no_run
/// use clap::Parser;
/// use rttm_cli::{exit_code_for_parse_error, run_cli, ValidateCli};
///
/// fn main() {
///     let cli = ValidateCli::try_parse().unwrap_or_else(|e| {
///         let _ = e.print();
///         std::process::exit(exit_code_for_parse_error(&e).into());
///     });
///     let exit_code = run_cli(cli);
///     std::process::exit(exit_code.into());
/// }
/// ```
pub fn run_cli(cli: ValidateCli) -> ExitCode {
    match cli::run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from_error(&e)
        }
    }
}

/// Exit code for a command line clap refused to parse
///
/// `--help` and `--version` surface as errors too; they print to stdout and
/// succeed. Everything else is invalid input.
pub fn exit_code_for_parse_error(err: &clap::Error) -> ExitCode {
    if err.use_stderr() {
        ExitCode::InvalidInput
    } else {
        ExitCode::Success
    }
}
