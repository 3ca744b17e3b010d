//! CLI module for the RTTM validator
//!
//! This module provides the command-line interface for checking RTTM files
//! and listing the record kinds the validator understands.

pub mod commands;
pub mod output;

pub use commands::{ValidateCli, ValidateCommands};
pub use output::{BatchOutput, OutputFormat};

use rttm_core::RttmError;

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful execution, all files valid
    Success = 0,
    /// Validation failed with errors
    ValidationError = 1,
    /// Validation passed with warnings (strict mode only)
    ValidationWarning = 2,
    /// Invalid input or arguments
    InvalidInput = 3,
    /// File not found or inaccessible
    FileError = 4,
    /// Configuration file or value rejected
    ConfigError = 5,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    /// Determine exit code from validation result
    pub fn from_validation_result(has_errors: bool, has_warnings: bool, strict: bool) -> Self {
        if has_errors {
            ExitCode::ValidationError
        } else if has_warnings && strict {
            ExitCode::ValidationWarning
        } else {
            ExitCode::Success
        }
    }

    /// Exit code for an error that ended a run early
    pub fn from_error(err: &RttmError) -> Self {
        match err {
            RttmError::InvalidInput(_) => ExitCode::InvalidInput,
            RttmError::FileError(_) => ExitCode::FileError,
            RttmError::ConfigError(_) => ExitCode::ConfigError,
            RttmError::SerializationError(_) | RttmError::InternalError(_) => {
                ExitCode::InternalError
            }
        }
    }

    fn rank(self) -> u8 {
        match self {
            ExitCode::Success => 0,
            ExitCode::ValidationWarning => 1,
            ExitCode::ValidationError => 2,
            ExitCode::InvalidInput => 3,
            ExitCode::FileError => 4,
            ExitCode::ConfigError => 5,
            ExitCode::InternalError => 6,
        }
    }

    /// The more severe of two codes
    pub fn worst(self, other: ExitCode) -> ExitCode {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }
}

/// Run the CLI with the given arguments and return the exit code
pub fn run(cli: ValidateCli) -> Result<ExitCode, RttmError> {
    let quiet = cli.quiet;
    match cli.command {
        ValidateCommands::Check {
            files,
            config,
            format,
            syntax_only,
            strict,
            no_su_coverage,
            no_speaker_coverage,
            no_edit_ip,
            no_filler_ip,
        } => {
            let options = commands::CheckOptions {
                config,
                format: format.unwrap_or_default(),
                syntax_only,
                strict,
                quiet,
                disabled: commands::DisabledChecks {
                    su_coverage: no_su_coverage,
                    speaker_coverage: no_speaker_coverage,
                    edit_ip: no_edit_ip,
                    filler_ip: no_filler_ip,
                },
            };
            commands::execute_check(&files, &options)
        }
        ValidateCommands::Kinds { format } => commands::execute_kinds(format.unwrap_or_default()),
    }
}
