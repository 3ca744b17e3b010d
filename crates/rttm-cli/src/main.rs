//! RTTM Validator CLI
//!
//! # Usage
//!
//! ```bash
//! # Validate RTTM files
//! rttm-validate check a.rttm b.rttm
//!
//! # Use a configuration file and verbose logging
//! rttm-validate -vv check --config rttm.toml a.rttm
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success - all files valid
//! - 1: Validation failed with errors
//! - 2: Validation passed with warnings (`--strict` only)
//! - 3: Invalid input or arguments
//! - 4: File not found or inaccessible
//! - 5: Configuration errors
//! - 10: Internal error

use anyhow::Context;
use clap::Parser;
use rttm_cli::{exit_code_for_parse_error, run_cli, ValidateCli};
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn log_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn init_tracing(cli: &ValidateCli) -> anyhow::Result<()> {
    let filter =
        EnvFilter::from_default_env().add_directive(log_level(cli.verbose, cli.quiet).into());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if cli.log_json {
        builder
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))
            .context("failed to install JSON log subscriber")
    } else {
        builder
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))
            .context("failed to install log subscriber")
    }
}

fn main() {
    // Parse CLI arguments
    let cli = match ValidateCli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(exit_code_for_parse_error(&e).into());
        }
    };

    if let Err(e) = init_tracing(&cli) {
        eprintln!("Warning: {:#}", e);
    }

    // Run the CLI and exit with appropriate code
    let exit_code = run_cli(cli);
    std::process::exit(exit_code.into());
}
