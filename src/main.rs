//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `mail_dns_check` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use mail_dns_check::initialization::init_logger_with;
use mail_dns_check::{run_check, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run_check(config).await {
        Ok(report) => {
            // The run summary is logged by the library; only point at the results here
            if let Some(path) = &report.output {
                eprintln!("Results saved in {}", path.display());
            }
            if report.cancelled {
                eprintln!("Run ended early; unchecked domains have no result row");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("mail_dns_check error: {:#}", e);
            process::exit(1);
        }
    }
}
