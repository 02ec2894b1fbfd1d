//! mail_dns_check library: bulk MX, SPF and DMARC checks
//!
//! This library reads a list of domains, checks each one for mail-exchange
//! records and for SPF and DMARC policies published in TXT records, and writes
//! one result per domain to CSV or JSON lines. Checks run on a fixed pool of
//! workers behind a shared token-bucket rate limiter, and the whole run can be
//! cut short by a deadline or Ctrl-C.
//!
//! # Example
//!
//! ```no_run
//! use mail_dns_check::{Config, run_check};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     file: std::path::PathBuf::from("domains.csv"),
//!     workers: 20,
//!     rate_limit_rps: 50,
//!     output: Some("results.csv".into()),
//!     ..Default::default()
//! };
//!
//! let report = run_check(config).await?;
//! println!("Checked {} of {} domains, {} with errors",
//!          report.written, report.total_domains, report.lookup_errors);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
pub mod checker;
pub mod config;
pub mod dns;
mod domain;
mod error_handling;
pub mod export;
pub mod initialization;
mod models;
pub mod pool;

// Re-export public API
pub use app::{parse_domains, read_domains};
pub use checker::DomainChecker;
pub use config::{Config, LogFormat, LogLevel, OutputFormat};
pub use dns::{DnsLookup, HickoryLookup};
pub use domain::{extract_domain, validate_domain};
pub use error_handling::{
    Cancelled, ErrorType, InitializationError, LookupError, PoolError, ProcessingStats, SinkError,
};
pub use models::CheckResult;
pub use pool::{PoolReport, WorkerExit, WorkerPool};
pub use run::{run_check, run_check_with, CheckReport};

// Internal run module (wires input, pool and output together)
mod run {
    use anyhow::{Context, Result};
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Instant;

    use log::{debug, info};
    use tokio_util::sync::CancellationToken;

    use crate::app::{
        print_error_statistics, print_simple_summary, read_domains, shutdown_gracefully,
        spawn_shutdown_watcher,
    };
    use crate::checker::DomainChecker;
    use crate::config::Config;
    use crate::dns::{DnsLookup, HickoryLookup};
    use crate::error_handling::ProcessingStats;
    use crate::export::open_sink;
    use crate::initialization::{init_rate_limiter, init_resolver};
    use crate::pool::WorkerPool;

    /// Results of a check run.
    #[derive(Debug, Clone)]
    pub struct CheckReport {
        /// Domains read from the input
        pub total_domains: usize,
        /// Results written to the output
        pub written: usize,
        /// Written results that carry an error
        pub lookup_errors: usize,
        /// Results the output refused
        pub write_failures: usize,
        /// Domains never checked because the run was cut short
        pub not_checked: usize,
        /// Output file, `None` for stdout
        pub output: Option<PathBuf>,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
        /// Whether the deadline or Ctrl-C ended the run early
        pub cancelled: bool,
    }

    /// Runs a check with the provided configuration against live DNS.
    ///
    /// Reads every domain from `config.file`, checks them on a worker pool and
    /// writes the results to `config.output` (stdout when unset).
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The input cannot be read or is not valid CSV
    /// - The output cannot be created
    /// - The pool configuration is invalid
    /// - The final flush of the output fails
    ///
    /// Per-domain DNS failures are not errors; they are reported in each
    /// result's `error` field.
    pub async fn run_check(config: Config) -> Result<CheckReport> {
        let resolver = init_resolver(config.dns_timeout_seconds);
        run_check_with(config, HickoryLookup::new(resolver)).await
    }

    /// Same as [`run_check`], with a caller-supplied DNS source.
    pub async fn run_check_with<L>(config: Config, lookup: L) -> Result<CheckReport>
    where
        L: DnsLookup + 'static,
    {
        let domains = read_domains(&config.file).context("Failed to read input domains")?;
        let total_domains = domains.len();
        info!("Total domains in input: {}", total_domains);

        let sink = open_sink(config.output.as_deref(), config.format)
            .context("Failed to open output")?;

        let error_stats = Arc::new(ProcessingStats::new());
        let checker =
            Arc::new(DomainChecker::new(lookup).with_stats(Arc::clone(&error_stats)));
        let limiter = init_rate_limiter(config.rate_limit_rps, config.effective_burst());
        if limiter.is_none() {
            info!("Rate limiting disabled");
        }

        let pool = WorkerPool::new(
            config.workers,
            config.queue_capacity,
            checker,
            limiter,
            sink,
        )
        .context("Invalid worker pool configuration")?
        .with_stats(Arc::clone(&error_stats));

        let start_time = Instant::now();
        let cancel = CancellationToken::new();
        let watcher = spawn_shutdown_watcher(cancel.clone(), config.deadline());

        let producer = async {
            let mut fed = 0usize;
            for domain in domains {
                if let Err(e) = pool.add_job(domain).await {
                    debug!("Stopped feeding jobs: {e}");
                    break;
                }
                fed += 1;
            }
            pool.close();
            fed
        };
        let (fed, outcome) = tokio::join!(producer, pool.start(&cancel));

        let reason = shutdown_gracefully(cancel, watcher).await;
        let report = outcome.context("Failed to finish the check run")?;
        let elapsed_seconds = start_time.elapsed().as_secs_f64();

        print_error_statistics(&error_stats);
        print_simple_summary(total_domains, &report, elapsed_seconds);

        // Jobs lost to a panicking worker count as not checked too
        let not_checked =
            report.abandoned + report.unprocessed + report.lost + (total_domains - fed);

        Ok(CheckReport {
            total_domains,
            written: report.written,
            lookup_errors: report.failed_checks,
            write_failures: report.write_failures,
            not_checked,
            output: config.output,
            elapsed_seconds,
            cancelled: reason.is_some(),
        })
    }
}
