//! Configuration types and CLI options.
//!
//! `Config` is both the library configuration and the `clap` parser for the
//! binary, so the two can never drift apart.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_QUEUE_CAPACITY, DEFAULT_RATE_LIMIT_RPS, DEFAULT_TIMEOUT_SECS, DEFAULT_WORKERS,
    DNS_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Result output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Comma-separated values with a header row
    Csv,
    /// One JSON object per line
    Jsonl,
}

/// Run configuration.
///
/// Can be built programmatically (see `Default`) or parsed from the command
/// line.
///
/// # Examples
///
/// ```no_run
/// use mail_dns_check::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     file: PathBuf::from("domains.csv"),
///     workers: 20,
///     rate_limit_rps: 50,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mail_dns_check",
    version,
    about = "Checks a list of domains for MX, SPF and DMARC records."
)]
pub struct Config {
    /// CSV file to read domains from (first column), or `-` for stdin
    #[arg(value_parser)]
    pub file: PathBuf,

    /// Number of concurrent workers
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Capacity of the job queue between the reader and the workers
    #[arg(long, default_value_t = DEFAULT_QUEUE_CAPACITY)]
    pub queue_capacity: usize,

    /// Domains checked per second across all workers (0 disables limiting)
    #[arg(long, default_value_t = DEFAULT_RATE_LIMIT_RPS)]
    pub rate_limit_rps: u32,

    /// Rate limit burst capacity (tokens)
    ///
    /// If 0, calculated as `min(workers, rate_limit_rps * 2)`.
    #[arg(long, default_value_t = 0)]
    pub rate_burst: usize,

    /// Overall run deadline in seconds (0 means no deadline)
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Per-query DNS timeout in seconds
    #[arg(long, default_value_t = DNS_TIMEOUT_SECS)]
    pub dns_timeout_seconds: u64,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format: csv|jsonl
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Config {
    /// Burst capacity actually used by the rate limiter.
    pub fn effective_burst(&self) -> usize {
        if self.rate_burst > 0 {
            self.rate_burst
        } else {
            let rps_doubled = self.rate_limit_rps.saturating_mul(2) as usize;
            std::cmp::min(self.workers, rps_doubled).max(1)
        }
    }

    /// Overall deadline, if one is configured.
    pub fn deadline(&self) -> Option<Duration> {
        (self.timeout_seconds > 0).then(|| Duration::from_secs(self.timeout_seconds))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from("domains.csv"),
            workers: DEFAULT_WORKERS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            rate_limit_rps: DEFAULT_RATE_LIMIT_RPS,
            rate_burst: 0,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            dns_timeout_seconds: DNS_TIMEOUT_SECS,
            output: None,
            format: OutputFormat::Csv,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
