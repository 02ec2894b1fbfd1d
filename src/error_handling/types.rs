//! Error type definitions.
//!
//! This module defines the error types used throughout the application and the
//! `ErrorType` categories counted in the run statistics.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
///
/// These are setup errors: any of them aborts the run before a single
/// domain is checked.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// The input source could not be opened or parsed.
    #[error("Input error for {path}: {message}")]
    InputError {
        /// Input path (`-` for stdin)
        path: String,
        /// Underlying failure
        message: String,
    },

    /// The output destination could not be opened for writing.
    #[error("Output error for {path}: {source}")]
    OutputError {
        /// Output path
        path: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Invalid pool or limiter configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Failure of a single DNS lookup.
///
/// `NoRecords` is separate from `NxDomain`: it means the
/// name exists but carries no record of the queried type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The queried name does not exist.
    #[error("no such domain: {0}")]
    NxDomain(String),

    /// The name exists but has no records of the requested type.
    #[error("no records found for {0}")]
    NoRecords(String),

    /// The resolver gave up waiting for an answer.
    #[error("lookup timed out for {0}")]
    Timeout(String),

    /// The name cannot be queried at all (empty, too long, bad label).
    #[error("invalid domain {domain:?}: {reason}")]
    InvalidDomain {
        /// Domain as submitted
        domain: String,
        /// Why it was rejected
        reason: String,
    },

    /// The shared cancellation token fired while the lookup was in flight.
    #[error("lookup cancelled")]
    Cancelled,

    /// Any other resolver failure (network, SERVFAIL, refused, ...).
    #[error("lookup failed for {domain}: {message}")]
    Resolve {
        /// Queried name
        domain: String,
        /// Resolver message
        message: String,
    },
}

/// Failure of a result sink operation.
#[derive(Error, Debug)]
pub enum SinkError {
    /// The underlying writer rejected the operation.
    #[error("sink I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding or writing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A previous writer panicked while holding the sink lock.
    #[error("sink lock poisoned")]
    Poisoned,
}

/// Errors surfaced by the worker pool itself.
///
/// Per-domain failures never show up here; they live in `CheckResult::error`.
#[derive(Error, Debug)]
pub enum PoolError {
    /// The queue no longer accepts jobs. Carries the rejected domain back.
    #[error("job queue is closed, rejected {0}")]
    Closed(String),

    /// `start` was called on a pool that already ran.
    #[error("worker pool already started")]
    AlreadyStarted,

    /// The terminal flush of the result sink failed.
    #[error("failed to flush results: {0}")]
    Flush(#[source] SinkError),
}

/// Returned by `RateLimiter::wait` when the cancellation token fires first.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("rate limiter wait cancelled")]
pub struct Cancelled;

/// Types of errors that can occur while checking a domain.
///
/// Used as keys for the run statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    DnsMxLookupError,
    DnsNxDomain,
    DnsTimeout,
    InvalidDomain,
    LookupCancelled,
    SinkWriteError,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::DnsMxLookupError => "DNS MX lookup error",
            ErrorType::DnsNxDomain => "DNS no such domain",
            ErrorType::DnsTimeout => "DNS lookup timeout",
            ErrorType::InvalidDomain => "Invalid domain",
            ErrorType::LookupCancelled => "Lookup cancelled",
            ErrorType::SinkWriteError => "Result write error",
        }
    }
}

impl From<&LookupError> for ErrorType {
    fn from(e: &LookupError) -> Self {
        match e {
            LookupError::NxDomain(_) => ErrorType::DnsNxDomain,
            LookupError::Timeout(_) => ErrorType::DnsTimeout,
            LookupError::InvalidDomain { .. } => ErrorType::InvalidDomain,
            LookupError::Cancelled => ErrorType::LookupCancelled,
            LookupError::NoRecords(_) | LookupError::Resolve { .. } => {
                ErrorType::DnsMxLookupError
            }
        }
    }
}
