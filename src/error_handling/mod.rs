//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions for setup, lookups, sinks and the worker pool
//! - Processing statistics tracking per error category
//!
//! Only setup errors are fatal to a run. Lookup errors stay inside the
//! result of the domain that caused them.

mod stats;
mod types;

// Re-export public API
pub use stats::ProcessingStats;
pub use types::{
    Cancelled, ErrorType, InitializationError, LookupError, PoolError, SinkError,
};
