//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources of a run:
//! - Logger
//! - DNS resolver
//! - Rate limiter

mod logger;
mod rate_limiter;
mod resolver;

// Re-export public API
pub use logger::init_logger_with;
pub use rate_limiter::{init_rate_limiter, RateLimiter};
pub use resolver::init_resolver;
