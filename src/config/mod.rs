//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (defaults, DNS limits, record prefixes)
//! - The `Config` struct, which doubles as the CLI parser

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, OutputFormat};
