//! Main application modules.
//!
//! This module provides input reading, progress logging, shutdown handling,
//! and statistics printing used by the main application.

pub mod input;
pub mod logging;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use input::{parse_domains, read_domains};
pub use logging::spawn_progress_logger;
pub use shutdown::{shutdown_gracefully, spawn_shutdown_watcher};
pub use statistics::{print_error_statistics, print_simple_summary};
