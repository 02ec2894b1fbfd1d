//! End-of-run statistics.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, ProcessingStats};
use crate::pool::PoolReport;

/// Prints the error counts by type to the log.
pub fn print_error_statistics(error_stats: &ProcessingStats) {
    let total_errors = error_stats.total_errors();
    if total_errors == 0 {
        return;
    }

    info!("Error Counts ({} total):", total_errors);
    for error_type in ErrorType::iter() {
        let count = error_stats.get_error_count(error_type);
        if count > 0 {
            info!("   {}: {}", error_type.as_str(), count);
        }
    }
}

/// Prints a one-line summary of the run.
pub fn print_simple_summary(total_domains: usize, report: &PoolReport, elapsed_seconds: f64) {
    let checked = report.written + report.write_failures;
    info!(
        "✅ Checked {} of {} domain{} ({} with errors, {} not checked) in {:.1}s",
        checked,
        total_domains,
        if total_domains == 1 { "" } else { "s" },
        report.failed_checks,
        total_domains.saturating_sub(checked),
        elapsed_seconds
    );
}
