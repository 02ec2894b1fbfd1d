//! Progress logging utilities.

use log::info;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Logs how many domains have been checked so far and the running rate.
///
/// # Arguments
///
/// * `start_time` - The start time of processing
/// * `completed` - Counter of results handed to the sink
pub fn log_progress(start_time: Instant, completed: &AtomicUsize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let completed = completed.load(Ordering::SeqCst);
    info!(
        "Checked {} domains in {:.2} seconds (~{:.2} domains/sec)",
        completed,
        elapsed_secs,
        progress_rate(completed, elapsed_secs)
    );
}

fn progress_rate(completed: usize, elapsed_secs: f64) -> f64 {
    if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    }
}

/// Spawns a task that calls `log_progress` every `interval` until `stop` fires.
pub fn spawn_progress_logger<C>(
    start_time: Instant,
    completed: C,
    interval: Duration,
    stop: CancellationToken,
) -> JoinHandle<()>
where
    C: AsRef<AtomicUsize> + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = stop.cancelled() => break,
                _ = ticker.tick() => log_progress(start_time, completed.as_ref()),
            }
        }
    })
}
