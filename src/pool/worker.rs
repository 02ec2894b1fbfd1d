//! The per-worker loop: dequeue, rate-gate, check, write.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;

use crate::checker::DomainChecker;
use crate::dns::DnsLookup;
use crate::error_handling::{ErrorType, ProcessingStats, SinkError};
use crate::export::ResultSink;
use crate::initialization::RateLimiter;
use crate::models::CheckResult;

/// How a worker stopped. Both are normal terminations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerExit {
    /// The queue was closed and empty.
    Drained,
    /// The cancellation token fired.
    Cancelled,
}

/// Counters shared by all workers of a pool.
#[derive(Default)]
pub(crate) struct PoolCounters {
    pub(crate) written: Arc<AtomicUsize>,
    pub(crate) write_failures: AtomicUsize,
    pub(crate) failed_checks: AtomicUsize,
    pub(crate) abandoned: AtomicUsize,
    /// Jobs dequeued but not yet written, failed or abandoned.
    pub(crate) in_flight: AtomicUsize,
}

pub(crate) type SharedReceiver = Arc<Mutex<mpsc::Receiver<String>>>;

pub(crate) struct Worker<L> {
    pub(crate) id: usize,
    pub(crate) receiver: SharedReceiver,
    pub(crate) checker: Arc<DomainChecker<L>>,
    pub(crate) limiter: Option<Arc<RateLimiter>>,
    pub(crate) sink: Arc<dyn ResultSink>,
    pub(crate) counters: Arc<PoolCounters>,
    pub(crate) stats: Arc<ProcessingStats>,
}

impl<L: DnsLookup> Worker<L> {
    pub(crate) async fn run(self, cancel: CancellationToken) -> WorkerExit {
        loop {
            let job = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("Worker {} cancelled while idle", self.id);
                    return WorkerExit::Cancelled;
                }
                job = next_job(&self.receiver) => job,
            };

            let Some(domain) = job else {
                debug!("Worker {} drained the queue", self.id);
                return WorkerExit::Drained;
            };
            // Stays counted if this task panics before finishing the job
            self.counters.in_flight.fetch_add(1, Ordering::SeqCst);

            if !self.rate_gate(&cancel).await {
                self.counters.abandoned.fetch_add(1, Ordering::Relaxed);
                self.counters.in_flight.fetch_sub(1, Ordering::SeqCst);
                debug!("Worker {} abandoned {domain} at the rate gate", self.id);
                return WorkerExit::Cancelled;
            }

            let result = self.checker.check_domain(&cancel, &domain).await;
            if result.is_error() {
                self.counters.failed_checks.fetch_add(1, Ordering::Relaxed);
            }

            match write_result(Arc::clone(&self.sink), result).await {
                Ok(()) => {
                    self.counters.written.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    self.counters.write_failures.fetch_add(1, Ordering::Relaxed);
                    self.stats.increment_error(ErrorType::SinkWriteError);
                    warn!("Failed to write result for {domain}: {e}");
                }
            }
            self.counters.in_flight.fetch_sub(1, Ordering::SeqCst);
        }
    }

    /// Waits for permission to run a check. False means cancelled.
    async fn rate_gate(&self, cancel: &CancellationToken) -> bool {
        match &self.limiter {
            Some(limiter) => limiter.wait(cancel).await.is_ok(),
            None => !cancel.is_cancelled(),
        }
    }
}

/// Writes one result on the blocking pool so a slow file or a stalled stdout
/// pipe never holds a runtime thread.
pub(crate) async fn write_result(
    sink: Arc<dyn ResultSink>,
    result: CheckResult,
) -> Result<(), SinkError> {
    tokio::task::spawn_blocking(move || sink.write(&result))
        .await
        .unwrap_or_else(|e| Err(SinkError::Io(io::Error::other(e.to_string()))))
}

/// Flushes the sink on the blocking pool.
pub(crate) async fn flush_sink(sink: Arc<dyn ResultSink>) -> Result<(), SinkError> {
    tokio::task::spawn_blocking(move || sink.flush())
        .await
        .unwrap_or_else(|e| Err(SinkError::Io(io::Error::other(e.to_string()))))
}

async fn next_job(receiver: &Mutex<mpsc::Receiver<String>>) -> Option<String> {
    receiver.lock().await.recv().await
}
