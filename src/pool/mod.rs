//! Bounded, rate-limited, cancellable worker pool.
//!
//! Producers feed domains through `add_job`; `start` runs a fixed number of
//! workers that each dequeue a domain, wait on the shared `RateLimiter`, check
//! it and hand the result to the shared `ResultSink`. Once every worker has
//! stopped the sink is flushed exactly once.

mod worker;


use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use futures::future::join_all;
use log::{debug, error, info};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::app::spawn_progress_logger;
use crate::checker::DomainChecker;
use crate::config::LOGGING_INTERVAL;
use crate::dns::DnsLookup;
use crate::error_handling::{InitializationError, PoolError, ProcessingStats};
use crate::export::ResultSink;
use crate::initialization::RateLimiter;

use worker::{flush_sink, PoolCounters, SharedReceiver, Worker};
pub use worker::WorkerExit;

/// What happened during one `start` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoolReport {
    /// Results accepted by the sink.
    pub written: usize,
    /// Results the sink refused.
    pub write_failures: usize,
    /// Results that carry an error.
    pub failed_checks: usize,
    /// Jobs dequeued but dropped at the rate gate because of cancellation.
    pub abandoned: usize,
    /// Jobs still queued when the workers stopped.
    pub unprocessed: usize,
    /// Jobs held by a worker task when it panicked.
    pub lost: usize,
    /// Workers that stopped because the queue was closed and empty.
    pub drained_workers: usize,
    /// Workers that stopped because the cancellation token fired.
    pub cancelled_workers: usize,
    /// Worker tasks that panicked.
    pub failed_workers: usize,
    /// Time from `start` until the workers stopped and leftovers were counted.
    pub elapsed: Duration,
}

/// A fixed-size pool of domain-check workers fed by a bounded queue.
pub struct WorkerPool<L> {
    workers: usize,
    sender: Mutex<Option<mpsc::Sender<String>>>,
    receiver: SharedReceiver,
    checker: Arc<DomainChecker<L>>,
    limiter: Option<Arc<RateLimiter>>,
    sink: Arc<dyn ResultSink>,
    stats: Arc<ProcessingStats>,
    counters: Arc<PoolCounters>,
    started: AtomicBool,
}

impl<L: DnsLookup + 'static> WorkerPool<L> {
    /// Creates a pool with `workers` workers and a queue of `queue_capacity`.
    ///
    /// `limiter` is shared by all workers; `None` disables rate limiting.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::ConfigError` if either size is zero.
    pub fn new(
        workers: usize,
        queue_capacity: usize,
        checker: Arc<DomainChecker<L>>,
        limiter: Option<Arc<RateLimiter>>,
        sink: Arc<dyn ResultSink>,
    ) -> Result<Self, InitializationError> {
        if workers == 0 {
            return Err(InitializationError::ConfigError(
                "worker count must be at least 1".to_string(),
            ));
        }
        if queue_capacity == 0 {
            return Err(InitializationError::ConfigError(
                "queue capacity must be at least 1".to_string(),
            ));
        }

        let (sender, receiver) = mpsc::channel(queue_capacity);
        Ok(Self {
            workers,
            sender: Mutex::new(Some(sender)),
            receiver: Arc::new(tokio::sync::Mutex::new(receiver)),
            checker,
            limiter,
            sink,
            stats: Arc::new(ProcessingStats::new()),
            counters: Arc::new(PoolCounters::default()),
            started: AtomicBool::new(false),
        })
    }

    /// Counts sink write failures in `stats` instead of a private counter set.
    pub fn with_stats(mut self, stats: Arc<ProcessingStats>) -> Self {
        self.stats = stats;
        self
    }

    /// Enqueues one domain, waiting while the queue is full.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Closed` with the domain if the pool was closed or
    /// has already finished.
    pub async fn add_job(&self, domain: impl Into<String>) -> Result<(), PoolError> {
        let domain = domain.into();
        let Some(sender) = self.current_sender() else {
            return Err(PoolError::Closed(domain));
        };
        sender
            .send(domain)
            .await
            .map_err(|rejected| PoolError::Closed(rejected.0))
    }

    /// Stops accepting jobs. Workers drain what is queued, then exit.
    ///
    /// Calling it more than once has no further effect.
    pub fn close(&self) {
        let mut sender = self
            .sender
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if sender.take().is_some() {
            debug!("Job queue closed");
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Runs the workers until the queue drains or `cancel` fires.
    ///
    /// Afterwards the queue is closed for good, leftover jobs are counted as
    /// unprocessed and the sink is flushed once.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::AlreadyStarted` on a second call, or
    /// `PoolError::Flush` if the final flush fails.
    pub async fn start(&self, cancel: &CancellationToken) -> Result<PoolReport, PoolError> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(PoolError::AlreadyStarted);
        }

        let start_time = Instant::now();
        info!("Starting {} workers", self.workers);

        let progress_stop = CancellationToken::new();
        let progress = spawn_progress_logger(
            start_time,
            Arc::clone(&self.counters.written),
            Duration::from_secs(LOGGING_INTERVAL),
            progress_stop.clone(),
        );

        let handles: Vec<_> = (0..self.workers)
            .map(|id| tokio::spawn(self.worker(id).run(cancel.clone())))
            .collect();

        let mut report = PoolReport::default();
        for outcome in join_all(handles).await {
            match outcome {
                Ok(WorkerExit::Drained) => report.drained_workers += 1,
                Ok(WorkerExit::Cancelled) => report.cancelled_workers += 1,
                Err(e) => {
                    error!("Worker task failed: {e}");
                    report.failed_workers += 1;
                }
            }
        }

        progress_stop.cancel();
        if let Err(e) = progress.await {
            debug!("Progress logger ended abnormally: {e}");
        }

        self.close();
        report.unprocessed = self.discard_queued().await;

        report.written = self.counters.written.load(Ordering::SeqCst);
        report.write_failures = self.counters.write_failures.load(Ordering::SeqCst);
        report.failed_checks = self.counters.failed_checks.load(Ordering::SeqCst);
        report.abandoned = self.counters.abandoned.load(Ordering::SeqCst);
        report.lost = self.counters.in_flight.load(Ordering::SeqCst);
        report.elapsed = start_time.elapsed();

        if let Err(e) = flush_sink(Arc::clone(&self.sink)).await {
            error!("Failed to flush results: {e}");
            return Err(PoolError::Flush(e));
        }

        debug!("Worker pool finished: {report:?}");
        Ok(report)
    }

    fn worker(&self, id: usize) -> Worker<L> {
        Worker {
            id,
            receiver: Arc::clone(&self.receiver),
            checker: Arc::clone(&self.checker),
            limiter: self.limiter.clone(),
            sink: Arc::clone(&self.sink),
            counters: Arc::clone(&self.counters),
            stats: Arc::clone(&self.stats),
        }
    }

    fn current_sender(&self) -> Option<mpsc::Sender<String>> {
        self.sender
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Closes the receiving side and drops whatever is still queued.
    ///
    /// Closing also wakes producers blocked in `add_job`, which then get
    /// `PoolError::Closed`.
    async fn discard_queued(&self) -> usize {
        let mut receiver = self.receiver.lock().await;
        receiver.close();
        let mut discarded = 0;
        while receiver.try_recv().is_ok() {
            discarded += 1;
        }
        if discarded > 0 {
            info!("{discarded} queued domains were not checked");
        }
        discarded
    }
}
