//! Rate limiter initialization.
//!
//! This module provides a token-bucket rate limiter shared by all workers.

use std::sync::{Arc, Mutex};

use tokio::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use crate::error_handling::Cancelled;

/// Token-bucket rate limiter for controlling lookup rate.
///
/// Tokens are replenished continuously at `rps` per second up to `capacity`.
/// The bucket starts full, so up to `capacity` waiters proceed immediately.
/// Each successful `wait` consumes exactly one token.
///
/// # Behavior
///
/// - Refill is computed from elapsed time whenever a worker asks for a token
/// - Bucket state lives behind a mutex, so concurrent waiters can never spend
///   the same token twice
/// - A cancelled wait consumes nothing
pub struct RateLimiter {
    bucket: Mutex<Bucket>,
    rps: u32,
    capacity: usize,
}

struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

impl RateLimiter {
    fn new(rps: u32, capacity: usize) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let tokens = capacity as f64;
        Self {
            bucket: Mutex::new(Bucket {
                tokens,
                last_refill: Instant::now(),
            }),
            rps,
            capacity,
        }
    }

    /// Waits for a token.
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` if `cancel` fires before a token becomes available.
    /// No token is consumed in that case.
    pub async fn wait(&self, cancel: &CancellationToken) -> Result<(), Cancelled> {
        loop {
            if cancel.is_cancelled() {
                return Err(Cancelled);
            }
            let delay = match self.try_acquire() {
                Ok(()) => return Ok(()),
                Err(delay) => delay,
            };
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }

    /// Takes a token if one is available, otherwise returns how long until
    /// the next one accrues.
    fn try_acquire(&self) -> Result<(), Duration> {
        let mut bucket = self.bucket.lock().unwrap_or_else(|e| e.into_inner());
        self.refill(&mut bucket);

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            Ok(())
        } else {
            let missing = 1.0 - bucket.tokens;
            Err(Duration::from_secs_f64(missing / f64::from(self.rps)))
        }
    }

    fn refill(&self, bucket: &mut Bucket) {
        let now = Instant::now();
        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        #[allow(clippy::cast_precision_loss)]
        let capacity = self.capacity as f64;
        bucket.tokens = (bucket.tokens + elapsed * f64::from(self.rps)).min(capacity);
        bucket.last_refill = now;
    }

    /// Tokens currently in the bucket, after refill.
    pub fn available_tokens(&self) -> f64 {
        let mut bucket = self.bucket.lock().unwrap_or_else(|e| e.into_inner());
        self.refill(&mut bucket);
        bucket.tokens
    }

    /// Sustained rate in tokens per second.
    pub fn rps(&self) -> u32 {
        self.rps
    }

    /// Burst capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Initializes a token-bucket rate limiter.
///
/// If `rps` is 0, rate limiting is disabled and `None` is returned. A `burst`
/// of 0 is treated as 1 so the limiter can always make progress.
///
/// # Arguments
///
/// * `rps` - Sustained tokens per second across all workers
/// * `burst` - Burst capacity (maximum tokens in bucket)
pub fn init_rate_limiter(rps: u32, burst: usize) -> Option<Arc<RateLimiter>> {
    if rps == 0 {
        return None;
    }
    Some(Arc::new(RateLimiter::new(rps, burst.max(1))))
}
