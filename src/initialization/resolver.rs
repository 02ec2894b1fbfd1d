//! DNS resolver initialization.
//!
//! This module provides functions to initialize the DNS resolver with proper
//! timeout configuration.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

/// Initializes the DNS resolver for mail record lookups.
///
/// Uses the default upstream configuration with a per-query timeout of
/// `timeout_secs` and a single attempt, so a failed lookup is never retried.
/// `ndots` is 0 so search domains are never appended to the checked names.
///
/// # Returns
///
/// A configured `TokioAsyncResolver` wrapped in `Arc` for sharing across workers.
pub fn init_resolver(timeout_secs: u64) -> Arc<TokioAsyncResolver> {
    Arc::new(TokioAsyncResolver::tokio(
        ResolverConfig::default(),
        resolver_opts(timeout_secs),
    ))
}

fn resolver_opts(timeout_secs: u64) -> ResolverOpts {
    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(timeout_secs.max(1));
    opts.attempts = 1;
    opts.ndots = 0;
    opts
}
