//! Run deadline and Ctrl-C handling.
//!
//! Both end a run the same way: by firing the run's cancellation token.

use std::time::Duration;

use log::{info, warn};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Why the shutdown watcher fired the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    Deadline,
    Interrupted,
}

/// Spawns a task that cancels `cancel` on Ctrl-C or once `deadline` elapses.
///
/// The task ends without a reason if `cancel` fires from elsewhere first.
pub fn spawn_shutdown_watcher(
    cancel: CancellationToken,
    deadline: Option<Duration>,
) -> JoinHandle<Option<ShutdownReason>> {
    tokio::spawn(async move {
        let reason = tokio::select! {
            _ = cancel.cancelled() => None,
            _ = sleep_or_forever(deadline) => Some(ShutdownReason::Deadline),
            _ = interrupted() => Some(ShutdownReason::Interrupted),
        };
        match reason {
            Some(ShutdownReason::Deadline) => {
                info!("Run deadline reached, cancelling remaining work");
            }
            Some(ShutdownReason::Interrupted) => {
                info!("Interrupted, cancelling remaining work");
            }
            None => {}
        }
        cancel.cancel();
        reason
    })
}

/// Stops the watcher and returns why it fired, if it did.
///
/// Fires `cancel`, so call it only once the work it guards has finished.
pub async fn shutdown_gracefully(
    cancel: CancellationToken,
    watcher: JoinHandle<Option<ShutdownReason>>,
) -> Option<ShutdownReason> {
    cancel.cancel();
    match watcher.await {
        Ok(reason) => reason,
        Err(e) => {
            warn!("Shutdown watcher failed: {e}");
            None
        }
    }
}

async fn sleep_or_forever(deadline: Option<Duration>) {
    match deadline {
        Some(d) => tokio::time::sleep(d).await,
        None => std::future::pending().await,
    }
}

async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
