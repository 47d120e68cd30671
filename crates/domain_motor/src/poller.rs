//! Background expiration poller
//!
//! A single long-lived task that drives the expiration check on a fixed
//! interval. One failed scan never terminates the loop: errors are logged
//! and followed by a shorter backoff sleep. Cancellation is cooperative,
//! observed during the warm-up delay and every inter-scan sleep, never
//! preempting a scan in progress.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::expiration::ExpirationCheck;

/// Timing configuration for the poller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerOptions {
    /// Sleep between successful scans
    pub check_interval: Duration,
    /// Delay before the first scan, letting the rest of the system start
    pub startup_delay: Duration,
    /// Sleep after a failed scan before retrying
    pub error_backoff: Duration,
}

impl Default for PollerOptions {
    fn default() -> Self {
        Self {
            check_interval: Duration::from_secs(60),
            startup_delay: Duration::from_secs(10),
            error_backoff: Duration::from_secs(60),
        }
    }
}

/// Long-lived loop invoking the expiration check
pub struct ExpirationPoller {
    checker: Arc<dyn ExpirationCheck>,
    options: PollerOptions,
}

impl ExpirationPoller {
    pub fn new(checker: Arc<dyn ExpirationCheck>, options: PollerOptions) -> Self {
        Self { checker, options }
    }

    /// Runs until the shutdown channel signals `true` or its sender drops.
    ///
    /// No two scans ever run concurrently: the loop is strictly
    /// wait-scan-wait. Shutdown latency is bounded by whichever wait is in
    /// progress.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            check_interval_secs = self.options.check_interval.as_secs(),
            "Policy expiration poller started"
        );

        if wait_or_shutdown(self.options.startup_delay, &mut shutdown).await {
            info!("Policy expiration poller stopped");
            return;
        }

        loop {
            let delay = match self.checker.check_expired_policies().await {
                Ok(summary) => {
                    debug!(
                        checked = summary.checked,
                        reported = summary.reported,
                        "Expiration scan complete"
                    );
                    self.options.check_interval
                }
                Err(error) => {
                    error!(%error, "Error occurred while checking for expired policies");
                    self.options.error_backoff
                }
            };

            if wait_or_shutdown(delay, &mut shutdown).await {
                break;
            }
        }

        info!("Policy expiration poller stopped");
    }
}

/// Sleeps for `duration`, returning early with `true` if shutdown is
/// signalled first. A dropped sender counts as shutdown.
async fn wait_or_shutdown(duration: Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
    if *shutdown.borrow() {
        return true;
    }

    let sleep = tokio::time::sleep(duration);
    tokio::pin!(sleep);

    loop {
        tokio::select! {
            _ = &mut sleep => return false,
            changed = shutdown.changed() => match changed {
                Ok(()) if *shutdown.borrow() => return true,
                Ok(()) => continue,
                Err(_) => return true,
            },
        }
    }
}
