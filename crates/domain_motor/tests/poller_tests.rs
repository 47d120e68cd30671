//! Background poller tests
//!
//! Run under tokio's paused clock so the virtual sleeps resolve instantly
//! and the timing assertions stay deterministic.

use async_trait::async_trait;
use core_kernel::StoreError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use domain_motor::expiration::{ExpirationCheck, ExpirationSummary};
use domain_motor::{ExpirationPoller, PollerOptions};

/// Checker that counts invocations and always succeeds
#[derive(Default)]
struct CountingCheck {
    calls: AtomicUsize,
}

#[async_trait]
impl ExpirationCheck for CountingCheck {
    async fn check_expired_policies(&self) -> Result<ExpirationSummary, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ExpirationSummary {
            checked: 0,
            reported: 0,
        })
    }
}

/// Checker that counts invocations and always fails
#[derive(Default)]
struct FailingCheck {
    calls: AtomicUsize,
}

#[async_trait]
impl ExpirationCheck for FailingCheck {
    async fn check_expired_policies(&self) -> Result<ExpirationSummary, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::connection("database unreachable"))
    }
}

fn options(interval_secs: u64, startup_secs: u64, backoff_secs: u64) -> PollerOptions {
    PollerOptions {
        check_interval: Duration::from_secs(interval_secs),
        startup_delay: Duration::from_secs(startup_secs),
        error_backoff: Duration::from_secs(backoff_secs),
    }
}

#[tokio::test(start_paused = true)]
async fn polls_repeatedly_on_the_check_interval() {
    let checker = Arc::new(CountingCheck::default());
    let (tx, rx) = watch::channel(false);
    let poller = ExpirationPoller::new(checker.clone(), options(60, 10, 60));

    let handle = tokio::spawn(poller.run(rx));

    // Warm-up plus three full intervals of virtual time.
    tokio::time::sleep(Duration::from_secs(10 + 3 * 60 + 1)).await;

    tx.send(true).unwrap();
    handle.await.unwrap();

    assert!(checker.calls.load(Ordering::SeqCst) >= 3);
}

#[tokio::test(start_paused = true)]
async fn survives_failing_scans_and_keeps_retrying() {
    let checker = Arc::new(FailingCheck::default());
    let (tx, rx) = watch::channel(false);
    // Short backoff so retries outpace the nominal interval.
    let poller = ExpirationPoller::new(checker.clone(), options(600, 1, 5));

    let handle = tokio::spawn(poller.run(rx));

    tokio::time::sleep(Duration::from_secs(60)).await;

    assert!(!handle.is_finished());
    assert!(checker.calls.load(Ordering::SeqCst) >= 5);

    tx.send(true).unwrap();
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn shutdown_during_warmup_skips_all_scans() {
    let checker = Arc::new(CountingCheck::default());
    let (tx, rx) = watch::channel(false);
    let poller = ExpirationPoller::new(checker.clone(), options(60, 3600, 60));

    let handle = tokio::spawn(poller.run(rx));

    tokio::time::sleep(Duration::from_secs(1)).await;
    tx.send(true).unwrap();
    handle.await.unwrap();

    assert_eq!(checker.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn shutdown_during_idle_wait_stops_after_current_cycle() {
    let checker = Arc::new(CountingCheck::default());
    let (tx, rx) = watch::channel(false);
    let poller = ExpirationPoller::new(checker.clone(), options(3600, 1, 60));

    let handle = tokio::spawn(poller.run(rx));

    // Let the first scan complete, then cancel mid-interval.
    tokio::time::sleep(Duration::from_secs(10)).await;
    tx.send(true).unwrap();
    handle.await.unwrap();

    assert_eq!(checker.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn dropped_shutdown_sender_stops_the_loop() {
    let checker = Arc::new(CountingCheck::default());
    let (tx, rx) = watch::channel(false);
    let poller = ExpirationPoller::new(checker.clone(), options(60, 1, 60));

    let handle = tokio::spawn(poller.run(rx));

    tokio::time::sleep(Duration::from_secs(5)).await;
    drop(tx);

    handle.await.unwrap();
}
