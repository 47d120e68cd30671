//! Expiration detection tests
//!
//! Each scenario seeds the in-memory store, runs the scan against a fixed
//! instant, and inspects the summary plus the processed-expiration ledger.

use chrono::Utc;
use core_kernel::PolicyId;
use std::sync::Arc;

use domain_motor::expiration::{ExpirationOptions, PolicyExpirationService};
use domain_motor::ExpirationCheck;
use test_utils::{CarBuilder, InMemoryMotorStore, PolicyBuilder, StringFixtures, TemporalFixtures};

fn service(store: Arc<InMemoryMotorStore>, max_hours: i64) -> PolicyExpirationService {
    PolicyExpirationService::new(
        store,
        ExpirationOptions {
            max_hours_since_expiration: max_hours,
        },
    )
}

/// Seeds owner, car, and one policy that expired `days_ago` days ago.
fn seed_expired_policy(
    store: &InMemoryMotorStore,
    days_ago: i64,
    provider: Option<&str>,
) -> PolicyId {
    let owner_id = store.seed_owner("Ana Pop", Some("ana.pop@example.com"));
    let car_id = store.seed_car(CarBuilder::new(owner_id).build());
    let mut builder = PolicyBuilder::new(car_id).expired_days_ago(days_ago);
    builder = match provider {
        Some(p) => builder.with_provider(p),
        None => builder.without_provider(),
    };
    store.seed_policy(builder.build())
}

#[tokio::test]
async fn recently_expired_policy_is_reported_and_marked_processed() {
    let store = Arc::new(InMemoryMotorStore::new());
    let policy_id = seed_expired_policy(&store, 1, Some("TestProvider"));

    let summary = service(store.clone(), 1000)
        .check_at(Utc::now())
        .await
        .unwrap();

    assert_eq!(summary.checked, 1);
    assert_eq!(summary.reported, 1);

    let ledger = store.processed_expirations();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].policy_id, policy_id);
    assert_eq!(ledger[0].expiration_date, TemporalFixtures::days_ago(1));
}

#[tokio::test]
async fn stale_expiration_is_skipped_and_left_unmarked() {
    let store = Arc::new(InMemoryMotorStore::new());
    seed_expired_policy(&store, 10, Some("TestProvider"));

    let summary = service(store.clone(), 1).check_at(Utc::now()).await.unwrap();

    assert_eq!(summary.checked, 1);
    assert_eq!(summary.reported, 0);
    assert!(store.processed_expirations().is_empty());
}

#[tokio::test]
async fn already_processed_policy_is_not_reported_again() {
    let store = Arc::new(InMemoryMotorStore::new());
    let policy_id = seed_expired_policy(&store, 1, Some("TestProvider"));
    store.seed_processed_expiration(policy_id, TemporalFixtures::days_ago(1));

    let summary = service(store.clone(), 1000)
        .check_at(Utc::now())
        .await
        .unwrap();

    assert_eq!(summary.checked, 0);
    assert_eq!(summary.reported, 0);
    assert_eq!(store.processed_expirations().len(), 1);
}

#[tokio::test]
async fn active_policy_yields_nothing_to_do() {
    let store = Arc::new(InMemoryMotorStore::new());
    let owner_id = store.seed_owner("Ion Vasile", None);
    let car_id = store.seed_car(CarBuilder::new(owner_id).build());
    store.seed_policy(
        PolicyBuilder::new(car_id)
            .with_dates(TemporalFixtures::days_ago(30), TemporalFixtures::days_ahead(335))
            .build(),
    );

    let summary = service(store.clone(), 1000)
        .check_at(Utc::now())
        .await
        .unwrap();

    assert_eq!(summary.checked, 0);
    assert_eq!(summary.reported, 0);
    assert!(store.processed_expirations().is_empty());
}

#[tokio::test]
async fn multiple_expired_policies_are_all_processed() {
    let store = Arc::new(InMemoryMotorStore::new());
    let owner_id = store.seed_owner(
        &StringFixtures::owner_name(),
        Some(&StringFixtures::owner_email()),
    );
    let first_car = store.seed_car(CarBuilder::new(owner_id).build());
    let second_car = store.seed_car(
        CarBuilder::new(owner_id)
            .with_vin(StringFixtures::other_vin())
            .build(),
    );
    store.seed_policy(PolicyBuilder::new(first_car).expired_days_ago(1).build());
    store.seed_policy(PolicyBuilder::new(second_car).expired_days_ago(1).build());

    let summary = service(store.clone(), 1000)
        .check_at(Utc::now())
        .await
        .unwrap();

    assert_eq!(summary.checked, 2);
    assert_eq!(summary.reported, 2);
    assert_eq!(store.processed_expirations().len(), 2);
}

#[tokio::test]
async fn missing_provider_is_still_reported() {
    let store = Arc::new(InMemoryMotorStore::new());
    seed_expired_policy(&store, 1, None);

    let summary = service(store.clone(), 1000)
        .check_at(Utc::now())
        .await
        .unwrap();

    assert_eq!(summary.reported, 1);
    assert_eq!(store.processed_expirations().len(), 1);
}

#[tokio::test]
async fn second_scan_on_unchanged_data_is_silent() {
    let store = Arc::new(InMemoryMotorStore::new());
    seed_expired_policy(&store, 1, Some("TestProvider"));
    let svc = service(store.clone(), 1000);

    let first = svc.check_at(Utc::now()).await.unwrap();
    let second = svc.check_at(Utc::now()).await.unwrap();

    assert_eq!(first.reported, 1);
    assert_eq!(second.checked, 0);
    assert_eq!(second.reported, 0);
    assert_eq!(store.processed_expirations().len(), 1);
}

#[tokio::test]
async fn ledgered_policy_stays_silent_after_threshold_widens() {
    let store = Arc::new(InMemoryMotorStore::new());
    seed_expired_policy(&store, 1, Some("TestProvider"));

    service(store.clone(), 1000)
        .check_at(Utc::now())
        .await
        .unwrap();

    // Re-run with a far wider window; the ledger row must keep it silent.
    let summary = service(store.clone(), 1_000_000)
        .check_at(Utc::now())
        .await
        .unwrap();

    assert_eq!(summary.checked, 0);
    assert_eq!(summary.reported, 0);
    assert_eq!(store.processed_expirations().len(), 1);
}

#[tokio::test]
async fn skipped_stale_policy_is_reconsidered_but_never_reported() {
    let store = Arc::new(InMemoryMotorStore::new());
    seed_expired_policy(&store, 10, Some("TestProvider"));
    let svc = service(store.clone(), 1);

    let first = svc.check_at(Utc::now()).await.unwrap();
    let second = svc.check_at(Utc::now()).await.unwrap();

    // Still a candidate on every scan, still outside the window.
    assert_eq!(first.checked, 1);
    assert_eq!(second.checked, 1);
    assert_eq!(second.reported, 0);
    assert!(store.processed_expirations().is_empty());
}

#[tokio::test]
async fn storage_failure_propagates_to_caller() {
    let store = Arc::new(InMemoryMotorStore::new());
    seed_expired_policy(&store, 1, Some("TestProvider"));
    store.set_failing(true);

    let result = service(store.clone(), 1000).check_expired_policies().await;

    let err = result.unwrap_err();
    assert!(err.is_transient());
    assert!(store.processed_expirations().is_empty());
}
