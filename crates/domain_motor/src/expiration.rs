//! Policy expiration detection
//!
//! Scans for policies that have passed their end date, reports each one
//! once, and records the report in the processed-expiration ledger. The
//! ledger is append-only: a row per policy id marks that policy's
//! expiration as handled forever, so repeated scans stay silent about it.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use core_kernel::{ExpirationId, PolicyId, StoreError, Timezone};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::policy::UNKNOWN_PROVIDER;
use crate::ports::MotorStore;

/// A processed-expiration ledger row
///
/// Written once per policy by the expiration scan, never updated or
/// deleted. Doubles as an audit log of reported expirations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedExpiration {
    pub id: ExpirationId,
    pub policy_id: PolicyId,
    pub expiration_date: NaiveDate,
    pub processed_at: DateTime<Utc>,
}

/// Data for appending a ledger row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProcessedExpiration {
    pub policy_id: PolicyId,
    pub expiration_date: NaiveDate,
    pub processed_at: DateTime<Utc>,
}

/// Tuning for the expiration scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpirationOptions {
    /// Expirations older than this many hours are skipped: they are neither
    /// reported nor written to the ledger, and since elapsed time only
    /// grows they will stay unreported unless the threshold is widened.
    pub max_hours_since_expiration: i64,
}

impl Default for ExpirationOptions {
    fn default() -> Self {
        Self {
            max_hours_since_expiration: 24,
        }
    }
}

/// Result of one expiration scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpirationSummary {
    /// Expired policies found outside the ledger
    pub checked: usize,
    /// Of those, how many were reported and written to the ledger
    pub reported: usize,
}

/// One-shot expiration check, consumed by the background poller and by the
/// administrative manual trigger
#[async_trait]
pub trait ExpirationCheck: Send + Sync {
    async fn check_expired_policies(&self) -> Result<ExpirationSummary, StoreError>;
}

/// Detects newly expired policies and maintains the dedup ledger
pub struct PolicyExpirationService {
    store: Arc<dyn MotorStore>,
    options: ExpirationOptions,
    timezone: Timezone,
}

impl PolicyExpirationService {
    pub fn new(store: Arc<dyn MotorStore>, options: ExpirationOptions) -> Self {
        Self {
            store,
            options,
            timezone: Timezone::default(),
        }
    }

    /// Sets the timezone in which "today" and day boundaries are evaluated
    pub fn with_timezone(mut self, timezone: Timezone) -> Self {
        self.timezone = timezone;
        self
    }

    /// Runs one scan against the given instant.
    ///
    /// Candidates are the policies past their end date with no ledger row;
    /// the store computes that set-difference so it survives restarts. Each
    /// candidate within the reporting window gets a warning record and a
    /// ledger row; rows are persisted in one batch at the end. Storage
    /// errors propagate to the caller, leaving the whole batch for the next
    /// scan.
    pub async fn check_at(&self, now: DateTime<Utc>) -> Result<ExpirationSummary, StoreError> {
        let today = self.timezone.date_of(now);
        let candidates = self.store.list_policies_expired_before(today).await?;

        if candidates.is_empty() {
            debug!("No expired policies found to process");
            return Ok(ExpirationSummary {
                checked: 0,
                reported: 0,
            });
        }

        let reporting_window = Duration::hours(self.options.max_hours_since_expiration);
        let mut ledger = Vec::new();

        for policy in &candidates {
            // Elapsed time counts from midnight at the start of the end date.
            let expired_at = self.timezone.start_of_day(policy.end_date);
            let elapsed = now - expired_at;

            if elapsed <= reporting_window {
                warn!(
                    policy_id = %policy.policy_id,
                    vin = %policy.vin,
                    owner = %policy.owner_name,
                    provider = policy.provider.as_deref().unwrap_or(UNKNOWN_PROVIDER),
                    expired_on = %policy.end_date,
                    hours_since_expiration = elapsed.num_hours(),
                    "Policy expired"
                );
                ledger.push(NewProcessedExpiration {
                    policy_id: policy.policy_id,
                    expiration_date: policy.end_date,
                    processed_at: now,
                });
            }
        }

        if !ledger.is_empty() {
            self.store.insert_processed_expirations(&ledger).await?;
        }
        info!(
            checked = candidates.len(),
            reported = ledger.len(),
            "Processed expired policies"
        );

        Ok(ExpirationSummary {
            checked: candidates.len(),
            reported: ledger.len(),
        })
    }
}

#[async_trait]
impl ExpirationCheck for PolicyExpirationService {
    async fn check_expired_policies(&self) -> Result<ExpirationSummary, StoreError> {
        self.check_at(Utc::now()).await
    }
}
