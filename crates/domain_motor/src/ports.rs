//! Storage port for the motor insurance domain
//!
//! The domain reaches persistence only through [`MotorStore`]. The
//! PostgreSQL adapter lives in `infra_db`; tests use the in-memory adapter
//! from `test_utils`. All operations report failures as
//! [`core_kernel::StoreError`] so callers can tell transient faults from
//! constraint violations.

use async_trait::async_trait;
use chrono::NaiveDate;
use core_kernel::ports::DomainPort;
use core_kernel::{CarId, OwnerId, PolicyId, StoreError};
use serde::{Deserialize, Serialize};

use crate::car::{Car, NewCar};
use crate::claim::{Claim, NewClaim};
use crate::expiration::NewProcessedExpiration;
use crate::owner::Owner;
use crate::policy::{InsurancePolicy, NewPolicy};

/// A car joined with its owner, as listings and creation responses need both
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarWithOwner {
    pub car: Car,
    pub owner: Owner,
}

/// An expired policy joined with the car and owner details the expiration
/// report needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiredPolicy {
    pub policy_id: PolicyId,
    pub car_id: CarId,
    pub vin: String,
    pub owner_name: String,
    pub provider: Option<String>,
    pub end_date: NaiveDate,
}

/// Persistence operations consumed by the domain services
#[async_trait]
pub trait MotorStore: DomainPort {
    async fn owner_exists(&self, id: OwnerId) -> Result<bool, StoreError>;

    async fn car_exists(&self, id: CarId) -> Result<bool, StoreError>;

    async fn policy_exists(&self, id: PolicyId) -> Result<bool, StoreError>;

    async fn vin_exists(&self, vin: &str) -> Result<bool, StoreError>;

    async fn find_owner(&self, id: OwnerId) -> Result<Option<Owner>, StoreError>;

    async fn list_cars(&self) -> Result<Vec<CarWithOwner>, StoreError>;

    /// Inserts a car and returns it with its generated identifier
    async fn insert_car(&self, car: NewCar) -> Result<Car, StoreError>;

    async fn list_policies(&self, car_id: CarId) -> Result<Vec<InsurancePolicy>, StoreError>;

    /// Inserts a policy and returns it with its generated identifier
    async fn insert_policy(&self, policy: NewPolicy) -> Result<InsurancePolicy, StoreError>;

    async fn list_claims(&self, car_id: CarId) -> Result<Vec<Claim>, StoreError>;

    /// Inserts a claim and returns it with its generated identifier
    async fn insert_claim(&self, claim: NewClaim) -> Result<Claim, StoreError>;

    /// All policies whose end date is strictly before `date` and which have
    /// no processed-expiration ledger row yet.
    ///
    /// The set-difference against the ledger is computed here, in the store,
    /// so the result stays correct across process restarts.
    async fn list_policies_expired_before(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<ExpiredPolicy>, StoreError>;

    /// Appends ledger rows for newly reported expirations in one batch.
    ///
    /// Either all rows land or the call fails as a whole; policy ids are
    /// unique in the ledger.
    async fn insert_processed_expirations(
        &self,
        entries: &[NewProcessedExpiration],
    ) -> Result<(), StoreError>;
}
