//! In-memory storage adapter
//!
//! Implements the `MotorStore` port over plain vectors behind a mutex,
//! mirroring the semantics the PostgreSQL adapter provides: generated
//! sequential ids, the ledger set-difference in the expired-policy query,
//! and an all-or-nothing batch append for ledger rows. A simulated-outage
//! switch lets tests exercise transient-failure paths.

use async_trait::async_trait;
use chrono::NaiveDate;
use core_kernel::ports::DomainPort;
use core_kernel::{CarId, ClaimId, ExpirationId, OwnerId, PolicyId, StoreError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use domain_motor::expiration::{NewProcessedExpiration, ProcessedExpiration};
use domain_motor::ports::{CarWithOwner, ExpiredPolicy, MotorStore};
use domain_motor::{Car, Claim, InsurancePolicy, NewCar, NewClaim, NewPolicy, Owner};

#[derive(Default)]
struct Inner {
    owners: Vec<Owner>,
    cars: Vec<Car>,
    policies: Vec<InsurancePolicy>,
    claims: Vec<Claim>,
    expirations: Vec<ProcessedExpiration>,
    next_owner_id: i64,
    next_car_id: i64,
    next_policy_id: i64,
    next_claim_id: i64,
    next_expiration_id: i64,
}

impl Inner {
    fn next_owner_id(&mut self) -> OwnerId {
        self.next_owner_id += 1;
        OwnerId::new(self.next_owner_id)
    }

    fn next_car_id(&mut self) -> CarId {
        self.next_car_id += 1;
        CarId::new(self.next_car_id)
    }

    fn next_policy_id(&mut self) -> PolicyId {
        self.next_policy_id += 1;
        PolicyId::new(self.next_policy_id)
    }

    fn next_claim_id(&mut self) -> ClaimId {
        self.next_claim_id += 1;
        ClaimId::new(self.next_claim_id)
    }

    fn next_expiration_id(&mut self) -> ExpirationId {
        self.next_expiration_id += 1;
        ExpirationId::new(self.next_expiration_id)
    }
}

/// In-memory `MotorStore` for tests
#[derive(Default)]
pub struct InMemoryMotorStore {
    inner: Mutex<Inner>,
    failing: AtomicBool,
}

impl InMemoryMotorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When enabled, every store operation fails with a connection error
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_outage(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::connection("simulated outage"));
        }
        Ok(())
    }

    /// Seeds an owner and returns its id
    pub fn seed_owner(&self, name: &str, email: Option<&str>) -> OwnerId {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_owner_id();
        inner.owners.push(Owner {
            id,
            name: name.to_string(),
            email: email.map(str::to_string),
        });
        id
    }

    /// Seeds a car and returns its id
    pub fn seed_car(&self, car: NewCar) -> CarId {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_car_id();
        inner.cars.push(Car {
            id,
            vin: car.vin,
            make: car.make,
            model: car.model,
            year_of_manufacture: car.year_of_manufacture,
            owner_id: car.owner_id,
        });
        id
    }

    /// Seeds a policy and returns its id
    pub fn seed_policy(&self, policy: NewPolicy) -> PolicyId {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_policy_id();
        inner.policies.push(InsurancePolicy {
            id,
            car_id: policy.car_id,
            provider: policy.provider,
            start_date: policy.start_date,
            end_date: policy.end_date,
        });
        id
    }

    /// Seeds a ledger row directly, as if a previous scan had reported it
    pub fn seed_processed_expiration(&self, policy_id: PolicyId, expiration_date: NaiveDate) {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_expiration_id();
        inner.expirations.push(ProcessedExpiration {
            id,
            policy_id,
            expiration_date,
            processed_at: chrono::Utc::now(),
        });
    }

    /// Snapshot of the processed-expiration ledger
    pub fn processed_expirations(&self) -> Vec<ProcessedExpiration> {
        self.inner.lock().unwrap().expirations.clone()
    }

    /// Snapshot of all stored policies
    pub fn policies(&self) -> Vec<InsurancePolicy> {
        self.inner.lock().unwrap().policies.clone()
    }

    /// Snapshot of all stored claims
    pub fn claims(&self) -> Vec<Claim> {
        self.inner.lock().unwrap().claims.clone()
    }
}

impl DomainPort for InMemoryMotorStore {}

#[async_trait]
impl MotorStore for InMemoryMotorStore {
    async fn owner_exists(&self, id: OwnerId) -> Result<bool, StoreError> {
        self.check_outage()?;
        Ok(self.inner.lock().unwrap().owners.iter().any(|o| o.id == id))
    }

    async fn car_exists(&self, id: CarId) -> Result<bool, StoreError> {
        self.check_outage()?;
        Ok(self.inner.lock().unwrap().cars.iter().any(|c| c.id == id))
    }

    async fn policy_exists(&self, id: PolicyId) -> Result<bool, StoreError> {
        self.check_outage()?;
        Ok(self.inner.lock().unwrap().policies.iter().any(|p| p.id == id))
    }

    async fn vin_exists(&self, vin: &str) -> Result<bool, StoreError> {
        self.check_outage()?;
        Ok(self.inner.lock().unwrap().cars.iter().any(|c| c.vin == vin))
    }

    async fn find_owner(&self, id: OwnerId) -> Result<Option<Owner>, StoreError> {
        self.check_outage()?;
        Ok(self
            .inner
            .lock()
            .unwrap()
            .owners
            .iter()
            .find(|o| o.id == id)
            .cloned())
    }

    async fn list_cars(&self) -> Result<Vec<CarWithOwner>, StoreError> {
        self.check_outage()?;
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .cars
            .iter()
            .filter_map(|car| {
                inner
                    .owners
                    .iter()
                    .find(|o| o.id == car.owner_id)
                    .map(|owner| CarWithOwner {
                        car: car.clone(),
                        owner: owner.clone(),
                    })
            })
            .collect())
    }

    async fn insert_car(&self, car: NewCar) -> Result<Car, StoreError> {
        self.check_outage()?;
        let mut inner = self.inner.lock().unwrap();
        if inner.cars.iter().any(|c| c.vin == car.vin) {
            return Err(StoreError::constraint("cars_vin_key"));
        }
        let id = inner.next_car_id();
        let car = Car {
            id,
            vin: car.vin,
            make: car.make,
            model: car.model,
            year_of_manufacture: car.year_of_manufacture,
            owner_id: car.owner_id,
        };
        inner.cars.push(car.clone());
        Ok(car)
    }

    async fn list_policies(&self, car_id: CarId) -> Result<Vec<InsurancePolicy>, StoreError> {
        self.check_outage()?;
        Ok(self
            .inner
            .lock()
            .unwrap()
            .policies
            .iter()
            .filter(|p| p.car_id == car_id)
            .cloned()
            .collect())
    }

    async fn insert_policy(&self, policy: NewPolicy) -> Result<InsurancePolicy, StoreError> {
        self.check_outage()?;
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_policy_id();
        let policy = InsurancePolicy {
            id,
            car_id: policy.car_id,
            provider: policy.provider,
            start_date: policy.start_date,
            end_date: policy.end_date,
        };
        inner.policies.push(policy.clone());
        Ok(policy)
    }

    async fn list_claims(&self, car_id: CarId) -> Result<Vec<Claim>, StoreError> {
        self.check_outage()?;
        Ok(self
            .inner
            .lock()
            .unwrap()
            .claims
            .iter()
            .filter(|c| c.car_id == car_id)
            .cloned()
            .collect())
    }

    async fn insert_claim(&self, claim: NewClaim) -> Result<Claim, StoreError> {
        self.check_outage()?;
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_claim_id();
        let claim = Claim {
            id,
            car_id: claim.car_id,
            claim_date: claim.claim_date,
            description: claim.description,
            amount: claim.amount,
        };
        inner.claims.push(claim.clone());
        Ok(claim)
    }

    async fn list_policies_expired_before(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<ExpiredPolicy>, StoreError> {
        self.check_outage()?;
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .policies
            .iter()
            .filter(|p| p.end_date < date)
            .filter(|p| !inner.expirations.iter().any(|e| e.policy_id == p.id))
            .filter_map(|p| {
                let car = inner.cars.iter().find(|c| c.id == p.car_id)?;
                let owner = inner.owners.iter().find(|o| o.id == car.owner_id)?;
                Some(ExpiredPolicy {
                    policy_id: p.id,
                    car_id: p.car_id,
                    vin: car.vin.clone(),
                    owner_name: owner.name.clone(),
                    provider: p.provider.clone(),
                    end_date: p.end_date,
                })
            })
            .collect())
    }

    async fn insert_processed_expirations(
        &self,
        entries: &[NewProcessedExpiration],
    ) -> Result<(), StoreError> {
        self.check_outage()?;
        let mut inner = self.inner.lock().unwrap();
        if entries
            .iter()
            .any(|e| inner.expirations.iter().any(|x| x.policy_id == e.policy_id))
        {
            return Err(StoreError::constraint("processed_expirations_policy_id_key"));
        }
        for entry in entries {
            let id = inner.next_expiration_id();
            inner.expirations.push(ProcessedExpiration {
                id,
                policy_id: entry.policy_id,
                expiration_date: entry.expiration_date,
                processed_at: entry.processed_at,
            });
        }
        Ok(())
    }
}
