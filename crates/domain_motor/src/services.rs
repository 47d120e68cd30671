//! Application service for car registration, coverage queries, and claims
//!
//! `CarService` orchestrates validation, existence checks, and the storage
//! port for every synchronous operation the HTTP layer exposes. It holds no
//! state beyond the shared store handle and is cheap to clone.

use chrono::{NaiveDate, Utc};
use core_kernel::{CarId, DomainError, OwnerId, Timezone};
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::car::NewCar;
use crate::claim::{Claim, NewClaim};
use crate::history::{merge_history, CarHistoryEvent};
use crate::policy::{find_conflict, InsurancePolicy, NewPolicy};
use crate::ports::{CarWithOwner, MotorStore};
use crate::validation;

/// Request data for registering a car
#[derive(Debug, Clone)]
pub struct CarRegistration {
    pub vin: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year_of_manufacture: i32,
    pub owner_id: OwnerId,
}

/// Request data for attaching a policy to a car
#[derive(Debug, Clone)]
pub struct PolicyApplication {
    pub provider: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Request data for registering a claim
#[derive(Debug, Clone)]
pub struct ClaimSubmission {
    pub claim_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
}

/// Synchronous operations over the car registry
#[derive(Clone)]
pub struct CarService {
    store: Arc<dyn MotorStore>,
    timezone: Timezone,
}

impl CarService {
    pub fn new(store: Arc<dyn MotorStore>) -> Self {
        Self {
            store,
            timezone: Timezone::default(),
        }
    }

    /// Sets the timezone in which "today" is evaluated
    pub fn with_timezone(mut self, timezone: Timezone) -> Self {
        self.timezone = timezone;
        self
    }

    fn today(&self) -> NaiveDate {
        self.timezone.date_of(Utc::now())
    }

    /// Lists all cars with their owners
    pub async fn list_cars(&self) -> Result<Vec<CarWithOwner>, DomainError> {
        Ok(self.store.list_cars().await?)
    }

    /// Returns true if at least one policy covers the car on the given date
    pub async fn is_insurance_valid(
        &self,
        car_id: CarId,
        date: NaiveDate,
    ) -> Result<bool, DomainError> {
        validation::validate_car_id(car_id)?;
        validation::validate_query_date(date, self.today())?;

        if !self.store.car_exists(car_id).await? {
            return Err(DomainError::not_found("Car", car_id.get()));
        }

        let policies = self.store.list_policies(car_id).await?;
        Ok(policies.iter().any(|policy| policy.in_force_on(date)))
    }

    /// Registers a new car after VIN, year, and owner checks
    pub async fn create_car(
        &self,
        registration: CarRegistration,
    ) -> Result<CarWithOwner, DomainError> {
        validation::validate_vin(&registration.vin)?;

        if self.store.vin_exists(&registration.vin).await? {
            return Err(DomainError::conflict(format!(
                "A car with VIN '{}' already exists.",
                registration.vin
            )));
        }

        validation::validate_year_of_manufacture(registration.year_of_manufacture)?;

        if !self.store.owner_exists(registration.owner_id).await? {
            return Err(DomainError::not_found("Owner", registration.owner_id.get()));
        }

        let car = self
            .store
            .insert_car(NewCar {
                vin: registration.vin,
                make: registration.make,
                model: registration.model,
                year_of_manufacture: registration.year_of_manufacture,
                owner_id: registration.owner_id,
            })
            .await?;

        let owner = self
            .store
            .find_owner(registration.owner_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Owner", registration.owner_id.get()))?;

        Ok(CarWithOwner { car, owner })
    }

    /// Attaches a policy to a car, refusing overlapping coverage periods
    pub async fn create_policy(
        &self,
        car_id: CarId,
        application: PolicyApplication,
    ) -> Result<InsurancePolicy, DomainError> {
        validation::validate_car_id(car_id)?;

        if !self.store.car_exists(car_id).await? {
            return Err(DomainError::not_found("Car", car_id.get()));
        }

        validation::validate_provider(&application.provider)?;
        validation::validate_policy_dates(
            application.start_date,
            application.end_date,
            self.today(),
        )?;

        let candidate = core_kernel::DateRange {
            start: application.start_date,
            end: application.end_date,
        };
        let existing = self.store.list_policies(car_id).await?;
        if find_conflict(&existing, candidate).is_some() {
            return Err(DomainError::conflict(
                "Policy dates overlap with existing policy.",
            ));
        }

        Ok(self
            .store
            .insert_policy(NewPolicy {
                car_id,
                provider: Some(application.provider),
                start_date: application.start_date,
                end_date: application.end_date,
            })
            .await?)
    }

    /// Registers a claim against a car
    pub async fn register_claim(
        &self,
        car_id: CarId,
        submission: ClaimSubmission,
    ) -> Result<Claim, DomainError> {
        validation::validate_car_id(car_id)?;
        validation::validate_claim_description(&submission.description)?;
        validation::validate_claim_amount(submission.amount)?;
        validation::validate_claim_date(submission.claim_date, self.today())?;

        if !self.store.car_exists(car_id).await? {
            return Err(DomainError::not_found("Car", car_id.get()));
        }

        Ok(self
            .store
            .insert_claim(NewClaim {
                car_id,
                claim_date: submission.claim_date,
                description: submission.description,
                amount: submission.amount,
            })
            .await?)
    }

    /// The car's merged policy and claim history, ascending by date
    pub async fn car_history(&self, car_id: CarId) -> Result<Vec<CarHistoryEvent>, DomainError> {
        validation::validate_car_id(car_id)?;

        if !self.store.car_exists(car_id).await? {
            return Err(DomainError::not_found("Car", car_id.get()));
        }

        let policies = self.store.list_policies(car_id).await?;
        let claims = self.store.list_claims(car_id).await?;
        Ok(merge_history(&policies, &claims))
    }
}
