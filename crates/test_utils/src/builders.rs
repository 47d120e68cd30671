//! Test data builders
//!
//! Builder patterns for constructing test data with sensible defaults,
//! so tests specify only the fields they care about.

use chrono::NaiveDate;
use core_kernel::{CarId, OwnerId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use domain_motor::{NewCar, NewClaim, NewPolicy};

use crate::fixtures::{StringFixtures, TemporalFixtures};

/// Builder for car registration data
pub struct CarBuilder {
    vin: String,
    make: Option<String>,
    model: Option<String>,
    year_of_manufacture: i32,
    owner_id: OwnerId,
}

impl CarBuilder {
    pub fn new(owner_id: OwnerId) -> Self {
        Self {
            vin: StringFixtures::vin().to_string(),
            make: Some("Dacia".to_string()),
            model: Some("Logan".to_string()),
            year_of_manufacture: 2018,
            owner_id,
        }
    }

    pub fn with_vin(mut self, vin: impl Into<String>) -> Self {
        self.vin = vin.into();
        self
    }

    pub fn with_make(mut self, make: impl Into<String>) -> Self {
        self.make = Some(make.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year_of_manufacture = year;
        self
    }

    pub fn build(self) -> NewCar {
        NewCar {
            vin: self.vin,
            make: self.make,
            model: self.model,
            year_of_manufacture: self.year_of_manufacture,
            owner_id: self.owner_id,
        }
    }
}

/// Builder for policy data
pub struct PolicyBuilder {
    car_id: CarId,
    provider: Option<String>,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl PolicyBuilder {
    pub fn new(car_id: CarId) -> Self {
        Self {
            car_id,
            provider: Some(StringFixtures::provider().to_string()),
            start_date: TemporalFixtures::policy_start(),
            end_date: TemporalFixtures::policy_end(),
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn without_provider(mut self) -> Self {
        self.provider = None;
        self
    }

    pub fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Coverage that ended the given number of days before today
    pub fn expired_days_ago(mut self, days: i64) -> Self {
        self.end_date = TemporalFixtures::days_ago(days);
        self.start_date = self.end_date - chrono::Duration::days(365);
        self
    }

    pub fn build(self) -> NewPolicy {
        NewPolicy {
            car_id: self.car_id,
            provider: self.provider,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// Builder for claim data
pub struct ClaimBuilder {
    car_id: CarId,
    claim_date: NaiveDate,
    description: String,
    amount: Decimal,
}

impl ClaimBuilder {
    pub fn new(car_id: CarId) -> Self {
        Self {
            car_id,
            claim_date: TemporalFixtures::days_ago(1),
            description: "Rear bumper damage".to_string(),
            amount: dec!(450.00),
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.claim_date = date;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    pub fn build(self) -> NewClaim {
        NewClaim {
            car_id: self.car_id,
            claim_date: self.claim_date,
            description: self.description,
            amount: self.amount,
        }
    }
}
