//! Car DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{CarId, OwnerId};
use domain_motor::{CarHistoryEvent, CarRegistration, CarWithOwner};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCarRequest {
    pub vin: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year_of_manufacture: i32,
    pub owner_id: i64,
}

impl From<CreateCarRequest> for CarRegistration {
    fn from(request: CreateCarRequest) -> Self {
        CarRegistration {
            vin: request.vin,
            make: request.make,
            model: request.model,
            year_of_manufacture: request.year_of_manufacture,
            owner_id: OwnerId::new(request.owner_id),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarResponse {
    pub id: CarId,
    pub vin: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year_of_manufacture: i32,
    pub owner_id: OwnerId,
    pub owner_name: String,
    pub owner_email: Option<String>,
}

impl From<CarWithOwner> for CarResponse {
    fn from(record: CarWithOwner) -> Self {
        CarResponse {
            id: record.car.id,
            vin: record.car.vin,
            make: record.car.make,
            model: record.car.model,
            year_of_manufacture: record.car.year_of_manufacture,
            owner_id: record.owner.id,
            owner_name: record.owner.name,
            owner_email: record.owner.email,
        }
    }
}

/// Query string for the insurance-validity endpoint
#[derive(Debug, Deserialize)]
pub struct ValidityParams {
    pub date: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceValidityResponse {
    pub car_id: CarId,
    pub date: NaiveDate,
    pub valid: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarHistoryResponse {
    pub car_id: CarId,
    pub events: Vec<CarHistoryEvent>,
}
