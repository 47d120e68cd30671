//! Policy DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{CarId, PolicyId};
use domain_motor::{InsurancePolicy, PolicyApplication};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePolicyRequest {
    pub provider: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<CreatePolicyRequest> for PolicyApplication {
    fn from(request: CreatePolicyRequest) -> Self {
        PolicyApplication {
            provider: request.provider,
            start_date: request.start_date,
            end_date: request.end_date,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyResponse {
    pub id: PolicyId,
    pub car_id: CarId,
    pub provider: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<InsurancePolicy> for PolicyResponse {
    fn from(policy: InsurancePolicy) -> Self {
        PolicyResponse {
            id: policy.id,
            car_id: policy.car_id,
            provider: policy.provider,
            start_date: policy.start_date,
            end_date: policy.end_date,
        }
    }
}
