//! Claim DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{CarId, ClaimId};
use domain_motor::{Claim, ClaimSubmission};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClaimRequest {
    pub claim_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
}

impl From<CreateClaimRequest> for ClaimSubmission {
    fn from(request: CreateClaimRequest) -> Self {
        ClaimSubmission {
            claim_date: request.claim_date,
            description: request.description,
            amount: request.amount,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResponse {
    pub id: ClaimId,
    pub car_id: CarId,
    pub claim_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
}

impl From<Claim> for ClaimResponse {
    fn from(claim: Claim) -> Self {
        ClaimResponse {
            id: claim.id,
            car_id: claim.car_id,
            claim_date: claim.claim_date,
            description: claim.description,
            amount: claim.amount,
        }
    }
}
