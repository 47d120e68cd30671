//! Claim entity

use chrono::NaiveDate;
use core_kernel::{CarId, ClaimId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A claim registered against a car
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,
    /// Car the claim was filed for
    pub car_id: CarId,
    /// Date of the insured event, never in the future at creation time
    pub claim_date: NaiveDate,
    /// Non-blank description of the event
    pub description: String,
    /// Claimed amount, strictly positive
    pub amount: Decimal,
}

/// Data for registering a new claim
#[derive(Debug, Clone)]
pub struct NewClaim {
    pub car_id: CarId,
    pub claim_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
}
