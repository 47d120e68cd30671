//! Car entity

use core_kernel::{CarId, OwnerId};
use serde::{Deserialize, Serialize};

/// A registered car
///
/// The VIN is globally unique; uniqueness is enforced at creation time and
/// backed by a database constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    /// Unique identifier
    pub id: CarId,
    /// Vehicle identification number, exactly 17 characters
    pub vin: String,
    /// Manufacturer, if known
    pub make: Option<String>,
    /// Model, if known
    pub model: Option<String>,
    /// Year of manufacture (1900-9999)
    pub year_of_manufacture: i32,
    /// Owning party
    pub owner_id: OwnerId,
}

/// Data for registering a new car
#[derive(Debug, Clone)]
pub struct NewCar {
    pub vin: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year_of_manufacture: i32,
    pub owner_id: OwnerId,
}
