//! Field-level validators
//!
//! Pure predicate functions with no side effects. Each returns the specific
//! `InvalidInput` failure for its field; callers decide whether to surface
//! the result as a client error.

use chrono::{Months, NaiveDate};
use core_kernel::{CarId, DomainError};
use rust_decimal::Decimal;

/// Required VIN length
pub const VIN_LENGTH: usize = 17;

/// Earliest accepted year of manufacture
pub const MIN_YEAR_OF_MANUFACTURE: i32 = 1900;

/// Latest accepted year of manufacture
pub const MAX_YEAR_OF_MANUFACTURE: i32 = 9999;

/// How far past today a validity query may look, in years
pub const QUERY_HORIZON_YEARS: u32 = 50;

/// Earliest date a validity query may ask about
pub fn min_query_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap()
}

/// Latest date a validity query may ask about, relative to today
pub fn max_query_date(today: NaiveDate) -> NaiveDate {
    today
        .checked_add_months(Months::new(QUERY_HORIZON_YEARS * 12))
        .unwrap_or(NaiveDate::MAX)
}

/// VIN: required, non-blank, exactly 17 characters
pub fn validate_vin(vin: &str) -> Result<(), DomainError> {
    if vin.trim().is_empty() {
        return Err(DomainError::invalid_input("Vin", "VIN is required."));
    }
    if vin.chars().count() != VIN_LENGTH {
        return Err(DomainError::invalid_input(
            "Vin",
            "VIN must be exactly 17 characters long.",
        ));
    }
    Ok(())
}

/// Year of manufacture: 1900-9999
pub fn validate_year_of_manufacture(year: i32) -> Result<(), DomainError> {
    if !(MIN_YEAR_OF_MANUFACTURE..=MAX_YEAR_OF_MANUFACTURE).contains(&year) {
        return Err(DomainError::invalid_input(
            "YearOfManufacture",
            "Year of manufacture must be between 1900 and 9999.",
        ));
    }
    Ok(())
}

/// Path identifiers must be positive before any storage lookup
pub fn validate_car_id(car_id: CarId) -> Result<(), DomainError> {
    if !car_id.is_positive() {
        return Err(DomainError::invalid_input(
            "CarId",
            "Car ID must be a positive number.",
        ));
    }
    Ok(())
}

/// A validity-query date must lie within [1900-01-01, today + 50 years]
pub fn validate_query_date(date: NaiveDate, today: NaiveDate) -> Result<(), DomainError> {
    let min = min_query_date();
    let max = max_query_date(today);
    if date < min || date > max {
        return Err(DomainError::invalid_input(
            "date",
            format!("Date must be between {} and {}.", min, max),
        ));
    }
    Ok(())
}

/// Claim description: non-blank
pub fn validate_claim_description(description: &str) -> Result<(), DomainError> {
    if description.trim().is_empty() {
        return Err(DomainError::invalid_input(
            "Description",
            "Claim description is required.",
        ));
    }
    Ok(())
}

/// Claim amount: strictly positive
pub fn validate_claim_amount(amount: Decimal) -> Result<(), DomainError> {
    if amount <= Decimal::ZERO {
        return Err(DomainError::invalid_input(
            "Amount",
            "Claim amount must be greater than zero.",
        ));
    }
    Ok(())
}

/// Claim date: never in the future
pub fn validate_claim_date(claim_date: NaiveDate, today: NaiveDate) -> Result<(), DomainError> {
    if claim_date > today {
        return Err(DomainError::invalid_input(
            "ClaimDate",
            "Claim date cannot be in the future.",
        ));
    }
    Ok(())
}

/// Policy provider: non-blank
pub fn validate_provider(provider: &str) -> Result<(), DomainError> {
    if provider.trim().is_empty() {
        return Err(DomainError::invalid_input(
            "Provider",
            "Provider is required.",
        ));
    }
    Ok(())
}

/// Policy dates: start strictly before end, end not in the past
pub fn validate_policy_dates(
    start_date: NaiveDate,
    end_date: NaiveDate,
    today: NaiveDate,
) -> Result<(), DomainError> {
    if start_date >= end_date {
        return Err(DomainError::invalid_input(
            "StartDate",
            "Start date must be before end date.",
        ));
    }
    if end_date < today {
        return Err(DomainError::invalid_input(
            "EndDate",
            "End date cannot be in the past.",
        ));
    }
    Ok(())
}
