//! Insurance policy aggregate and the coverage-overlap check

use chrono::NaiveDate;
use core_kernel::{CarId, DateRange, PolicyId};
use serde::{Deserialize, Serialize};

/// Provider label used when a policy carries no provider string
pub const UNKNOWN_PROVIDER: &str = "Unknown";

/// An insurance policy covering a car for an inclusive date range
///
/// Invariant: `start_date < end_date`, enforced at creation time. For a
/// given car no two policies may cover a common calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsurancePolicy {
    /// Unique identifier
    pub id: PolicyId,
    /// Covered car
    pub car_id: CarId,
    /// Provider display string, if recorded
    pub provider: Option<String>,
    /// First covered day
    pub start_date: NaiveDate,
    /// Last covered day
    pub end_date: NaiveDate,
}

impl InsurancePolicy {
    /// The inclusive coverage period
    pub fn period(&self) -> DateRange {
        DateRange {
            start: self.start_date,
            end: self.end_date,
        }
    }

    /// Returns true if the policy covers the given date
    pub fn in_force_on(&self, date: NaiveDate) -> bool {
        self.period().contains(date)
    }

    /// Provider string with the "Unknown" fallback
    pub fn provider_display(&self) -> &str {
        self.provider.as_deref().unwrap_or(UNKNOWN_PROVIDER)
    }
}

/// Data for creating a new policy
#[derive(Debug, Clone)]
pub struct NewPolicy {
    pub car_id: CarId,
    pub provider: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Finds the first existing policy whose coverage period intersects the
/// candidate range.
///
/// Pure decision function; policy creation refuses with a conflict outcome
/// when this returns a hit. Intersection uses inclusive bounds on both
/// sides, so an exact match, containment, partial overlap, and a shared
/// boundary day all conflict, while ranges meeting at adjacent days do not.
pub fn find_conflict<'a>(
    existing: &'a [InsurancePolicy],
    candidate: DateRange,
) -> Option<&'a InsurancePolicy> {
    existing.iter().find(|policy| policy.period().overlaps(&candidate))
}
