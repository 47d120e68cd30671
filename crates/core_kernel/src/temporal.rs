//! Temporal types for calendar-date handling
//!
//! Policies and claims carry plain calendar dates. This module provides:
//! - `DateRange`: an inclusive-inclusive date range used for coverage periods
//! - `Timezone`: the business timezone in which "today" and day boundaries
//!   are computed

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

/// Timezone in which business dates are evaluated
///
/// Wraps chrono_tz::Tz with custom serialization support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Tz::from_str(&s)
            .map(Timezone)
            .map_err(|_| serde::de::Error::custom(format!("Invalid timezone: {}", s)))
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Parses an IANA timezone name
    pub fn parse(name: &str) -> Result<Self, TemporalError> {
        Tz::from_str(name)
            .map(Timezone)
            .map_err(|_| TemporalError::InvalidTimezone(name.to_string()))
    }

    /// The current calendar date in this timezone
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.0).date_naive()
    }

    /// The start of day (00:00:00) for a date in this timezone, as UTC
    ///
    /// Falls back to the later of two ambiguous local times around DST
    /// transitions; midnight is never skipped in practice for UTC-like zones.
    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        let midnight = date.and_hms_opt(0, 0, 0).unwrap();
        match midnight.and_local_timezone(self.0) {
            chrono::LocalResult::Single(dt) => dt.with_timezone(&Utc),
            chrono::LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
            chrono::LocalResult::None => {
                (midnight + Duration::hours(1))
                    .and_local_timezone(self.0)
                    .earliest()
                    .map(|dt| dt.with_timezone(&Utc))
                    .unwrap_or_else(|| DateTime::<Utc>::from_naive_utc_and_offset(midnight, Utc))
            }
        }
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::UTC)
    }
}

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid range: start {start} must not be after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

/// An inclusive-inclusive calendar-date range
///
/// Coverage periods count both boundary days: a policy running
/// [Jan 1, Dec 31] is in force on Jan 1 and on Dec 31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First covered day
    pub start: NaiveDate,
    /// Last covered day
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting start > end
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns true if the date falls on or between the boundaries
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Returns true if the two ranges share at least one calendar day
    ///
    /// Inclusive bounds on both sides: [s1,e1] and [s2,e2] overlap when
    /// s1 <= e2 and s2 <= e1. Symmetric; adjacent ranges whose boundary
    /// days differ by one do not overlap.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Number of days spanned, counting both boundary days
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}
