//! Pre-built test fixtures
//!
//! Ready-to-use values for common entities, designed to be consistent and
//! predictable across unit tests.

use chrono::{Duration, NaiveDate, Utc};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;

/// Fixture for string-valued fields
pub struct StringFixtures;

impl StringFixtures {
    /// A well-formed 17-character VIN
    pub fn vin() -> &'static str {
        "1HGBH41JXMN109186"
    }

    /// A second well-formed VIN for duplicate tests
    pub fn other_vin() -> &'static str {
        "WVWZZZ1JZXW000001"
    }

    /// A provider display string
    pub fn provider() -> &'static str {
        "TestProvider"
    }

    /// A generated owner name
    pub fn owner_name() -> String {
        Name().fake()
    }

    /// A generated contact email
    pub fn owner_email() -> String {
        SafeEmail().fake()
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard policy start date (Jan 1, 2024)
    pub fn policy_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    /// Standard policy end date (Dec 31, 2024)
    pub fn policy_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
    }

    /// Today's date in UTC
    pub fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    /// A date the given number of days before today
    pub fn days_ago(days: i64) -> NaiveDate {
        Self::today() - Duration::days(days)
    }

    /// A date the given number of days after today
    pub fn days_ahead(days: i64) -> NaiveDate {
        Self::today() + Duration::days(days)
    }
}
