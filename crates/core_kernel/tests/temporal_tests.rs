//! Tests for temporal types

use chrono::NaiveDate;
use core_kernel::temporal::{DateRange, Timezone};
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn overlap_covers_containment() {
    let outer = DateRange::new(date(2024, 1, 1), date(2024, 12, 31)).unwrap();
    let inner = DateRange::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap();
    assert!(outer.overlaps(&inner));
    assert!(inner.overlaps(&outer));
}

#[test]
fn overlap_covers_exact_match() {
    let a = DateRange::new(date(2024, 1, 1), date(2024, 6, 30)).unwrap();
    let b = DateRange::new(date(2024, 1, 1), date(2024, 6, 30)).unwrap();
    assert!(a.overlaps(&b));
}

#[test]
fn single_day_ranges() {
    let day = DateRange::new(date(2024, 5, 5), date(2024, 5, 5)).unwrap();
    assert_eq!(day.days(), 1);
    assert!(day.contains(date(2024, 5, 5)));
    assert!(day.overlaps(&day));
}

#[test]
fn default_timezone_is_utc() {
    assert_eq!(Timezone::default(), Timezone::new(chrono_tz::UTC));
}

fn day_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..3650).prop_map(|offset| date(2020, 1, 1) + chrono::Duration::days(offset))
}

fn range_strategy() -> impl Strategy<Value = DateRange> {
    (day_strategy(), 0i64..400).prop_map(|(start, len)| {
        DateRange::new(start, start + chrono::Duration::days(len)).unwrap()
    })
}

proptest! {
    /// Overlap is symmetric and equivalent to sharing at least one day.
    #[test]
    fn overlap_matches_shared_day_semantics(a in range_strategy(), b in range_strategy()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));

        let shares_day = a.start.max(b.start) <= a.end.min(b.end);
        prop_assert_eq!(a.overlaps(&b), shares_day);
    }

    /// A range always contains its own boundaries.
    #[test]
    fn range_contains_boundaries(r in range_strategy()) {
        prop_assert!(r.contains(r.start));
        prop_assert!(r.contains(r.end));
    }
}
