// Properties of the half-open overlap rule

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime};
use proptest::prelude::*;

use equipment_booking::models::interval::{overlaps, TimeInterval};
use equipment_booking::utils::date;

fn base() -> DateTime<Local> {
    date::local_datetime(
        NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
        NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
    )
    .unwrap()
}

fn interval(offset: i64, minutes: i64) -> TimeInterval {
    TimeInterval::starting_at(base() + Duration::minutes(offset), minutes).unwrap()
}

proptest! {
    /// Property: overlap does not depend on argument order
    #[test]
    fn prop_overlap_is_symmetric(
        a_start in 0..2000i64, a_len in 1..300i64,
        b_start in 0..2000i64, b_len in 1..300i64,
    ) {
        let a = interval(a_start, a_len);
        let b = interval(b_start, b_len);
        prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
    }

    /// Property: every non-empty interval overlaps itself
    #[test]
    fn prop_interval_overlaps_itself(start in 0..2000i64, len in 1..300i64) {
        let a = interval(start, len);
        prop_assert!(overlaps(&a, &a));
    }

    /// Property: intervals that only touch never overlap
    #[test]
    fn prop_touching_intervals_do_not_overlap(
        start in 0..2000i64, a_len in 1..300i64, b_len in 1..300i64,
    ) {
        let a = interval(start, a_len);
        let b = interval(start + a_len, b_len);
        prop_assert!(!overlaps(&a, &b));
        prop_assert!(!overlaps(&b, &a));
    }

    /// Property: overlap matches the minute-level set intersection
    #[test]
    fn prop_overlap_matches_intersection(
        a_start in 0..500i64, a_len in 1..120i64,
        b_start in 0..500i64, b_len in 1..120i64,
    ) {
        let shared = a_start.max(b_start) < (a_start + a_len).min(b_start + b_len);
        prop_assert_eq!(overlaps(&interval(a_start, a_len), &interval(b_start, b_len)), shared);
    }
}
