// Properties of the slot grid mapping

use chrono::{Duration, NaiveDate, NaiveTime};
use proptest::prelude::*;

use equipment_booking::models::slot::{index_to_time, time_to_index, SLOTS_PER_DAY};
use equipment_booking::services::slot_grid::{
    grid_duration_minutes, snap_duration_minutes, DURATION_OPTIONS, MAX_BOOKING_MINUTES,
};
use equipment_booking::utils::date;

proptest! {
    /// Property: index -> time -> index is the identity inside the window
    #[test]
    fn prop_slot_index_round_trip(index in 0..SLOTS_PER_DAY) {
        let time = index_to_time(index).unwrap();
        prop_assert_eq!(time_to_index(time), Some(index));
    }

    /// Property: times between slot boundaries have no index
    #[test]
    fn prop_off_boundary_times_are_rejected(hour in 8..22u32, minute in 0..60u32) {
        prop_assume!(minute != 0 && minute != 30);
        let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap();
        prop_assert_eq!(time_to_index(time), None);
    }

    /// Property: grid durations are whole slots and never exceed the limit
    #[test]
    fn prop_grid_duration_is_bounded(a in 0..SLOTS_PER_DAY, b in 0..SLOTS_PER_DAY) {
        let minutes = grid_duration_minutes(a, b);
        prop_assert!(minutes <= MAX_BOOKING_MINUTES);
        prop_assert_eq!(minutes % 30, 0);
        prop_assert_eq!(minutes, grid_duration_minutes(b, a));
    }

    /// Property: a calendar drag always snaps to an offered duration
    #[test]
    fn prop_snapped_duration_is_an_option(a in 0..1440i64, b in 0..1440i64) {
        let day = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let start = date::start_of_day(day).unwrap();
        let (x, y) = (start + Duration::minutes(a), start + Duration::minutes(b));

        prop_assert!(DURATION_OPTIONS.contains(&snap_duration_minutes(x, y)));
    }
}
