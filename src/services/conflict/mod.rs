//! Conflict evaluation between a candidate interval and existing bookings.
//!
//! The same rules drive local drag blocking and mirror the backend's
//! authoritative `check-conflict` endpoint: only confirmed reservations
//! block, and the reservation being edited never conflicts with itself.

use crate::models::interval::TimeInterval;
use crate::models::reservation::{Reservation, ReservationId};

/// First confirmed reservation overlapping `candidate`, skipping `exclude_id`.
pub fn find_conflict<'a>(
    candidate: &TimeInterval,
    existing: &'a [Reservation],
    exclude_id: Option<ReservationId>,
) -> Option<&'a Reservation> {
    existing
        .iter()
        .filter(|reservation| reservation.is_blocking())
        .filter(|reservation| Some(reservation.id) != exclude_id)
        .find(|reservation| candidate.overlaps(&reservation.interval))
}

pub fn has_conflict(
    candidate: &TimeInterval,
    existing: &[Reservation],
    exclude_id: Option<ReservationId>,
) -> bool {
    find_conflict(candidate, existing, exclude_id).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reservation::ReservationStatus;
    use chrono::{NaiveDate, NaiveTime};

    fn interval(from: (u32, u32), minutes: i64) -> TimeInterval {
        let date = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let time = NaiveTime::from_hms_opt(from.0, from.1, 0).unwrap();
        TimeInterval::from_local(date, time, minutes).unwrap()
    }

    fn booking(id: i64, from: (u32, u32), minutes: i64, status: ReservationStatus) -> Reservation {
        Reservation::new(id, 1, interval(from, minutes), status, format!("user{}", id))
    }

    #[test]
    fn test_no_existing_reservations() {
        assert!(!has_conflict(&interval((9, 0), 60), &[], None));
    }

    #[test]
    fn test_confirmed_overlap_conflicts() {
        let existing = vec![booking(1, (9, 0), 60, ReservationStatus::Confirmed)];
        assert!(has_conflict(&interval((9, 30), 60), &existing, None));
    }

    #[test]
    fn test_touching_reservation_does_not_conflict() {
        let existing = vec![booking(1, (9, 0), 60, ReservationStatus::Confirmed)];
        assert!(!has_conflict(&interval((10, 0), 30), &existing, None));
        assert!(!has_conflict(&interval((8, 0), 60), &existing, None));
    }

    #[test]
    fn test_pending_and_cancelled_never_block() {
        let existing = vec![
            booking(1, (9, 0), 60, ReservationStatus::Pending),
            booking(2, (9, 0), 60, ReservationStatus::Cancelled),
        ];
        assert!(!has_conflict(&interval((9, 0), 60), &existing, None));
    }

    #[test]
    fn test_excluded_reservation_is_ignored() {
        let existing = vec![booking(5, (9, 0), 60, ReservationStatus::Confirmed)];
        let same = existing[0].interval;

        assert!(has_conflict(&same, &existing, None));
        assert!(!has_conflict(&same, &existing, Some(5)));
    }

    #[test]
    fn test_exclude_does_not_hide_other_conflicts() {
        let existing = vec![
            booking(5, (9, 0), 60, ReservationStatus::Confirmed),
            booking(6, (9, 30), 30, ReservationStatus::Confirmed),
        ];
        let found = find_conflict(&interval((9, 0), 60), &existing, Some(5)).unwrap();
        assert_eq!(found.id, 6);
        assert_eq!(found.owner_label, "user6");
    }
}
