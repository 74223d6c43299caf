//! Open-ended calendar feed across all equipment.

use crate::models::interval::TimeInterval;
use crate::models::reservation::{EquipmentId, Reservation, ReservationId, ReservationStatus};
use crate::services::api::{BookingError, ReservationApi};

/// One reservation as the calendar draws it.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEntry {
    pub reservation_id: ReservationId,
    pub equipment_id: EquipmentId,
    pub title: String,
    pub interval: TimeInterval,
    pub status: ReservationStatus,
    pub color: &'static str,
}

impl From<&Reservation> for CalendarEntry {
    fn from(reservation: &Reservation) -> Self {
        Self {
            reservation_id: reservation.id,
            equipment_id: reservation.equipment_id,
            title: reservation.title(),
            interval: reservation.interval,
            status: reservation.status,
            color: reservation.status.color_hex(),
        }
    }
}

/// Reservations in `range`, optionally limited to one equipment item,
/// ordered by start time.
pub fn calendar_entries<A: ReservationApi + ?Sized>(
    api: &A,
    range: &TimeInterval,
    equipment_filter: Option<EquipmentId>,
) -> Result<Vec<CalendarEntry>, BookingError> {
    let reservations = api.fetch_reservations_in_range(range)?;

    let mut entries: Vec<CalendarEntry> = reservations
        .iter()
        .filter(|reservation| equipment_filter.map_or(true, |id| reservation.equipment_id == id))
        .map(CalendarEntry::from)
        .collect();
    entries.sort_by_key(|entry| entry.interval.start());

    Ok(entries)
}
