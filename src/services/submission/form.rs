use chrono::{NaiveDate, NaiveTime};

use crate::models::reservation::{EquipmentId, Reservation, ReservationId};

/// Normalized output of a grid selection: where the booking starts and how
/// long it lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagedSlot {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: u32,
}

/// Staging fields of the booking form.
///
/// Filled by drag selection or typed in directly; consumed by
/// [`SubmissionFlow`](super::SubmissionFlow).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingForm {
    pub equipment_id: EquipmentId,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub duration_minutes: u32,
    pub purpose: String,
    /// Reservation being edited; excluded from its own conflict check
    pub editing: Option<ReservationId>,
}

impl BookingForm {
    pub fn new(equipment_id: EquipmentId) -> Self {
        Self {
            equipment_id,
            date: None,
            start_time: None,
            duration_minutes: 0,
            purpose: String::new(),
            editing: None,
        }
    }

    /// Prefill the form to move an existing reservation.
    pub fn for_edit(reservation: &Reservation) -> Self {
        let start = reservation.interval.start();
        Self {
            equipment_id: reservation.equipment_id,
            date: Some(start.date_naive()),
            start_time: Some(start.time()),
            duration_minutes: reservation.interval.duration_minutes().max(0) as u32,
            purpose: reservation.purpose.clone().unwrap_or_default(),
            editing: Some(reservation.id),
        }
    }

    pub fn with_slot(mut self, date: NaiveDate, start_time: NaiveTime, duration_minutes: u32) -> Self {
        self.stage(StagedSlot {
            date,
            start_time,
            duration_minutes,
        });
        self
    }

    pub fn with_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = purpose.into();
        self
    }

    pub fn stage(&mut self, slot: StagedSlot) {
        self.date = Some(slot.date);
        self.start_time = Some(slot.start_time);
        self.duration_minutes = slot.duration_minutes;
    }

    pub fn staged(&self) -> Option<StagedSlot> {
        match (self.date, self.start_time) {
            (Some(date), Some(start_time)) if self.duration_minutes > 0 => Some(StagedSlot {
                date,
                start_time,
                duration_minutes: self.duration_minutes,
            }),
            _ => None,
        }
    }

    pub fn is_staged(&self) -> bool {
        self.staged().is_some()
    }

    /// Reset everything except the equipment the form belongs to.
    pub fn clear(&mut self) {
        *self = Self::new(self.equipment_id);
    }
}
