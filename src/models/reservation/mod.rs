// Reservation module
// Read-only view of bookings owned by the reservation backend

use serde::{Deserialize, Serialize};

use super::interval::TimeInterval;

pub type ReservationId = i64;
pub type EquipmentId = i64;

/// Booking state as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Confirmed,
    Pending,
    Cancelled,
}

impl ReservationStatus {
    /// Only confirmed reservations block other bookings. Pending ones are
    /// shown but never hold the slot.
    pub fn blocks(&self) -> bool {
        matches!(self, ReservationStatus::Confirmed)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReservationStatus::Confirmed => "Confirmed",
            ReservationStatus::Pending => "Pending",
            ReservationStatus::Cancelled => "Cancelled",
        }
    }

    /// Hex colour used when the reservation is drawn on a calendar.
    pub fn color_hex(&self) -> &'static str {
        match self {
            ReservationStatus::Confirmed => "#198754",
            ReservationStatus::Pending => "#ffc107",
            ReservationStatus::Cancelled => "#dc3545",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub id: ReservationId,
    pub equipment_id: EquipmentId,
    pub interval: TimeInterval,
    pub status: ReservationStatus,
    /// Display name of whoever holds the booking
    pub owner_label: String,
    pub owner_email: Option<String>,
    pub purpose: Option<String>,
    pub equipment_name: Option<String>,
}

impl Reservation {
    pub fn new(
        id: ReservationId,
        equipment_id: EquipmentId,
        interval: TimeInterval,
        status: ReservationStatus,
        owner_label: impl Into<String>,
    ) -> Self {
        Self {
            id,
            equipment_id,
            interval,
            status,
            owner_label: owner_label.into(),
            owner_email: None,
            purpose: None,
            equipment_name: None,
        }
    }

    pub fn is_blocking(&self) -> bool {
        self.status.blocks()
    }

    /// Calendar title, e.g. "Confocal Microscope - kim".
    pub fn title(&self) -> String {
        match &self.equipment_name {
            Some(name) => format!("{} - {}", name, self.owner_label),
            None => self.owner_label.clone(),
        }
    }

    pub fn is_cancellable(&self) -> bool {
        self.status != ReservationStatus::Cancelled
    }
}

/// A booking the user wants to create or move to a new interval.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub equipment_id: EquipmentId,
    pub interval: TimeInterval,
    pub purpose: Option<String>,
}

impl BookingRequest {
    pub fn new(equipment_id: EquipmentId, interval: TimeInterval, purpose: Option<String>) -> Self {
        let purpose = purpose
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty());

        Self {
            equipment_id,
            interval,
            purpose,
        }
    }
}
