//! JSON shapes exchanged with the reservation backend.

use serde::{Deserialize, Serialize};

use crate::models::interval::TimeInterval;
use crate::models::reservation::{
    BookingRequest, EquipmentId, Reservation, ReservationId, ReservationStatus,
};
use crate::utils::date;

#[derive(Debug, Clone, Deserialize)]
pub struct ReservationRecord {
    pub id: ReservationId,
    pub equipment_id: EquipmentId,
    pub start_time: String,
    pub end_time: String,
    pub status: ReservationStatus,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub equipment_name: Option<String>,
}

impl TryFrom<ReservationRecord> for Reservation {
    type Error = String;

    fn try_from(record: ReservationRecord) -> Result<Self, Self::Error> {
        let start = date::parse_instant(&record.start_time)?;
        let end = date::parse_instant(&record.end_time)?;
        let interval = TimeInterval::new(start, end)
            .map_err(|err| format!("Reservation {}: {}", record.id, err))?;

        let owner_label = record
            .username
            .clone()
            .or_else(|| record.email.clone())
            .unwrap_or_else(|| "Unknown".to_string());

        Ok(Reservation {
            id: record.id,
            equipment_id: record.equipment_id,
            interval,
            status: record.status,
            owner_label,
            owner_email: record.email,
            purpose: record.purpose,
            equipment_name: record.equipment_name,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationBody {
    pub equipment_id: EquipmentId,
    pub start_time: String,
    pub end_time: String,
    pub purpose: Option<String>,
}

impl From<&BookingRequest> for ReservationBody {
    fn from(request: &BookingRequest) -> Self {
        Self {
            equipment_id: request.equipment_id,
            start_time: date::to_iso(request.interval.start()),
            end_time: date::to_iso(request.interval.end()),
            purpose: request.purpose.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictCheckBody {
    pub equipment_id: EquipmentId,
    pub start_time: String,
    pub end_time: String,
    pub exclude_id: Option<ReservationId>,
}

impl ConflictCheckBody {
    pub fn new(
        equipment_id: EquipmentId,
        candidate: &TimeInterval,
        exclude_id: Option<ReservationId>,
    ) -> Self {
        Self {
            equipment_id,
            start_time: date::to_iso(candidate.start()),
            end_time: date::to_iso(candidate.end()),
            exclude_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ConflictCheckResponse {
    #[serde(rename = "hasConflict", alias = "has_conflict")]
    pub has_conflict: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
