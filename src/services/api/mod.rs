//! Access to the external reservation backend.
//!
//! `ReservationApi` is the contract the booking core depends on; the HTTP
//! implementation lives in `client` and tests substitute fakes or mocks.

pub mod client;
pub mod error;
pub mod wire;

use crate::models::equipment::Equipment;
use crate::models::interval::TimeInterval;
use crate::models::reservation::{BookingRequest, EquipmentId, Reservation, ReservationId};

pub use client::HttpReservationApi;
pub use error::BookingError;

#[cfg_attr(test, mockall::automock)]
pub trait ReservationApi {
    fn list_equipment(&self) -> Result<Vec<Equipment>, BookingError>;

    /// Reservations of one equipment item overlapping `range`.
    fn fetch_reservations(
        &self,
        equipment_id: EquipmentId,
        range: &TimeInterval,
    ) -> Result<Vec<Reservation>, BookingError>;

    /// Reservations of every equipment item overlapping `range`.
    fn fetch_reservations_in_range(
        &self,
        range: &TimeInterval,
    ) -> Result<Vec<Reservation>, BookingError>;

    /// Authoritative overlap check against confirmed reservations.
    fn check_conflict(
        &self,
        equipment_id: EquipmentId,
        candidate: &TimeInterval,
        exclude_id: Option<ReservationId>,
    ) -> Result<bool, BookingError>;

    fn create_reservation(&self, request: &BookingRequest) -> Result<Reservation, BookingError>;

    fn update_reservation(
        &self,
        id: ReservationId,
        request: &BookingRequest,
    ) -> Result<Reservation, BookingError>;

    fn cancel_reservation(&self, id: ReservationId) -> Result<(), BookingError>;
}

impl<T: ReservationApi + ?Sized> ReservationApi for &T {
    fn list_equipment(&self) -> Result<Vec<Equipment>, BookingError> {
        (**self).list_equipment()
    }

    fn fetch_reservations(
        &self,
        equipment_id: EquipmentId,
        range: &TimeInterval,
    ) -> Result<Vec<Reservation>, BookingError> {
        (**self).fetch_reservations(equipment_id, range)
    }

    fn fetch_reservations_in_range(
        &self,
        range: &TimeInterval,
    ) -> Result<Vec<Reservation>, BookingError> {
        (**self).fetch_reservations_in_range(range)
    }

    fn check_conflict(
        &self,
        equipment_id: EquipmentId,
        candidate: &TimeInterval,
        exclude_id: Option<ReservationId>,
    ) -> Result<bool, BookingError> {
        (**self).check_conflict(equipment_id, candidate, exclude_id)
    }

    fn create_reservation(&self, request: &BookingRequest) -> Result<Reservation, BookingError> {
        (**self).create_reservation(request)
    }

    fn update_reservation(
        &self,
        id: ReservationId,
        request: &BookingRequest,
    ) -> Result<Reservation, BookingError> {
        (**self).update_reservation(id, request)
    }

    fn cancel_reservation(&self, id: ReservationId) -> Result<(), BookingError> {
        (**self).cancel_reservation(id)
    }
}

/// Equipment for filter lists; a failed read degrades to an empty list.
pub fn equipment_or_empty<A: ReservationApi + ?Sized>(api: &A) -> Vec<Equipment> {
    api.list_equipment().unwrap_or_else(|err| {
        log::warn!("Failed to load equipment list: {}", err);
        Vec::new()
    })
}
