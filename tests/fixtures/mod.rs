// Test fixtures - reusable test data
// Provides consistent dates, reservations and an in-memory backend

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use chrono::{DateTime, Local, NaiveDate, NaiveTime};

use equipment_booking::models::equipment::{Equipment, EquipmentStatus};
use equipment_booking::models::interval::TimeInterval;
use equipment_booking::models::reservation::{
    BookingRequest, EquipmentId, Reservation, ReservationId, ReservationStatus,
};
use equipment_booking::services::api::{BookingError, ReservationApi};
use equipment_booking::services::conflict;
use equipment_booking::utils::date;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Friday Jan 10, 2025
    pub fn jan_10_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
    }

    pub fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    pub fn at(day: NaiveDate, hour: u32, minute: u32) -> DateTime<Local> {
        date::local_datetime(day, hm(hour, minute)).unwrap()
    }

    /// A "now" well before every fixture booking, so no past-start prompt.
    pub fn new_year_2025() -> DateTime<Local> {
        at(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), 8, 0)
    }
}

/// Sample reservations for testing
pub mod reservations {
    use super::*;

    pub fn on(
        id: ReservationId,
        equipment_id: EquipmentId,
        status: ReservationStatus,
        start: (u32, u32),
        minutes: i64,
        owner: &str,
    ) -> Reservation {
        let interval =
            TimeInterval::from_local(dates::jan_10_2025(), dates::hm(start.0, start.1), minutes)
                .unwrap();
        Reservation::new(id, equipment_id, interval, status, owner)
    }
}

pub fn microscope() -> Equipment {
    Equipment {
        id: 1,
        name: "Confocal Microscope".to_string(),
        description: None,
        location: Some("B-204".to_string()),
        image_url: None,
        status: EquipmentStatus::Available,
    }
}

/// Listed but under maintenance.
pub fn spectrometer() -> Equipment {
    Equipment {
        id: 9,
        name: "Mass Spectrometer".to_string(),
        description: None,
        location: Some("C-110".to_string()),
        image_url: None,
        status: EquipmentStatus::Maintenance,
    }
}

/// Backend double that keeps reservations in memory and applies the same
/// overlap rule as the server.
pub struct InMemoryApi {
    pub user: String,
    equipment: Vec<Equipment>,
    reservations: RefCell<Vec<Reservation>>,
    next_id: Cell<ReservationId>,
    pub conflict_checks: Cell<usize>,
}

impl InMemoryApi {
    pub fn new(user: &str) -> Self {
        Self {
            user: user.to_string(),
            equipment: vec![microscope(), spectrometer()],
            reservations: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            conflict_checks: Cell::new(0),
        }
    }

    pub fn with_reservations(user: &str, reservations: Vec<Reservation>) -> Self {
        let api = Self::new(user);
        let next = reservations.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        api.next_id.set(next);
        *api.reservations.borrow_mut() = reservations;
        api
    }

    /// Booking made by someone else, bypassing any client snapshot.
    pub fn insert_as(&self, owner: &str, equipment_id: EquipmentId, interval: TimeInterval) -> ReservationId {
        let id = self.allocate_id();
        self.reservations.borrow_mut().push(Reservation::new(
            id,
            equipment_id,
            interval,
            ReservationStatus::Confirmed,
            owner,
        ));
        id
    }

    pub fn stored(&self) -> Vec<Reservation> {
        self.reservations.borrow().clone()
    }

    fn allocate_id(&self) -> ReservationId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn of_equipment(&self, equipment_id: EquipmentId) -> Vec<Reservation> {
        self.reservations
            .borrow()
            .iter()
            .filter(|r| r.equipment_id == equipment_id)
            .cloned()
            .collect()
    }

    fn not_found(id: ReservationId) -> BookingError {
        BookingError::Api {
            status: 404,
            message: format!("Reservation {} not found", id),
        }
    }
}

impl ReservationApi for InMemoryApi {
    fn list_equipment(&self) -> Result<Vec<Equipment>, BookingError> {
        Ok(self.equipment.clone())
    }

    fn fetch_reservations(
        &self,
        equipment_id: EquipmentId,
        range: &TimeInterval,
    ) -> Result<Vec<Reservation>, BookingError> {
        Ok(self
            .of_equipment(equipment_id)
            .into_iter()
            .filter(|r| r.interval.overlaps(range))
            .collect())
    }

    fn fetch_reservations_in_range(
        &self,
        range: &TimeInterval,
    ) -> Result<Vec<Reservation>, BookingError> {
        Ok(self
            .stored()
            .into_iter()
            .filter(|r| r.interval.overlaps(range))
            .collect())
    }

    fn check_conflict(
        &self,
        equipment_id: EquipmentId,
        candidate: &TimeInterval,
        exclude_id: Option<ReservationId>,
    ) -> Result<bool, BookingError> {
        self.conflict_checks.set(self.conflict_checks.get() + 1);
        Ok(conflict::has_conflict(
            candidate,
            &self.of_equipment(equipment_id),
            exclude_id,
        ))
    }

    fn create_reservation(&self, request: &BookingRequest) -> Result<Reservation, BookingError> {
        let mut reservation = Reservation::new(
            self.allocate_id(),
            request.equipment_id,
            request.interval,
            ReservationStatus::Confirmed,
            self.user.clone(),
        );
        reservation.purpose = request.purpose.clone();
        self.reservations.borrow_mut().push(reservation.clone());
        Ok(reservation)
    }

    fn update_reservation(
        &self,
        id: ReservationId,
        request: &BookingRequest,
    ) -> Result<Reservation, BookingError> {
        let mut reservations = self.reservations.borrow_mut();
        let reservation = reservations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        reservation.interval = request.interval;
        reservation.purpose = request.purpose.clone();
        Ok(reservation.clone())
    }

    fn cancel_reservation(&self, id: ReservationId) -> Result<(), BookingError> {
        let mut reservations = self.reservations.borrow_mut();
        let reservation = reservations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        reservation.status = ReservationStatus::Cancelled;
        Ok(())
    }
}
