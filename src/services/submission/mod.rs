//! Reservation submission flow.
//!
//! validate → (confirm past start) → authoritative conflict check →
//! create or update. Each step runs once; nothing is retried.

pub mod form;

use chrono::{DateTime, Local};

use crate::models::interval::TimeInterval;
use crate::models::reservation::{BookingRequest, Reservation, ReservationId};
use crate::services::api::{BookingError, ReservationApi};
use crate::services::slot_grid::MAX_BOOKING_MINUTES;

pub use form::{BookingForm, StagedSlot};

pub struct SubmissionFlow<'a, A: ReservationApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: ReservationApi + ?Sized> SubmissionFlow<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Turn the staged form fields into a booking request.
    pub fn validate(form: &BookingForm) -> Result<BookingRequest, BookingError> {
        let date = form
            .date
            .ok_or_else(|| BookingError::Validation("Select a date".to_string()))?;
        let start_time = form
            .start_time
            .ok_or_else(|| BookingError::Validation("Select a start time".to_string()))?;

        if form.duration_minutes == 0 || form.duration_minutes > MAX_BOOKING_MINUTES {
            return Err(BookingError::Validation(format!(
                "Duration must be between 1 and {} minutes",
                MAX_BOOKING_MINUTES
            )));
        }

        let interval = TimeInterval::from_local(date, start_time, form.duration_minutes as i64)
            .map_err(BookingError::Validation)?;

        Ok(BookingRequest::new(
            form.equipment_id,
            interval,
            Some(form.purpose.clone()),
        ))
    }

    /// Submit the form.
    ///
    /// `confirm_past` is asked only when the booking starts in the past;
    /// returning `false` aborts without contacting the backend.
    pub fn submit<F>(&self, form: &BookingForm, confirm_past: F) -> Result<Reservation, BookingError>
    where
        F: FnOnce(&TimeInterval) -> bool,
    {
        self.submit_at(form, Local::now(), confirm_past)
    }

    pub fn submit_at<F>(
        &self,
        form: &BookingForm,
        now: DateTime<Local>,
        confirm_past: F,
    ) -> Result<Reservation, BookingError>
    where
        F: FnOnce(&TimeInterval) -> bool,
    {
        let request = Self::validate(form)?;

        if request.interval.starts_before(now) && !confirm_past(&request.interval) {
            return Err(BookingError::PastStartDeclined);
        }

        // Local data may be stale; the backend decides.
        if self
            .api
            .check_conflict(request.equipment_id, &request.interval, form.editing)?
        {
            log::info!(
                "Booking for equipment {} rejected: conflict at {}",
                request.equipment_id,
                crate::utils::date::format_short(request.interval.start())
            );
            return Err(BookingError::Conflict { owner: None });
        }

        let reservation = match form.editing {
            Some(id) => self.api.update_reservation(id, &request)?,
            None => self.api.create_reservation(&request)?,
        };

        log::info!(
            "Reservation {} saved for equipment {} ({} minutes)",
            reservation.id,
            reservation.equipment_id,
            reservation.interval.duration_minutes()
        );

        Ok(reservation)
    }

    pub fn cancel(&self, id: ReservationId) -> Result<(), BookingError> {
        self.api.cancel_reservation(id)?;
        log::info!("Reservation {} cancelled", id);
        Ok(())
    }
}
