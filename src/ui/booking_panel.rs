//! Booking panel for one equipment item.
//!
//! Owns the reservation snapshot, the classified grid, the drag machine and
//! the staged booking form. A rendering layer forwards pointer events here
//! and reads back what to draw.

use chrono::{DateTime, Local, NaiveDate};

use super::drag::{DragOutcome, DragSelection};
use crate::models::equipment::Equipment;
use crate::models::interval::TimeInterval;
use crate::models::reservation::{EquipmentId, Reservation, ReservationId};
use crate::models::slot::SlotId;
use crate::services::api::{BookingError, ReservationApi};
use crate::services::conflict;
use crate::services::slot_grid::{self, snap_duration_minutes, SlotGrid};
use crate::services::submission::{BookingForm, StagedSlot, SubmissionFlow};

pub struct BookingPanel<A: ReservationApi> {
    api: A,
    equipment: Equipment,
    window_start: NaiveDate,
    num_days: u32,
    reservations: Vec<Reservation>,
    grid: SlotGrid,
    drag: DragSelection,
    form: BookingForm,
}

impl<A: ReservationApi> BookingPanel<A> {
    /// Panel with an empty snapshot; call [`refresh`](Self::refresh) to load it.
    pub fn new(api: A, equipment: Equipment, window_start: NaiveDate, num_days: u32) -> Self {
        let form = BookingForm::new(equipment.id);
        Self {
            api,
            equipment,
            window_start,
            num_days,
            reservations: Vec::new(),
            grid: SlotGrid::build(window_start, num_days, &[]),
            drag: DragSelection::new(),
            form,
        }
    }

    /// Look the equipment up in the backend's list and load its first window.
    pub fn open(
        api: A,
        equipment_id: EquipmentId,
        window_start: NaiveDate,
        num_days: u32,
    ) -> Result<Self, BookingError> {
        let equipment = api
            .list_equipment()?
            .into_iter()
            .find(|equipment| equipment.id == equipment_id)
            .ok_or_else(|| {
                BookingError::Validation(format!("Equipment {} not found", equipment_id))
            })?;

        let mut panel = Self::new(api, equipment, window_start, num_days);
        panel.refresh()?;
        Ok(panel)
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    pub fn equipment_id(&self) -> EquipmentId {
        self.equipment.id
    }

    /// Equipment under maintenance is shown read-only.
    pub fn is_bookable(&self) -> bool {
        self.equipment.is_bookable()
    }

    pub fn window_start(&self) -> NaiveDate {
        self.window_start
    }

    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }

    pub fn drag(&self) -> &DragSelection {
        &self.drag
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut BookingForm {
        &mut self.form
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    fn load(&self, window_start: NaiveDate) -> Result<(Vec<Reservation>, SlotGrid), BookingError> {
        let window = slot_grid::fetch_window(window_start, self.num_days)
            .map_err(BookingError::Validation)?;
        let reservations = self.api.fetch_reservations(self.equipment.id, &window)?;

        log::debug!(
            "Loaded {} reservations for equipment {} from {}",
            reservations.len(),
            self.equipment.id,
            window_start
        );

        let grid = SlotGrid::build(window_start, self.num_days, &reservations);
        Ok((reservations, grid))
    }

    /// Fetch the window's reservations once and rebuild the grid snapshot.
    /// The drag selection is dropped even when the fetch fails.
    pub fn refresh(&mut self) -> Result<(), BookingError> {
        self.drag.reset();
        let (reservations, grid) = self.load(self.window_start)?;
        self.reservations = reservations;
        self.grid = grid;
        Ok(())
    }

    /// Move the grid to another window. Any selection is discarded; on a
    /// failed fetch the panel stays on the previous window.
    pub fn navigate(&mut self, window_start: NaiveDate) -> Result<(), BookingError> {
        self.drag.reset();
        self.form.clear();

        let (reservations, grid) = self.load(window_start)?;
        self.window_start = window_start;
        self.reservations = reservations;
        self.grid = grid;
        Ok(())
    }

    pub fn on_pointer_down(&mut self, slot: SlotId) -> DragOutcome {
        let outcome = self.drag.on_pointer_down(slot, &self.grid);
        self.stage_from(&outcome);
        outcome
    }

    pub fn on_pointer_enter(&mut self, slot: SlotId) -> DragOutcome {
        let outcome = self.drag.on_pointer_enter(slot, &self.grid);
        self.stage_from(&outcome);
        outcome
    }

    pub fn on_pointer_up(&mut self, over: Option<SlotId>) -> DragOutcome {
        self.drag.on_pointer_up(over)
    }

    fn stage_from(&mut self, outcome: &DragOutcome) {
        if let DragOutcome::Started(staged) | DragOutcome::Extended(staged) = outcome {
            self.form.stage(*staged);
        }
    }

    /// Stage a free-form calendar drag, snapping its length to a form option.
    pub fn stage_range(&mut self, start: DateTime<Local>, end: DateTime<Local>) {
        self.form.stage(StagedSlot {
            date: start.date_naive(),
            start_time: start.time(),
            duration_minutes: snap_duration_minutes(start, end),
        });
    }

    /// Load an existing reservation into the form for moving it.
    pub fn begin_edit(&mut self, id: ReservationId) -> Result<(), BookingError> {
        let reservation = self
            .reservations
            .iter()
            .find(|reservation| reservation.id == id)
            .ok_or_else(|| {
                BookingError::Validation(format!("Reservation {} is not in the current view", id))
            })?;

        self.form = BookingForm::for_edit(reservation);
        self.drag.reset();
        Ok(())
    }

    /// Immediate feedback for the staged form against the local snapshot.
    pub fn local_conflict(&self) -> Option<&Reservation> {
        let request = SubmissionFlow::<A>::validate(&self.form).ok()?;
        conflict::find_conflict(&request.interval, &self.reservations, self.form.editing)
    }

    /// False while nothing is staged, a drag is still in progress or the
    /// equipment is not bookable; the submit control should be disabled then.
    pub fn can_submit(&self) -> bool {
        self.is_bookable() && self.form.is_staged() && !self.drag.is_dragging()
    }

    pub fn submit<F>(&mut self, confirm_past: F) -> Result<Reservation, BookingError>
    where
        F: FnOnce(&TimeInterval) -> bool,
    {
        self.submit_at(Local::now(), confirm_past)
    }

    pub fn submit_at<F>(
        &mut self,
        now: DateTime<Local>,
        confirm_past: F,
    ) -> Result<Reservation, BookingError>
    where
        F: FnOnce(&TimeInterval) -> bool,
    {
        if !self.is_bookable() {
            return Err(BookingError::Validation(format!(
                "{} is under maintenance and cannot be booked",
                self.equipment.name
            )));
        }

        let result = SubmissionFlow::new(&self.api).submit_at(&self.form, now, confirm_past);

        match result {
            Ok(reservation) => {
                self.form.clear();
                self.drag.reset();
                if let Err(err) = self.refresh() {
                    log::warn!("Booking saved but grid refresh failed: {}", err);
                }
                Ok(reservation)
            }
            Err(BookingError::Conflict { owner: None }) => {
                let owner = self.local_conflict().map(|reservation| reservation.owner_label.clone());
                Err(BookingError::Conflict { owner })
            }
            Err(err) => Err(err),
        }
    }

    pub fn cancel_reservation(&mut self, id: ReservationId) -> Result<(), BookingError> {
        let already_cancelled = self
            .reservations
            .iter()
            .any(|reservation| reservation.id == id && !reservation.is_cancellable());
        if already_cancelled {
            return Err(BookingError::Validation(format!(
                "Reservation {} is already cancelled",
                id
            )));
        }

        SubmissionFlow::new(&self.api).cancel(id)?;
        if let Err(err) = self.refresh() {
            log::warn!("Reservation cancelled but grid refresh failed: {}", err);
        }
        Ok(())
    }
}
