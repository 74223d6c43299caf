//! Slot grid mapping.
//!
//! Turns a multi-day window into 30-minute slots, maps slots to wall-clock
//! intervals and classifies each slot against a fetched reservation snapshot.

pub mod duration;

use chrono::{Days, NaiveDate};

use crate::models::interval::TimeInterval;
use crate::models::reservation::Reservation;
use crate::models::slot::{Slot, SlotId, SlotState, GRID_DAYS, SLOTS_PER_DAY, SLOT_MINUTES};
use crate::services::conflict;
use crate::utils::date;

pub use duration::{grid_duration_minutes, snap_duration_minutes, DURATION_OPTIONS, MAX_BOOKING_MINUTES};

/// All slots of `num_days` consecutive days, ordered by `(date, index)`.
pub fn build_slots(window_start: NaiveDate, num_days: u32) -> Vec<Slot> {
    let mut slots = Vec::with_capacity(num_days as usize * SLOTS_PER_DAY as usize);

    for offset in 0..num_days {
        let Some(date) = window_start.checked_add_days(Days::new(offset as u64)) else {
            break;
        };
        slots.extend((0..SLOTS_PER_DAY).filter_map(|index| Slot::at(date, index)));
    }

    slots
}

pub fn slot_to_interval(slot: &Slot) -> Result<TimeInterval, String> {
    TimeInterval::from_local(slot.date, slot.start_time, SLOT_MINUTES as i64)
}

/// Reserved iff a confirmed reservation overlaps the slot.
pub fn classify(slot: &Slot, reservations: &[Reservation]) -> SlotState {
    let interval = match slot_to_interval(slot) {
        Ok(interval) => interval,
        Err(err) => {
            log::warn!("Slot {} {} cannot be mapped: {}", slot.date, slot.label(), err);
            return SlotState::Available;
        }
    };

    match conflict::find_conflict(&interval, reservations, None) {
        Some(reservation) => SlotState::Reserved {
            reservation_id: reservation.id,
            owner_label: reservation.owner_label.clone(),
        },
        None => SlotState::Available,
    }
}

/// Midnight of the first day through midnight after the last day.
pub fn fetch_window(window_start: NaiveDate, num_days: u32) -> Result<TimeInterval, String> {
    let window_end = window_start
        .checked_add_days(Days::new(num_days as u64))
        .ok_or_else(|| "Grid window is out of range".to_string())?;

    let start = date::start_of_day(window_start)
        .ok_or_else(|| format!("Start of {} does not exist locally", window_start))?;
    let end = date::start_of_day(window_end)
        .ok_or_else(|| format!("Start of {} does not exist locally", window_end))?;

    TimeInterval::new(start, end)
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub slot: Slot,
    pub state: SlotState,
}

/// Classified snapshot of one grid or calendar view.
///
/// Built once per render from a single fetch; the drag machine reads only
/// this snapshot and never goes back to the network.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotGrid {
    window_start: NaiveDate,
    num_days: u32,
    cells: Vec<GridCell>,
}

impl SlotGrid {
    pub fn build(window_start: NaiveDate, num_days: u32, reservations: &[Reservation]) -> Self {
        let cells = build_slots(window_start, num_days)
            .into_iter()
            .map(|slot| GridCell {
                state: classify(&slot, reservations),
                slot,
            })
            .collect();

        Self {
            window_start,
            num_days,
            cells,
        }
    }

    /// The rolling grid: today and the following two days.
    pub fn rolling(today: NaiveDate, reservations: &[Reservation]) -> Self {
        Self::build(today, GRID_DAYS, reservations)
    }

    pub fn window_start(&self) -> NaiveDate {
        self.window_start
    }

    pub fn num_days(&self) -> u32 {
        self.num_days
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.cells
            .iter()
            .step_by(SLOTS_PER_DAY as usize)
            .map(|cell| cell.slot.date)
            .collect()
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn cells_for(&self, date: NaiveDate) -> &[GridCell] {
        match self.day_offset(date) {
            Some(offset) => {
                let begin = offset * SLOTS_PER_DAY as usize;
                &self.cells[begin..begin + SLOTS_PER_DAY as usize]
            }
            None => &[],
        }
    }

    pub fn cell(&self, id: SlotId) -> Option<&GridCell> {
        if id.index >= SLOTS_PER_DAY {
            return None;
        }
        let offset = self.day_offset(id.date)?;
        self.cells
            .get(offset * SLOTS_PER_DAY as usize + id.index as usize)
    }

    pub fn state(&self, id: SlotId) -> Option<&SlotState> {
        self.cell(id).map(|cell| &cell.state)
    }

    /// Unknown slots count as unavailable.
    pub fn is_available(&self, id: SlotId) -> bool {
        self.state(id).is_some_and(SlotState::is_available)
    }

    /// Whether every slot in `[lo, hi]` on `date` is available.
    pub fn range_available(&self, date: NaiveDate, lo: u8, hi: u8) -> bool {
        (lo..=hi).all(|index| self.is_available(SlotId::new(date, index)))
    }

    pub fn available_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.state.is_available())
            .count()
    }

    fn day_offset(&self, date: NaiveDate) -> Option<usize> {
        let offset = (date - self.window_start).num_days();
        if offset < 0 || offset >= self.num_days as i64 {
            return None;
        }
        // Windows near the end of chrono's range may hold fewer days.
        let offset = offset as usize;
        (offset * (SLOTS_PER_DAY as usize) < self.cells.len()).then_some(offset)
    }
}
