// Slot module
// Fixed 30-minute booking units inside the daily operating window

use chrono::{NaiveDate, NaiveTime, Timelike};

use super::reservation::ReservationId;

/// First bookable hour of the day.
pub const OPERATING_START_HOUR: u32 = 8;
/// Hour at which the last slot ends.
pub const OPERATING_END_HOUR: u32 = 22;
pub const SLOT_MINUTES: u32 = 30;
pub const SLOTS_PER_DAY: u8 = ((OPERATING_END_HOUR - OPERATING_START_HOUR) * 60 / SLOT_MINUTES) as u8;
/// Days shown by the rolling grid view (today, +1, +2).
pub const GRID_DAYS: u32 = 3;

/// Addresses one cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId {
    pub date: NaiveDate,
    pub index: u8,
}

impl SlotId {
    pub fn new(date: NaiveDate, index: u8) -> Self {
        Self { date, index }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub index: u8,
}

impl Slot {
    /// Build the slot at `index` on `date`, if the index is inside the window
    pub fn at(date: NaiveDate, index: u8) -> Option<Self> {
        let start_time = index_to_time(index)?;
        Some(Self {
            date,
            start_time,
            index,
        })
    }

    pub fn id(&self) -> SlotId {
        SlotId::new(self.date, self.index)
    }

    pub fn end_time(&self) -> NaiveTime {
        self.start_time + chrono::Duration::minutes(SLOT_MINUTES as i64)
    }

    /// "09:30" style label for grid rows.
    pub fn label(&self) -> String {
        self.start_time.format("%H:%M").to_string()
    }
}

/// Availability of a slot within a fetched snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotState {
    Available,
    Reserved {
        reservation_id: ReservationId,
        owner_label: String,
    },
}

impl SlotState {
    pub fn is_available(&self) -> bool {
        matches!(self, SlotState::Available)
    }

    pub fn owner_label(&self) -> Option<&str> {
        match self {
            SlotState::Available => None,
            SlotState::Reserved { owner_label, .. } => Some(owner_label),
        }
    }
}

/// Wall-clock start time of the slot at `index`.
pub fn index_to_time(index: u8) -> Option<NaiveTime> {
    if index >= SLOTS_PER_DAY {
        return None;
    }

    let minutes = OPERATING_START_HOUR * 60 + index as u32 * SLOT_MINUTES;
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
}

/// Slot index of a start time; `None` when the time is not a slot boundary
/// inside the operating window.
pub fn time_to_index(time: NaiveTime) -> Option<u8> {
    let (hour, minute) = (time.hour(), time.minute());
    if time.second() != 0 || time.nanosecond() != 0 {
        return None;
    }
    if !(OPERATING_START_HOUR..OPERATING_END_HOUR).contains(&hour) {
        return None;
    }

    let half = match minute {
        0 => 0,
        30 => 1,
        _ => return None,
    };

    Some(((hour - OPERATING_START_HOUR) * 2 + half) as u8)
}
