use chrono::{DateTime, Local};

use crate::models::slot::SLOT_MINUTES;

/// Longest booking the grid can stage.
pub const MAX_BOOKING_MINUTES: u32 = 240;

/// Durations offered by the booking form.
pub const DURATION_OPTIONS: [u32; 8] = [30, 60, 90, 120, 150, 180, 210, 240];

/// Duration of a contiguous grid selection, clamped to four hours.
pub fn grid_duration_minutes(start_index: u8, end_index: u8) -> u32 {
    let (lo, hi) = if start_index <= end_index {
        (start_index, end_index)
    } else {
        (end_index, start_index)
    };

    let slots = (hi - lo) as u32 + 1;
    (slots * SLOT_MINUTES).min(MAX_BOOKING_MINUTES)
}

/// Duration of a free-form calendar drag, snapped to the nearest form option.
///
/// Ties go to the shorter option.
pub fn snap_duration_minutes(start: DateTime<Local>, end: DateTime<Local>) -> u32 {
    let minutes = (end - start).num_minutes();

    DURATION_OPTIONS
        .iter()
        .copied()
        .min_by_key(|option| (*option as i64 - minutes).abs())
        .unwrap_or(SLOT_MINUTES)
}
