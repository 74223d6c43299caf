// UI module exports
// Toolkit-independent booking UI state and text rendering

pub mod booking_panel;
pub mod calendar;
pub mod drag;
pub mod grid_text;

pub use booking_panel::BookingPanel;
pub use drag::{DragOutcome, DragSelection, Selection};
