// Service module exports
// Backend access, grid mapping, conflict rules and the booking flow

pub mod api;
pub mod conflict;
pub mod settings;
pub mod slot_grid;
pub mod submission;
