// Module exports for models

pub mod equipment;
pub mod interval;
pub mod reservation;
pub mod settings;
pub mod slot;
