// Property-based tests for interval and slot arithmetic

mod interval_properties;
mod slot_properties;
