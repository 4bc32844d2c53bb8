// Shift domain module
// Contains the shift schedule resolver and its value objects

pub mod schedule;
pub mod value_objects;

// Re-export main types for convenience
pub use schedule::{minutes_of_day, ShiftConfigError, ShiftSchedule};
pub use value_objects::ShiftKind;
