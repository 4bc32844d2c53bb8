// Break domain module
// Window derivation and real-time availability evaluation

pub mod availability;
pub mod session;
pub mod windows;

// Re-export main types for convenience
pub use availability::{BreakPhase, TakenState};
pub use session::BreakSession;
pub use windows::{anchor_date, break_windows, BreakType, BreakWindow};
