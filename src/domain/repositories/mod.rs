// Repository traits (ports)
// Contracts the scheduler consumes from the surrounding application;
// implementations live in the infrastructure layer

pub mod break_session_repository;
pub mod notification_repository;
pub mod shift_repository;

use thiserror::Error;

pub use break_session_repository::BreakSessionStore;
pub use notification_repository::{InsertOutcome, NotificationHistoryStore};
pub use shift_repository::AgentShiftProvider;

/// Storage failures surfaced by any repository
///
/// Always tick-local: callers log the failure, skip that agent/kind for the
/// current tick and retry naturally on the next one.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store read failed: {0}")]
    Read(String),

    #[error("store write failed: {0}")]
    Write(String),
}
