use std::time::Duration;

use thiserror::Error;

use crate::domain::repositories::StoreError;

/// Failures while persisting or publishing a notification
///
/// Never fatal: the scheduler logs the failure, abandons that agent/type
/// for the current tick and retries on the next one.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("notification write failed: {0}")]
    Write(String),

    #[error("notification write timed out after {0:?}")]
    Timeout(Duration),

    #[error("realtime publish failed: {0}")]
    Publish(String),
}

impl From<StoreError> for DispatchError {
    fn from(err: StoreError) -> Self {
        DispatchError::Write(err.to_string())
    }
}

/// Errors surfaced by a scheduler evaluation pass
///
/// Shift configuration problems are deliberately absent: they are handled
/// inside the evaluation as "no breaks apply" and never propagate.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
