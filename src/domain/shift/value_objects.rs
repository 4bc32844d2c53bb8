use serde::{Deserialize, Serialize};

/// Classifies a resolved shift by whether it crosses midnight
///
/// A shift whose configured end time-of-day is at or before its start
/// time-of-day runs into the next calendar day and is treated as
/// `Overnight`. All elapsed/remaining arithmetic for overnight shifts
/// wraps at 1440 minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftKind {
    /// Start and end fall on the same calendar day
    Day,
    /// End time-of-day is at or before start time-of-day (wraps past midnight)
    Overnight,
}

impl std::fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShiftKind::Day => write!(f, "day"),
            ShiftKind::Overnight => write!(f, "overnight"),
        }
    }
}
