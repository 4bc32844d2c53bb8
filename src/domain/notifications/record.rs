use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::breaks::BreakType;

/// Category value for every record written by this engine
pub const CATEGORY_BREAK: &str = "break";

/// The five notification phases a break can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
    AvailableSoon,
    AvailableNow,
    ReminderDue,
    EndingSoon,
    Missed,
}

impl ReminderKind {
    /// Stable wire/storage name for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderKind::AvailableSoon => "available_soon",
            ReminderKind::AvailableNow => "available_now",
            ReminderKind::ReminderDue => "reminder_due",
            ReminderKind::EndingSoon => "ending_soon",
            ReminderKind::Missed => "missed",
        }
    }

    /// Minimum minutes between two notifications of this kind for the same
    /// agent/break, or `None` for one-shot kinds
    ///
    /// The one-shot kinds are each only true inside a disjoint,
    /// non-repeating sub-window, so the per-day uniqueness key alone stops
    /// repeats; the repeating kinds additionally need the 25-minute gap.
    pub fn min_gap_minutes(&self) -> Option<i64> {
        match self {
            ReminderKind::ReminderDue | ReminderKind::Missed => Some(25),
            _ => None,
        }
    }

}

impl std::fmt::Display for ReminderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification about to be inserted
///
/// The storage layer enforces uniqueness over
/// `(agent_id, break_type, reminder_kind, anchor_date, slot)`, which is what
/// makes concurrent scheduler ticks safe.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub agent_id: Uuid,
    pub break_type: BreakType,
    pub reminder_kind: ReminderKind,
    pub anchor_date: NaiveDate,
    pub slot: i32,
    pub message: String,
    pub payload: serde_json::Value,
}
