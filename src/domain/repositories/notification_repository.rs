use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::breaks::BreakType;
use crate::domain::notifications::{NewNotification, ReminderKind};

use super::StoreError;

/// Outcome of a conditional notification insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Row was written; carries the new record id
    Inserted(i64),
    /// The uniqueness key already existed; nothing was written
    Duplicate,
}

/// Append-only store of sent break notifications
///
/// `insert` must be atomic with respect to concurrent ticks: the
/// implementation enforces uniqueness over
/// `(agent_id, break_type, reminder_kind, anchor_date, slot)` and reports a
/// conflicting write as [`InsertOutcome::Duplicate`] instead of failing.
/// This replaces the racy check-then-insert the engine historically used.
#[async_trait]
pub trait NotificationHistoryStore: Send + Sync {
    /// Creation time of the most recent notification of this kind for the
    /// agent/break on the given shift-anchored day
    async fn last_sent(
        &self,
        agent_id: Uuid,
        break_type: BreakType,
        reminder_kind: ReminderKind,
        anchor_date: NaiveDate,
    ) -> Result<Option<DateTime<Utc>>, StoreError>;

    /// Conditionally insert a notification record
    async fn insert(&self, notification: &NewNotification) -> Result<InsertOutcome, StoreError>;
}
