use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::breaks::BreakType;
use crate::domain::notifications::ReminderKind;
use crate::domain::repositories::{NotificationHistoryStore, StoreError};

/// Result of a dedup check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupDecision {
    /// No conflicting history; proceed to the conditional insert
    Send,
    /// A recent-enough notification of the same kind already exists.
    /// Not an error; a normal evaluation outcome, logged at debug.
    Suppressed { elapsed_minutes: i64 },
}

/// Gate preventing a notification kind from repeating faster than its
/// minimum gap
///
/// This is the read half of the dedup contract: it consults the most recent
/// record for the same agent/break/kind on the same shift-anchored day. The
/// write half is the storage layer's conditional insert, whose uniqueness
/// key makes concurrent ticks safe even when two of them pass this check at
/// once.
pub struct NotificationDeduplicator {
    history: Arc<dyn NotificationHistoryStore>,
}

impl NotificationDeduplicator {
    pub fn new(history: Arc<dyn NotificationHistoryStore>) -> Self {
        Self { history }
    }

    /// Decides whether a notification of `kind` may be sent at `now`
    ///
    /// One-shot kinds are suppressed by any prior send on the same anchor
    /// date; repeating kinds are suppressed until their minimum gap has
    /// elapsed since the last send.
    pub async fn check(
        &self,
        agent_id: Uuid,
        break_type: BreakType,
        kind: ReminderKind,
        anchor_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<DedupDecision, StoreError> {
        let last = self
            .history
            .last_sent(agent_id, break_type, kind, anchor_date)
            .await?;

        let Some(last_sent) = last else {
            return Ok(DedupDecision::Send);
        };

        let elapsed_minutes = (now - last_sent).num_minutes();
        match kind.min_gap_minutes() {
            None => Ok(DedupDecision::Suppressed { elapsed_minutes }),
            Some(gap) if elapsed_minutes >= gap => Ok(DedupDecision::Send),
            Some(_) => Ok(DedupDecision::Suppressed { elapsed_minutes }),
        }
    }
}
