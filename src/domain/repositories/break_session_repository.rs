use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::breaks::{BreakSession, BreakType};

use super::StoreError;

/// Read access to break sessions
///
/// Sessions are written by the break-taking actions in the surrounding
/// application; the scheduler only needs the two lookups that feed the
/// taken-state of a break.
#[async_trait]
pub trait BreakSessionStore: Send + Sync {
    /// True when a completed session (non-null end time) exists for the
    /// agent/break/date
    async fn has_taken_break(
        &self,
        agent_id: Uuid,
        break_type: BreakType,
        date: NaiveDate,
    ) -> Result<bool, StoreError>;

    /// The open (in-progress) session for the agent/break/date, if any
    async fn find_open_session(
        &self,
        agent_id: Uuid,
        break_type: BreakType,
        date: NaiveDate,
    ) -> Result<Option<BreakSession>, StoreError>;
}
