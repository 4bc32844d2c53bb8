use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::windows::BreakType;

/// A break actually taken (or in progress) by an agent
///
/// Sessions are created and closed by the break-taking actions in the
/// surrounding application; this engine only reads them. At most one row per
/// (agent, break type, date) may have a null end time; that open row means
/// the break is in progress right now.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakSession {
    pub agent_id: Uuid,
    pub break_type: BreakType,
    /// The shift-anchored date this session belongs to
    pub session_date: NaiveDate,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl BreakSession {
    /// True while the break is still in progress
    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }
}
