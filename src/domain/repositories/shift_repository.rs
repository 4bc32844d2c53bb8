use async_trait::async_trait;
use uuid::Uuid;

use super::StoreError;

/// Provider of agent shift configuration
///
/// The raw shift text is re-read on every evaluation so that a schedule
/// change takes effect on the very next tick; resolved schedules are never
/// cached or persisted.
#[async_trait]
pub trait AgentShiftProvider: Send + Sync {
    /// The agent's raw shift configuration, `None` when unconfigured
    async fn shift_text(&self, agent_id: Uuid) -> Result<Option<String>, StoreError>;

    /// All agents that currently have a shift configured
    async fn agents_with_shifts(&self) -> Result<Vec<Uuid>, StoreError>;
}
