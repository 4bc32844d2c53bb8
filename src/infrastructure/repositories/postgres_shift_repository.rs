use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::repositories::{AgentShiftProvider, StoreError};

/// PostgreSQL implementation of AgentShiftProvider
///
/// Reads the raw shift configuration straight from the agents table on
/// every call; nothing is cached, so schedule edits are visible to the very
/// next scheduler tick.
pub struct PostgresShiftRepository {
    pool: PgPool,
}

impl PostgresShiftRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AgentShiftProvider for PostgresShiftRepository {
    async fn shift_text(&self, agent_id: Uuid) -> Result<Option<String>, StoreError> {
        let row: Option<Option<String>> =
            sqlx::query_scalar("SELECT shift_schedule FROM agents WHERE id = $1")
                .bind(agent_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| StoreError::Read(format!("load shift for agent {agent_id}: {e}")))?;

        // Missing agent and null column both mean "unconfigured"
        Ok(row.flatten())
    }

    async fn agents_with_shifts(&self) -> Result<Vec<Uuid>, StoreError> {
        sqlx::query_scalar("SELECT id FROM agents WHERE shift_schedule IS NOT NULL ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Read(format!("list agents with shifts: {e}")))
    }
}
