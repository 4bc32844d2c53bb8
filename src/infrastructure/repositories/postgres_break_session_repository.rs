use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::breaks::{BreakSession, BreakType};
use crate::domain::repositories::{BreakSessionStore, StoreError};

/// PostgreSQL implementation of BreakSessionStore
///
/// Sessions are written by the break-taking endpoints of the surrounding
/// application; this adapter only performs the two reads the scheduler
/// needs.
pub struct PostgresBreakSessionStore {
    pool: PgPool,
}

impl PostgresBreakSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BreakSessionStore for PostgresBreakSessionStore {
    async fn has_taken_break(
        &self,
        agent_id: Uuid,
        break_type: BreakType,
        date: NaiveDate,
    ) -> Result<bool, StoreError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM break_sessions
             WHERE agent_id = $1 AND break_type = $2 AND session_date = $3
               AND ended_at IS NOT NULL",
        )
        .bind(agent_id)
        .bind(break_type.as_str())
        .bind(date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::Read(format!("count completed sessions: {e}")))?;

        Ok(count > 0)
    }

    async fn find_open_session(
        &self,
        agent_id: Uuid,
        break_type: BreakType,
        date: NaiveDate,
    ) -> Result<Option<BreakSession>, StoreError> {
        let row = sqlx::query(
            "SELECT agent_id, break_type, session_date, started_at, ended_at
             FROM break_sessions
             WHERE agent_id = $1 AND break_type = $2 AND session_date = $3
               AND ended_at IS NULL
             LIMIT 1",
        )
        .bind(agent_id)
        .bind(break_type.as_str())
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Read(format!("find open session: {e}")))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let stored_type: String = row
            .try_get("break_type")
            .map_err(|e| StoreError::Read(e.to_string()))?;
        let break_type = BreakType::from_str_name(&stored_type)
            .ok_or_else(|| StoreError::Read(format!("unknown break type {stored_type:?}")))?;

        Ok(Some(BreakSession {
            agent_id: row
                .try_get("agent_id")
                .map_err(|e| StoreError::Read(e.to_string()))?,
            break_type,
            session_date: row
                .try_get("session_date")
                .map_err(|e| StoreError::Read(e.to_string()))?,
            started_at: row
                .try_get::<DateTime<Utc>, _>("started_at")
                .map_err(|e| StoreError::Read(e.to_string()))?,
            ended_at: row
                .try_get::<Option<DateTime<Utc>>, _>("ended_at")
                .map_err(|e| StoreError::Read(e.to_string()))?,
        }))
    }
}
