use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::breaks::BreakType;
use crate::domain::notifications::{NewNotification, ReminderKind, CATEGORY_BREAK};
use crate::domain::repositories::{InsertOutcome, NotificationHistoryStore, StoreError};

/// PostgreSQL implementation of NotificationHistoryStore
///
/// Dedup atomicity lives here: the insert is conditional on the unique
/// index over (agent_id, break_type, reminder_kind, anchor_date, slot), so
/// two concurrent scheduler ticks racing on the same key produce exactly
/// one row and one `Duplicate` outcome.
pub struct PostgresNotificationHistoryStore {
    pool: PgPool,
}

impl PostgresNotificationHistoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationHistoryStore for PostgresNotificationHistoryStore {
    async fn last_sent(
        &self,
        agent_id: Uuid,
        break_type: BreakType,
        reminder_kind: ReminderKind,
        anchor_date: NaiveDate,
    ) -> Result<Option<DateTime<Utc>>, StoreError> {
        sqlx::query_scalar(
            "SELECT created_at FROM break_notifications
             WHERE agent_id = $1 AND category = $2 AND break_type = $3
               AND reminder_kind = $4 AND anchor_date = $5
             ORDER BY created_at DESC
             LIMIT 1",
        )
        .bind(agent_id)
        .bind(CATEGORY_BREAK)
        .bind(break_type.as_str())
        .bind(reminder_kind.as_str())
        .bind(anchor_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Read(format!("look up last notification: {e}")))
    }

    async fn insert(&self, notification: &NewNotification) -> Result<InsertOutcome, StoreError> {
        let id: Option<i64> = sqlx::query_scalar(
            "INSERT INTO break_notifications
                 (agent_id, category, break_type, reminder_kind,
                  anchor_date, slot, message, payload, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW())
             ON CONFLICT (agent_id, break_type, reminder_kind, anchor_date, slot)
                 DO NOTHING
             RETURNING id",
        )
        .bind(notification.agent_id)
        .bind(CATEGORY_BREAK)
        .bind(notification.break_type.as_str())
        .bind(notification.reminder_kind.as_str())
        .bind(notification.anchor_date)
        .bind(notification.slot)
        .bind(&notification.message)
        .bind(&notification.payload)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Write(format!("insert notification: {e}")))?;

        Ok(match id {
            Some(id) => InsertOutcome::Inserted(id),
            None => InsertOutcome::Duplicate,
        })
    }
}
