use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::notifications::NewNotification;
use crate::domain::repositories::{InsertOutcome, NotificationHistoryStore};

use super::errors::DispatchError;

/// Boundary to the real-time transport that pushes notifications to clients
///
/// The transport itself (websocket hub, push service) lives in the
/// surrounding application; the engine only needs the send seam.
#[async_trait]
pub trait RealtimePublisher: Send + Sync {
    async fn publish(
        &self,
        agent_id: Uuid,
        payload: &serde_json::Value,
    ) -> Result<(), DispatchError>;
}

/// Publisher that only logs, for environments without a transport attached
pub struct TracingPublisher;

#[async_trait]
impl RealtimePublisher for TracingPublisher {
    async fn publish(
        &self,
        agent_id: Uuid,
        payload: &serde_json::Value,
    ) -> Result<(), DispatchError> {
        tracing::info!(%agent_id, %payload, "break notification published");
        Ok(())
    }
}

/// Persists and publishes break notifications
///
/// The persist step is the conditional insert of the history store, run
/// under a short timeout so one slow write cannot stall the rest of a tick.
/// The publish step is best-effort: once the record is durable, a transport
/// failure is logged and the tick moves on.
pub struct NotificationDispatcher {
    history: Arc<dyn NotificationHistoryStore>,
    publisher: Arc<dyn RealtimePublisher>,
    write_timeout: Duration,
}

impl NotificationDispatcher {
    pub fn new(
        history: Arc<dyn NotificationHistoryStore>,
        publisher: Arc<dyn RealtimePublisher>,
        write_timeout: Duration,
    ) -> Self {
        Self {
            history,
            publisher,
            write_timeout,
        }
    }

    /// Records one notification, returning its id, or `None` when a
    /// concurrent tick already wrote the same uniqueness key
    pub async fn record(
        &self,
        notification: &NewNotification,
    ) -> Result<Option<i64>, DispatchError> {
        let outcome = tokio::time::timeout(self.write_timeout, self.history.insert(notification))
            .await
            .map_err(|_| DispatchError::Timeout(self.write_timeout))?
            .map_err(DispatchError::from)?;

        match outcome {
            InsertOutcome::Duplicate => {
                tracing::debug!(
                    agent_id = %notification.agent_id,
                    break_type = %notification.break_type,
                    reminder_kind = %notification.reminder_kind,
                    "duplicate notification suppressed by storage"
                );
                Ok(None)
            }
            InsertOutcome::Inserted(id) => {
                if let Err(e) = self
                    .publisher
                    .publish(notification.agent_id, &notification.payload)
                    .await
                {
                    tracing::warn!(
                        agent_id = %notification.agent_id,
                        error = %e,
                        "notification persisted but realtime publish failed"
                    );
                }
                Ok(Some(id))
            }
        }
    }
}
