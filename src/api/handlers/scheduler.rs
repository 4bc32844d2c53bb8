use std::sync::Arc;

use axum::{extract::Path, extract::State, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::scheduler::ReminderScheduler;

/// Response from a manually-triggered evaluation pass
#[derive(Debug, Serialize)]
pub struct RunResponse {
    pub dispatched: usize,
}

/// Response listing the notifications due for one agent right now
#[derive(Debug, Serialize)]
pub struct AgentEvaluationResponse {
    pub agent_id: Uuid,
    pub due: Vec<DueNotificationResponse>,
}

#[derive(Debug, Serialize)]
pub struct DueNotificationResponse {
    pub break_type: String,
    pub reminder_kind: String,
    pub message: String,
}

/// Health check
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}

/// Force one full evaluation pass immediately
///
/// POST /api/scheduler/run
///
/// Returns the number of notifications dispatched. Safe to call at any
/// time, since replaying a pass for the same instant is idempotent.
pub async fn run_scheduler(
    State(scheduler): State<Arc<ReminderScheduler>>,
) -> Json<RunResponse> {
    let dispatched = scheduler.run_once().await;
    Json(RunResponse { dispatched })
}

/// Evaluate a single agent without dispatching
///
/// GET /api/scheduler/agents/:id
pub async fn evaluate_agent(
    State(scheduler): State<Arc<ReminderScheduler>>,
    Path(agent_id): Path<Uuid>,
) -> Result<Json<AgentEvaluationResponse>, ApiError> {
    let due = scheduler
        .evaluate_agent(agent_id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("evaluation failed: {e}")))?;

    Ok(Json(AgentEvaluationResponse {
        agent_id,
        due: due
            .into_iter()
            .map(|n| DueNotificationResponse {
                break_type: n.break_type.as_str().to_string(),
                reminder_kind: n.reminder_kind.as_str().to_string(),
                message: n.message,
            })
            .collect(),
    }))
}
