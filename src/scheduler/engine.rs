use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use uuid::Uuid;

use crate::domain::breaks::availability::{
    self, missed_slot, reminder_slot, TakenState,
};
use crate::domain::breaks::{anchor_date, break_windows, BreakType, BreakWindow};
use crate::domain::notifications::{NewNotification, ReminderKind};
use crate::domain::repositories::{
    AgentShiftProvider, BreakSessionStore, NotificationHistoryStore,
};
use crate::domain::shift::{minutes_of_day, ShiftSchedule};

use super::clock::Clock;
use super::dedup::{DedupDecision, NotificationDeduplicator};
use super::dispatcher::{NotificationDispatcher, RealtimePublisher};
use super::errors::SchedulerError;

/// Runtime tuning for the reminder scheduler
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Poll interval between evaluation passes
    pub tick_interval: Duration,
    /// Upper bound on concurrently-evaluated agents per pass
    pub max_concurrent_agents: usize,
    /// Timeout applied to each notification write
    pub write_timeout: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(60),
            max_concurrent_agents: 8,
            write_timeout: Duration::from_secs(5),
        }
    }
}

/// One notification the current tick decided to send
#[derive(Debug, Clone)]
pub struct DueNotification {
    pub break_type: BreakType,
    pub reminder_kind: ReminderKind,
    pub anchor_date: NaiveDate,
    /// Repeat bucket within the day; part of the storage uniqueness key
    pub slot: i32,
    pub message: String,
    pub payload: serde_json::Value,
}

/// The periodic driver of break notifications
///
/// Each tick re-reads every agent's shift configuration and break sessions,
/// evaluates all five availability predicates per break window, gates
/// repeats through the deduplicator and dispatches whatever remains. Ticks
/// are independent and idempotent: replaying a tick for the identical
/// instant never produces a second record for the same
/// (agent, break type, reminder kind, window).
pub struct ReminderScheduler {
    shifts: Arc<dyn AgentShiftProvider>,
    sessions: Arc<dyn BreakSessionStore>,
    dedup: NotificationDeduplicator,
    dispatcher: NotificationDispatcher,
    clock: Arc<dyn Clock>,
    config: SchedulerConfig,
}

impl ReminderScheduler {
    pub fn new(
        shifts: Arc<dyn AgentShiftProvider>,
        sessions: Arc<dyn BreakSessionStore>,
        history: Arc<dyn NotificationHistoryStore>,
        publisher: Arc<dyn RealtimePublisher>,
        clock: Arc<dyn Clock>,
        config: SchedulerConfig,
    ) -> Self {
        let dedup = NotificationDeduplicator::new(history.clone());
        let dispatcher = NotificationDispatcher::new(history, publisher, config.write_timeout);
        Self {
            shifts,
            sessions,
            dedup,
            dispatcher,
            clock,
            config,
        }
    }

    /// Evaluates one agent's breaks at the clock's current instant
    ///
    /// Returns the notifications due this tick, already gated by the
    /// deduplicator. An absent or unparsable shift configuration yields an
    /// empty set (logged at debug), never an error.
    pub async fn evaluate_agent(
        &self,
        agent_id: Uuid,
    ) -> Result<Vec<DueNotification>, SchedulerError> {
        let now_utc = self.clock.now_utc();
        let now_local = self.clock.now_local();

        let shift_text = self.shifts.shift_text(agent_id).await?;
        let schedule = match ShiftSchedule::resolve(shift_text.as_deref()) {
            Ok(Some(schedule)) => schedule,
            Ok(None) => {
                tracing::debug!(%agent_id, "no shift configured, skipping");
                return Ok(Vec::new());
            }
            Err(e) => {
                tracing::debug!(%agent_id, error = %e, "unusable shift configuration, skipping");
                return Ok(Vec::new());
            }
        };

        let offset = schedule.offset_from_start(minutes_of_day(now_local.time()));
        let shift_len = schedule.len_minutes();
        let anchor = anchor_date(&schedule, now_local);

        let mut due = Vec::new();
        for window in break_windows(&schedule) {
            let taken = self.taken_state(agent_id, window.break_type, anchor).await?;

            for (kind, slot) in candidate_kinds(offset, &window, taken, shift_len) {
                let decision = self
                    .dedup
                    .check(agent_id, window.break_type, kind, anchor, now_utc)
                    .await?;
                match decision {
                    DedupDecision::Send => {
                        let (message, minutes) = build_message(kind, &window, offset);
                        due.push(DueNotification {
                            break_type: window.break_type,
                            reminder_kind: kind,
                            anchor_date: anchor,
                            slot,
                            payload: serde_json::json!({
                                "break_type": window.break_type,
                                "reminder_type": kind,
                                "minutes": minutes,
                            }),
                            message,
                        });
                    }
                    DedupDecision::Suppressed { elapsed_minutes } => {
                        tracing::debug!(
                            %agent_id,
                            break_type = %window.break_type,
                            reminder_kind = %kind,
                            elapsed_minutes,
                            "notification suppressed by dedup gap"
                        );
                    }
                }
            }
        }

        Ok(due)
    }

    /// Runs one full evaluation pass over every agent with a shift
    ///
    /// This is the manual trigger as well as the body of the poll loop.
    /// Returns the number of notifications actually dispatched. Per-agent
    /// failures are logged and skipped; they never abort the pass.
    pub async fn run_once(self: &Arc<Self>) -> usize {
        let agents = match self.shifts.agents_with_shifts().await {
            Ok(agents) => agents,
            Err(e) => {
                tracing::error!(error = %e, "failed to list agents for evaluation pass");
                return 0;
            }
        };

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_agents.max(1)));
        let mut tasks: JoinSet<usize> = JoinSet::new();

        for agent_id in agents {
            let engine = Arc::clone(self);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return 0,
                };
                engine.process_agent(agent_id).await
            });
        }

        let mut dispatched = 0;
        while let Some(outcome) = tasks.join_next().await {
            match outcome {
                Ok(count) => dispatched += count,
                // A panicking evaluation is confined to its task; the pass
                // and the next tick keep running.
                Err(e) => tracing::error!(error = %e, "agent evaluation task failed"),
            }
        }

        dispatched
    }

    /// Drives `run_once` on the configured fixed interval, forever
    pub async fn run(self: Arc<Self>) {
        tracing::info!(
            interval_secs = self.config.tick_interval.as_secs(),
            zone = %self.clock.zone(),
            "break reminder scheduler started"
        );

        let mut interval = tokio::time::interval(self.config.tick_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            let dispatched = self.run_once().await;
            if dispatched > 0 {
                tracing::info!(dispatched, "break reminder tick complete");
            } else {
                tracing::debug!("break reminder tick complete, nothing due");
            }
        }
    }

    async fn process_agent(&self, agent_id: Uuid) -> usize {
        let due = match self.evaluate_agent(agent_id).await {
            Ok(due) => due,
            Err(e) => {
                tracing::warn!(%agent_id, error = %e, "agent evaluation failed, retrying next tick");
                return 0;
            }
        };

        let mut dispatched = 0;
        for notification in due {
            let record = NewNotification {
                agent_id,
                break_type: notification.break_type,
                reminder_kind: notification.reminder_kind,
                anchor_date: notification.anchor_date,
                slot: notification.slot,
                message: notification.message,
                payload: notification.payload,
            };
            match self.dispatcher.record(&record).await {
                Ok(Some(_)) => dispatched += 1,
                Ok(None) => {} // concurrent tick got there first
                Err(e) => {
                    tracing::warn!(
                        %agent_id,
                        break_type = %record.break_type,
                        reminder_kind = %record.reminder_kind,
                        error = %e,
                        "dispatch failed, abandoning this break for the tick"
                    );
                }
            }
        }
        dispatched
    }

    async fn taken_state(
        &self,
        agent_id: Uuid,
        break_type: BreakType,
        date: NaiveDate,
    ) -> Result<TakenState, SchedulerError> {
        let has_completed = self
            .sessions
            .has_taken_break(agent_id, break_type, date)
            .await?;
        // One store round-trip saved when the break is already done
        let has_open = if has_completed {
            false
        } else {
            self.sessions
                .find_open_session(agent_id, break_type, date)
                .await?
                .is_some()
        };
        Ok(TakenState::from_store(has_completed, has_open))
    }
}

/// The reminder kinds whose predicates hold at this offset, with their
/// repeat slots
fn candidate_kinds(
    offset: i32,
    window: &BreakWindow,
    taken: TakenState,
    shift_len: i32,
) -> Vec<(ReminderKind, i32)> {
    let mut kinds = Vec::new();
    if availability::available_soon(offset, window, taken) {
        kinds.push((ReminderKind::AvailableSoon, 0));
    }
    if availability::available_now(offset, window, taken) {
        kinds.push((ReminderKind::AvailableNow, 0));
    }
    if availability::reminder_due(offset, window, taken) {
        kinds.push((ReminderKind::ReminderDue, reminder_slot(offset, window)));
    }
    if availability::ending_soon(offset, window, taken) {
        kinds.push((ReminderKind::EndingSoon, 0));
    }
    if availability::missed(offset, window, taken, shift_len) {
        kinds.push((ReminderKind::Missed, missed_slot(offset, window)));
    }
    kinds
}

/// Builds the user-facing message and its remaining/elapsed minutes figure
fn build_message(kind: ReminderKind, window: &BreakWindow, offset: i32) -> (String, i32) {
    let label = window.break_type.label();
    match kind {
        ReminderKind::AvailableSoon => {
            let minutes = window.start_offset - offset;
            (format!("{label} opens in {minutes} minutes"), minutes)
        }
        ReminderKind::AvailableNow => {
            let minutes = window.end_offset - offset;
            (
                format!("{label} is available now ({minutes} minutes left in the window)"),
                minutes,
            )
        }
        ReminderKind::ReminderDue => {
            let minutes = offset - window.start_offset;
            (
                format!("{label} has been available for {minutes} minutes and is still untaken"),
                minutes,
            )
        }
        ReminderKind::EndingSoon => {
            let minutes = window.end_offset - offset;
            (format!("{label} window closes in {minutes} minutes"), minutes)
        }
        ReminderKind::Missed => {
            let minutes = offset - window.end_offset;
            (
                format!("{label} was missed; its window closed {minutes} minutes ago"),
                minutes,
            )
        }
    }
}
