// Scheduler layer
// The periodic driver that evaluates every agent's breaks and dispatches
// notifications, plus the clock/dedup/dispatch collaborators it needs

pub mod clock;
pub mod dedup;
pub mod dispatcher;
pub mod engine;
pub mod errors;

// Re-export main types for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use dedup::{DedupDecision, NotificationDeduplicator};
pub use dispatcher::{NotificationDispatcher, RealtimePublisher, TracingPublisher};
pub use engine::{DueNotification, ReminderScheduler, SchedulerConfig};
pub use errors::{DispatchError, SchedulerError};
