use std::sync::Mutex;

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Clock capability: current instant plus the organization's canonical zone
///
/// Every time comparison in the engine flows through one injected clock, so
/// scenarios are deterministic in tests and there is exactly one place where
/// zone conversion happens (no ad hoc fixed-hour offsets).
pub trait Clock: Send + Sync {
    /// The current instant
    fn now_utc(&self) -> DateTime<Utc>;

    /// The organization's canonical time zone
    fn zone(&self) -> Tz;

    /// The current wall-clock time in the canonical zone
    fn now_local(&self) -> NaiveDateTime {
        self.now_utc().with_timezone(&self.zone()).naive_local()
    }
}

/// Production clock backed by the system time
pub struct SystemClock {
    zone: Tz,
}

impl SystemClock {
    pub fn new(zone: Tz) -> Self {
        Self { zone }
    }
}

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn zone(&self) -> Tz {
        self.zone
    }
}

/// Manually-advanced clock for tests and replay
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
    zone: Tz,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>, zone: Tz) -> Self {
        Self {
            now: Mutex::new(now),
            zone,
        }
    }

    /// Moves the clock to a new instant
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }

    /// Advances the clock by whole minutes
    pub fn advance_minutes(&self, minutes: i64) {
        let mut guard = self.now.lock().unwrap();
        *guard += chrono::Duration::minutes(minutes);
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }

    fn zone(&self) -> Tz {
        self.zone
    }
}
