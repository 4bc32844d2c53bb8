use chrono::NaiveTime;
use thiserror::Error;

use super::value_objects::ShiftKind;

/// Errors raised while resolving a shift configuration string
///
/// These are configuration problems, not runtime failures: every consumer
/// treats them as "no breaks apply for this agent" and logs at debug level.
#[derive(Debug, Error)]
pub enum ShiftConfigError {
    #[error("shift configuration is empty")]
    Empty,

    #[error("malformed shift configuration {0:?} (expected \"H:MM AM/PM - H:MM AM/PM\")")]
    Malformed(String),

    #[error("invalid time {0:?} in shift configuration: {1}")]
    InvalidTime(String, chrono::ParseError),
}

/// A shift schedule resolved from its configured text form
///
/// Represents an agent's daily work period as two time-of-day values in
/// minutes since midnight (0-1439). The schedule is never persisted in this
/// form; it is re-resolved from the raw configuration on every evaluation so
/// a shift change takes effect on the next tick.
///
/// # Invariants
/// - `start_minutes` and `end_minutes` are both in `0..1440`
/// - `kind()` is `Overnight` iff `end_minutes <= start_minutes`
///
/// # Example
/// ```
/// use breakwatch_api::domain::shift::{ShiftKind, ShiftSchedule};
///
/// let shift = ShiftSchedule::parse("6:00 AM - 3:00 PM").expect("valid shift");
/// assert_eq!(shift.start_minutes(), 360);
/// assert_eq!(shift.end_minutes(), 900);
/// assert_eq!(shift.kind(), ShiftKind::Day);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftSchedule {
    start_minutes: u16,
    end_minutes: u16,
}

impl ShiftSchedule {
    /// Parses a shift configuration string
    ///
    /// Accepts the `"H:MM AM/PM - H:MM AM/PM"` format used by the agent
    /// profile screen. 12-hour rules apply: `"12:00 AM"` is midnight (0)
    /// and `"12:00 PM"` is noon (720).
    pub fn parse(text: &str) -> Result<Self, ShiftConfigError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ShiftConfigError::Empty);
        }

        let (start_raw, end_raw) = trimmed
            .split_once('-')
            .ok_or_else(|| ShiftConfigError::Malformed(trimmed.to_string()))?;

        let start = parse_time_of_day(start_raw.trim())?;
        let end = parse_time_of_day(end_raw.trim())?;

        Ok(Self {
            start_minutes: start,
            end_minutes: end,
        })
    }

    /// Resolves an optional shift configuration
    ///
    /// Absent configuration is a normal state (`Ok(None)`): the agent simply
    /// has no breaks. Only present-but-unparsable text is an error.
    pub fn resolve(text: Option<&str>) -> Result<Option<Self>, ShiftConfigError> {
        match text {
            None => Ok(None),
            Some(t) if t.trim().is_empty() => Ok(None),
            Some(t) => Self::parse(t).map(Some),
        }
    }

    /// Returns the shift start as minutes since midnight
    pub fn start_minutes(&self) -> u16 {
        self.start_minutes
    }

    /// Returns the shift end as minutes since midnight
    pub fn end_minutes(&self) -> u16 {
        self.end_minutes
    }

    /// Returns whether this shift is a day or overnight shift
    pub fn kind(&self) -> ShiftKind {
        if self.end_minutes <= self.start_minutes {
            ShiftKind::Overnight
        } else {
            ShiftKind::Day
        }
    }

    /// Returns true for shifts that wrap past midnight
    pub fn is_overnight(&self) -> bool {
        self.kind() == ShiftKind::Overnight
    }

    /// Total shift length in minutes, wraparound-aware
    pub fn len_minutes(&self) -> i32 {
        let start = i32::from(self.start_minutes);
        let end = i32::from(self.end_minutes);
        if self.is_overnight() {
            1440 - start + end
        } else {
            end - start
        }
    }

    /// Minutes elapsed since shift start for a clock time-of-day
    ///
    /// For overnight shifts a naive subtraction that goes negative means the
    /// clock has wrapped past midnight, so 1440 is added back. For day
    /// shifts a negative result is meaningful (before shift start) and is
    /// returned as-is.
    pub fn offset_from_start(&self, now_minutes: u16) -> i32 {
        let offset = i32::from(now_minutes) - i32::from(self.start_minutes);
        if offset < 0 && self.is_overnight() {
            offset + 1440
        } else {
            offset
        }
    }

    /// True when the given clock time falls inside the active shift span
    pub fn contains(&self, now_minutes: u16) -> bool {
        let offset = self.offset_from_start(now_minutes);
        offset >= 0 && offset < self.len_minutes()
    }
}

/// Converts a time-of-day to minutes since midnight
pub fn minutes_of_day(time: NaiveTime) -> u16 {
    use chrono::Timelike;
    (time.hour() * 60 + time.minute()) as u16
}

fn parse_time_of_day(raw: &str) -> Result<u16, ShiftConfigError> {
    let time = NaiveTime::parse_from_str(raw, "%I:%M %p")
        .map_err(|e| ShiftConfigError::InvalidTime(raw.to_string(), e))?;
    Ok(minutes_of_day(time))
}
