use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::shift::{minutes_of_day, ShiftSchedule};

/// The break types an agent can take during one shift
///
/// Day shifts get Morning/Lunch/Afternoon; overnight shifts get the
/// night-shift equivalents at the same offsets from shift start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakType {
    Morning,
    Lunch,
    Afternoon,
    NightFirst,
    NightMeal,
    NightSecond,
}

impl BreakType {
    /// Stable wire/storage name for this break type
    pub fn as_str(&self) -> &'static str {
        match self {
            BreakType::Morning => "morning",
            BreakType::Lunch => "lunch",
            BreakType::Afternoon => "afternoon",
            BreakType::NightFirst => "night_first",
            BreakType::NightMeal => "night_meal",
            BreakType::NightSecond => "night_second",
        }
    }

    /// Human-readable label used in notification messages
    pub fn label(&self) -> &'static str {
        match self {
            BreakType::Morning => "Morning break",
            BreakType::Lunch => "Lunch break",
            BreakType::Afternoon => "Afternoon break",
            BreakType::NightFirst => "First night break",
            BreakType::NightMeal => "Night meal break",
            BreakType::NightSecond => "Second night break",
        }
    }

    /// Parses a stored wire name back into a break type
    pub fn from_str_name(name: &str) -> Option<Self> {
        match name {
            "morning" => Some(BreakType::Morning),
            "lunch" => Some(BreakType::Lunch),
            "afternoon" => Some(BreakType::Afternoon),
            "night_first" => Some(BreakType::NightFirst),
            "night_meal" => Some(BreakType::NightMeal),
            "night_second" => Some(BreakType::NightSecond),
            _ => None,
        }
    }
}

impl std::fmt::Display for BreakType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Fixed offsets from shift start, in minutes. The break policy does not
// scale with shift length; a short shift can compute a window past its own
// end (preserved behavior, see DESIGN.md).
const FIRST_BREAK: (i32, i32) = (120, 180);
const MEAL_BREAK: (i32, i32) = (240, 420);
const SECOND_BREAK: (i32, i32) = (465, 525);

/// A break window derived from a shift schedule
///
/// Offsets are minutes since shift start, which keeps all containment and
/// elapsed/remaining arithmetic wraparound-free even when the window's clock
/// time crosses midnight. Windows are never persisted; they are recomputed
/// from the current shift configuration on every evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakWindow {
    pub break_type: BreakType,
    /// Window open, minutes since shift start (inclusive)
    pub start_offset: i32,
    /// Window close, minutes since shift start (exclusive)
    pub end_offset: i32,
}

impl BreakWindow {
    /// Window length in minutes
    pub fn duration_minutes(&self) -> i32 {
        self.end_offset - self.start_offset
    }

    /// Clock time-of-day at which the window opens (minutes since midnight)
    pub fn start_clock_minutes(&self, shift: &ShiftSchedule) -> u16 {
        ((i32::from(shift.start_minutes()) + self.start_offset) % 1440) as u16
    }

    /// Clock time-of-day at which the window closes (minutes since midnight)
    pub fn end_clock_minutes(&self, shift: &ShiftSchedule) -> u16 {
        ((i32::from(shift.start_minutes()) + self.end_offset) % 1440) as u16
    }
}

/// Derives the ordered break windows for a resolved shift
///
/// # Invariants
/// - Windows are ordered by start offset
/// - No two windows for one shift overlap
pub fn break_windows(shift: &ShiftSchedule) -> Vec<BreakWindow> {
    let types: [BreakType; 3] = if shift.is_overnight() {
        [
            BreakType::NightFirst,
            BreakType::NightMeal,
            BreakType::NightSecond,
        ]
    } else {
        [BreakType::Morning, BreakType::Lunch, BreakType::Afternoon]
    };

    vec![
        BreakWindow {
            break_type: types[0],
            start_offset: FIRST_BREAK.0,
            end_offset: FIRST_BREAK.1,
        },
        BreakWindow {
            break_type: types[1],
            start_offset: MEAL_BREAK.0,
            end_offset: MEAL_BREAK.1,
        },
        BreakWindow {
            break_type: types[2],
            start_offset: SECOND_BREAK.0,
            end_offset: SECOND_BREAK.1,
        },
    ]
}

/// The anchor date for a local instant within a shift
///
/// Windows, sessions and notifications are keyed by the shift's *start*
/// calendar date. For an overnight shift, a clock time before the shift's
/// start time belongs to the instance that started the previous day.
pub fn anchor_date(shift: &ShiftSchedule, now_local: NaiveDateTime) -> NaiveDate {
    let now_minutes = minutes_of_day(now_local.time());
    if shift.is_overnight() && now_minutes < shift.start_minutes() {
        now_local
            .date()
            .checked_sub_days(Days::new(1))
            .unwrap_or_else(|| now_local.date())
    } else {
        now_local.date()
    }
}
