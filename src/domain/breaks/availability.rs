//! Real-time break availability evaluation.
//!
//! Every function here is a pure predicate over `(offset, window, taken)`,
//! where `offset` is minutes since shift start (already wraparound-normalized
//! by [`ShiftSchedule::offset_from_start`]). Callers re-read the taken state
//! on every call; nothing is cached between ticks.
//!
//! Per (agent, break type, day) the phases advance through:
//!
//! ```text
//! NotYetOpen -> AvailableSoon -> AvailableNow -> [ReminderWindow]*
//!            -> EndingSoon -> Missed -> [MissedRepeat]* -> ShiftEnded
//! ```
//!
//! [`ShiftSchedule::offset_from_start`]: crate::domain::shift::ShiftSchedule::offset_from_start

use super::windows::BreakWindow;

/// Minutes before window open at which the heads-up notice fires
pub const AVAILABLE_SOON_LEAD_MINUTES: i32 = 15;
/// Minutes before window close at which the closing notice fires
pub const ENDING_SOON_LEAD_MINUTES: i32 = 15;
/// Cadence of repeat reminders while an open window goes untaken
pub const REMINDER_INTERVAL_MINUTES: i32 = 30;
/// Tolerance band around each reminder boundary (poll ticks are coarse)
pub const REMINDER_TOLERANCE_MINUTES: i32 = 5;
/// Cadence of repeat notices after a window closes untaken
pub const MISSED_REPEAT_MINUTES: i32 = 30;

/// Whether the agent has taken (or is taking) a given break today
///
/// A session with a non-null end time means the break was taken. An open
/// session suppresses every notification as well: an agent cannot be
/// simultaneously on a break and reminded about it, and cannot have missed
/// a break they are currently taking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TakenState {
    NotTaken,
    InProgress,
    Completed,
}

impl TakenState {
    /// Builds the state from the two store lookups
    pub fn from_store(has_completed: bool, has_open: bool) -> Self {
        if has_completed {
            TakenState::Completed
        } else if has_open {
            TakenState::InProgress
        } else {
            TakenState::NotTaken
        }
    }

    /// True when any session (open or closed) exists for this break/day
    pub fn is_taken(&self) -> bool {
        !matches!(self, TakenState::NotTaken)
    }
}

/// True iff the window opens within the next 15 minutes and the break has
/// not been taken
pub fn available_soon(offset: i32, window: &BreakWindow, taken: TakenState) -> bool {
    !taken.is_taken()
        && offset >= window.start_offset - AVAILABLE_SOON_LEAD_MINUTES
        && offset < window.start_offset
}

/// True iff the window is currently open and the break has not been taken
pub fn available_now(offset: i32, window: &BreakWindow, taken: TakenState) -> bool {
    !taken.is_taken() && offset >= window.start_offset && offset < window.end_offset
}

/// True iff an untaken open window has hit a 30-minute reminder boundary
///
/// The boundary match uses a 5-minute tolerance band on each side because
/// evaluation runs on a coarse poll tick. This predicate alone is not enough
/// to fire: the deduplicator additionally requires 25 minutes since the last
/// `reminder_due` of this kind, so adjacent bands never double-send.
pub fn reminder_due(offset: i32, window: &BreakWindow, taken: TakenState) -> bool {
    if taken.is_taken() || offset <= window.start_offset || offset >= window.end_offset {
        return false;
    }
    let since_open = offset - window.start_offset;
    if since_open < REMINDER_INTERVAL_MINUTES {
        return false;
    }
    let phase = since_open % REMINDER_INTERVAL_MINUTES;
    phase <= REMINDER_TOLERANCE_MINUTES
        || phase >= REMINDER_INTERVAL_MINUTES - REMINDER_TOLERANCE_MINUTES
}

/// True iff an untaken window closes within the next 15 minutes
pub fn ending_soon(offset: i32, window: &BreakWindow, taken: TakenState) -> bool {
    !taken.is_taken()
        && offset >= window.end_offset - ENDING_SOON_LEAD_MINUTES
        && offset < window.end_offset
}

/// True iff the window closed untaken and `now` sits on a 30-minute repeat
/// boundary, while the agent is still inside their shift span
///
/// The shift-span guard is what keeps every predicate false outside working
/// hours (the 21:16 production regression).
pub fn missed(offset: i32, window: &BreakWindow, taken: TakenState, shift_len: i32) -> bool {
    if taken.is_taken() || offset < window.end_offset {
        return false;
    }
    if offset < 0 || offset >= shift_len {
        return false;
    }
    (offset - window.end_offset) % MISSED_REPEAT_MINUTES == 0
}

/// The repeat bucket for a `reminder_due` at this offset
///
/// Offsets inside one tolerance band share a bucket, so the storage
/// uniqueness key admits at most one reminder per boundary.
pub fn reminder_slot(offset: i32, window: &BreakWindow) -> i32 {
    (offset - window.start_offset + REMINDER_TOLERANCE_MINUTES) / REMINDER_INTERVAL_MINUTES
}

/// The repeat bucket for a `missed` notice at this offset
pub fn missed_slot(offset: i32, window: &BreakWindow) -> i32 {
    (offset - window.end_offset) / MISSED_REPEAT_MINUTES
}

/// Where one break stands in its per-day lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakPhase {
    /// Break was taken (or is in progress); no further notifications
    Taken,
    /// Shift span has ended for this instant; terminal
    ShiftEnded,
    /// Too early; the window does not open for more than 15 minutes
    NotYetOpen,
    /// Window opens within 15 minutes
    AvailableSoon,
    /// Window is open
    AvailableNow,
    /// Window is open, untaken past a reminder boundary
    ReminderWindow,
    /// Window closes within 15 minutes
    EndingSoon,
    /// Window closed untaken; shift still active
    Missed,
}

/// Classifies a break's phase at a given offset
///
/// Used for diagnostics and tests; the scheduler drives off the individual
/// predicates so that overlapping notifications (e.g. `available_now` and
/// `ending_soon`) each get their own dispatch decision.
pub fn phase(offset: i32, window: &BreakWindow, taken: TakenState, shift_len: i32) -> BreakPhase {
    if taken.is_taken() {
        return BreakPhase::Taken;
    }
    if offset < 0 || offset >= shift_len {
        return BreakPhase::ShiftEnded;
    }
    if offset < window.start_offset - AVAILABLE_SOON_LEAD_MINUTES {
        return BreakPhase::NotYetOpen;
    }
    if offset < window.start_offset {
        return BreakPhase::AvailableSoon;
    }
    if offset < window.end_offset {
        if ending_soon(offset, window, taken) {
            return BreakPhase::EndingSoon;
        }
        if reminder_due(offset, window, taken) {
            return BreakPhase::ReminderWindow;
        }
        return BreakPhase::AvailableNow;
    }
    BreakPhase::Missed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::breaks::windows::{break_windows, BreakType};
    use crate::domain::shift::ShiftSchedule;

    fn day_shift() -> ShiftSchedule {
        ShiftSchedule::parse("6:00 AM - 3:00 PM").unwrap()
    }

    fn window(shift: &ShiftSchedule, bt: BreakType) -> BreakWindow {
        break_windows(shift)
            .into_iter()
            .find(|w| w.break_type == bt)
            .unwrap()
    }

    fn offset_at(shift: &ShiftSchedule, hour: u16, minute: u16) -> i32 {
        shift.offset_from_start(hour * 60 + minute)
    }

    #[test]
    fn regression_scenario_six_am_shift() {
        // Shift "6:00 AM - 3:00 PM": Morning 8-9, Lunch 10-13.
        let shift = day_shift();
        let len = shift.len_minutes();
        let morning = window(&shift, BreakType::Morning);
        let lunch = window(&shift, BreakType::Lunch);
        let afternoon = window(&shift, BreakType::Afternoon);
        let not_taken = TakenState::NotTaken;

        // 07:45 -> morning break opens in 15 minutes
        assert!(available_soon(offset_at(&shift, 7, 45), &morning, not_taken));
        assert!(!available_now(offset_at(&shift, 7, 45), &morning, not_taken));

        // 08:00 -> morning break is open
        assert!(available_now(offset_at(&shift, 8, 0), &morning, not_taken));
        assert!(!available_soon(offset_at(&shift, 8, 0), &morning, not_taken));

        // 09:45 -> lunch opens in 15 minutes
        assert!(available_soon(offset_at(&shift, 9, 45), &lunch, not_taken));

        // 12:45 -> lunch window ends in 15 minutes
        assert!(ending_soon(offset_at(&shift, 12, 45), &lunch, not_taken));

        // 21:16 -> outside shift hours: every predicate for every break
        // type must be false (observed production bug)
        let off = offset_at(&shift, 21, 16);
        for w in [&morning, &lunch, &afternoon] {
            assert!(!available_soon(off, w, not_taken));
            assert!(!available_now(off, w, not_taken));
            assert!(!reminder_due(off, w, not_taken));
            assert!(!ending_soon(off, w, not_taken));
            assert!(!missed(off, w, not_taken, len));
        }
    }

    #[test]
    fn available_soon_and_now_are_mutually_exclusive() {
        let shift = day_shift();
        let lunch = window(&shift, BreakType::Lunch);
        for offset in 0..shift.len_minutes() {
            let soon = available_soon(offset, &lunch, TakenState::NotTaken);
            let now = available_now(offset, &lunch, TakenState::NotTaken);
            assert!(!(soon && now), "both true at offset {offset}");
        }
    }

    #[test]
    fn available_now_and_missed_are_mutually_exclusive() {
        let shift = day_shift();
        let len = shift.len_minutes();
        let morning = window(&shift, BreakType::Morning);
        for offset in 0..len {
            let now = available_now(offset, &morning, TakenState::NotTaken);
            let m = missed(offset, &morning, TakenState::NotTaken, len);
            assert!(!(now && m), "both true at offset {offset}");
        }
    }

    #[test]
    fn taken_break_suppresses_every_predicate() {
        let shift = day_shift();
        let len = shift.len_minutes();
        let lunch = window(&shift, BreakType::Lunch);
        for taken in [TakenState::InProgress, TakenState::Completed] {
            for offset in 0..len {
                assert!(!available_soon(offset, &lunch, taken));
                assert!(!available_now(offset, &lunch, taken));
                assert!(!reminder_due(offset, &lunch, taken));
                assert!(!ending_soon(offset, &lunch, taken));
                assert!(!missed(offset, &lunch, taken, len));
            }
        }
    }

    #[test]
    fn reminder_fires_on_half_hour_boundaries_with_tolerance() {
        let shift = day_shift();
        let lunch = window(&shift, BreakType::Lunch); // opens at +240

        // Nothing during the first half hour
        for since in 0..REMINDER_INTERVAL_MINUTES {
            assert!(!reminder_due(
                lunch.start_offset + since,
                &lunch,
                TakenState::NotTaken
            ));
        }
        // Band around the 30-minute boundary: 25..=35 minutes after open
        for since in 25..=35 {
            assert!(reminder_due(
                lunch.start_offset + since,
                &lunch,
                TakenState::NotTaken
            ));
        }
        // Between bands
        for since in 36..55 {
            assert!(!reminder_due(
                lunch.start_offset + since,
                &lunch,
                TakenState::NotTaken
            ));
        }
        // Band around the 60-minute boundary
        for since in 55..=65 {
            assert!(reminder_due(
                lunch.start_offset + since,
                &lunch,
                TakenState::NotTaken
            ));
        }
    }

    #[test]
    fn reminder_slots_bucket_each_boundary_once() {
        let shift = day_shift();
        let lunch = window(&shift, BreakType::Lunch);
        for since in 25..=35 {
            assert_eq!(reminder_slot(lunch.start_offset + since, &lunch), 1);
        }
        for since in 55..=65 {
            assert_eq!(reminder_slot(lunch.start_offset + since, &lunch), 2);
        }
    }

    #[test]
    fn missed_repeats_every_thirty_minutes_inside_shift() {
        let shift = day_shift();
        let len = shift.len_minutes();
        let morning = window(&shift, BreakType::Morning); // closes at +180

        assert!(missed(180, &morning, TakenState::NotTaken, len));
        assert!(!missed(181, &morning, TakenState::NotTaken, len));
        assert!(missed(210, &morning, TakenState::NotTaken, len));
        assert!(missed(240, &morning, TakenState::NotTaken, len));
        assert_eq!(missed_slot(210, &morning), 1);

        // 540 is shift end; never past the shift span
        assert!(!missed(540, &morning, TakenState::NotTaken, len));
        assert!(!missed(570, &morning, TakenState::NotTaken, len));
    }

    #[test]
    fn missed_never_fires_before_shift_start() {
        let shift = day_shift();
        let morning = window(&shift, BreakType::Morning);
        assert!(!missed(-60, &morning, TakenState::NotTaken, shift.len_minutes()));
    }

    #[test]
    fn phase_sequence_for_untaken_break() {
        let shift = day_shift();
        let len = shift.len_minutes();
        let lunch = window(&shift, BreakType::Lunch);
        let not_taken = TakenState::NotTaken;

        assert_eq!(phase(0, &lunch, not_taken, len), BreakPhase::NotYetOpen);
        assert_eq!(phase(230, &lunch, not_taken, len), BreakPhase::AvailableSoon);
        assert_eq!(phase(240, &lunch, not_taken, len), BreakPhase::AvailableNow);
        assert_eq!(
            phase(270, &lunch, not_taken, len),
            BreakPhase::ReminderWindow
        );
        assert_eq!(phase(410, &lunch, not_taken, len), BreakPhase::EndingSoon);
        assert_eq!(phase(420, &lunch, not_taken, len), BreakPhase::Missed);
        assert_eq!(phase(540, &lunch, not_taken, len), BreakPhase::ShiftEnded);
        assert_eq!(
            phase(300, &lunch, TakenState::Completed, len),
            BreakPhase::Taken
        );
    }
}
