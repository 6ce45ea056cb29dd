//! Day-based activity streaks.
//!
//! Days are calendar days in the device's local timezone. The calculator
//! itself only sees [`NaiveDate`]s; converting "now" into a local date
//! happens at the edge via [`local_today`].

use chrono::{Local, NaiveDate};

/// Outcome of recording an activity on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakChange {
    /// Already active today.
    Unchanged,
    /// Active yesterday, streak grows.
    Extended,
    /// First activity, or a gap of more than one day.
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakUpdate {
    pub streak: u32,
    pub change: StreakChange,
    /// Replaces the stored last-activity date.
    pub last_activity: NaiveDate,
}

/// Compute the streak after an activity on `today`.
///
/// A last-activity date in the future (clock moved backwards) breaks the
/// streak like any other gap.
pub fn next_streak(current: u32, last_activity: Option<NaiveDate>, today: NaiveDate) -> StreakUpdate {
    let (streak, change) = match last_activity.map(|last| (today - last).num_days()) {
        Some(0) => (current, StreakChange::Unchanged),
        Some(1) => (current.saturating_add(1), StreakChange::Extended),
        _ => (1, StreakChange::Reset),
    };
    StreakUpdate {
        streak,
        change,
        last_activity: today,
    }
}

/// Today's date in the local timezone.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
