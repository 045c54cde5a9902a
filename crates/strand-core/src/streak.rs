//! Streak and consistency scoring
//!
//! The streak counts consecutive captures whose gaps stay inside the
//! reminder frequency's grace window. The consistency score is the same
//! gap test applied over the whole history as a percentage.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::dates::days_between;
use crate::models::{ReminderFrequency, ReminderSettings, Session};

/// Fixed grace period added to the frequency interval before a gap counts
/// as a miss, independent of the frequency itself
pub const GRACE_DAYS: i64 = 3;

/// Largest on-schedule gap for a frequency, in days
pub fn max_gap_days(frequency: ReminderFrequency) -> i64 {
    frequency.days() + GRACE_DAYS
}

/// Update streak counters after a new capture was recorded
///
/// Must run exactly once per capture, after the new session has been
/// prepended to `sessions_desc` (newest first) and before reminders are
/// rescheduled. The gap is measured in calendar days between the new
/// session and the one immediately before it.
pub fn update_on_capture(settings: &mut ReminderSettings, sessions_desc: &[Session]) {
    let new_streak = match (sessions_desc.first(), sessions_desc.get(1)) {
        (Some(newest), Some(previous)) => {
            let gap = days_between(previous.date, newest.date);
            if gap <= max_gap_days(settings.frequency) {
                settings.current_streak + 1
            } else {
                debug!(gap, max_gap = max_gap_days(settings.frequency), "Streak reset");
                1
            }
        }
        // First capture ever starts the streak
        _ => 1,
    };

    settings.current_streak = new_streak;
    settings.longest_streak = settings.longest_streak.max(new_streak);
}

/// Percentage of consecutive session gaps that stay on schedule
///
/// Pure function of the history: sessions are sorted ascending by date and
/// each consecutive gap is tested against `frequency.days() + 3`. Integer
/// division truncates toward zero on purpose; 99.9% reads as 99. Fewer
/// than two sessions is vacuously perfect (100).
pub fn consistency_percentage(sessions: &[Session], frequency: ReminderFrequency) -> u32 {
    if sessions.len() < 2 {
        return 100;
    }

    let mut dates: Vec<DateTime<Utc>> = sessions.iter().map(|s| s.date).collect();
    dates.sort();

    let max_gap = max_gap_days(frequency);
    let on_schedule = dates
        .windows(2)
        .filter(|pair| days_between(pair[0], pair[1]) <= max_gap)
        .count() as u32;

    on_schedule * 100 / (dates.len() as u32 - 1)
}

/// Calendar days since the most recent capture, if any
pub fn days_since_last_capture(now: DateTime<Utc>, sessions_desc: &[Session]) -> Option<i64> {
    sessions_desc.first().map(|s| days_between(s.date, now))
}
