//! Reminder scheduling interface and notification copy
//!
//! The core never talks to a notification platform directly; it hands the
//! full settings record to a scheduler after every streak update or
//! settings edit. Message text is built here so every frontend shows the
//! same copy.

use crate::error::Result;
use crate::models::ReminderSettings;

/// Days without a capture before a nudge is worth sending
const NUDGE_MIN_DAYS: i64 = 2;

/// Platform reminder scheduling
///
/// Implementations consume the computed streak/frequency data; they do no
/// computation of their own.
pub trait ReminderScheduler: Send + Sync {
    /// Replace any pending reminder with one matching `settings`
    fn schedule(&self, settings: &ReminderSettings) -> Result<()>;

    /// Cancel all pending reminders
    fn cancel_all(&self) -> Result<()>;
}

/// Scheduler that does nothing, for headless use and tests
#[derive(Debug, Default, Clone, Copy)]
pub struct NullScheduler;

impl ReminderScheduler for NullScheduler {
    fn schedule(&self, _settings: &ReminderSettings) -> Result<()> {
        Ok(())
    }

    fn cancel_all(&self) -> Result<()> {
        Ok(())
    }
}

/// Body text for the recurring capture reminder
pub fn reminder_body(streak: u32) -> String {
    if streak > 0 {
        format!("You're on a {}-capture streak! Keep it going.", streak)
    } else {
        "Take your progress photos to track your hair journey.".to_string()
    }
}

/// Body text for the don't-break-your-streak nudge
///
/// Returns `None` when the last capture is too recent to nag about.
pub fn streak_nudge_body(current_streak: u32, days_since_last_capture: i64) -> Option<String> {
    if days_since_last_capture < NUDGE_MIN_DAYS {
        return None;
    }

    if current_streak > 1 {
        Some(format!(
            "You have a {}-capture streak. It's been {} days - capture today!",
            current_streak, days_since_last_capture
        ))
    } else {
        Some(format!(
            "It's been {} days since your last capture. Stay consistent!",
            days_since_last_capture
        ))
    }
}
