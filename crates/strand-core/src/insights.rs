//! Progress insight generation
//!
//! Composes the matching and streak engines into the ranked insight list
//! shown on the dashboard. Pure function of its inputs; callers pass the
//! clock so nothing here reads ambient state.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::dates::days_between;
use crate::matching::{find_session_days_ago, DEFAULT_TOLERANCE_DAYS};
use crate::models::{InsightType, ProgressInsight, ReminderSettings, Session, Treatment};

/// Minimum streak before the streak insight is worth showing
const STREAK_THRESHOLD: u32 = 2;

/// Minimum days between first and latest capture for the "Since Day 1" card
const FIRST_CAPTURE_MIN_DAYS: i64 = 14;

/// Generate all available progress insights
///
/// `sessions_desc` must be sorted newest first (the canonical order of the
/// tracker's session collection). Emission order is part of the contract:
/// one-month, three-month, first-capture, streak. Insights whose
/// qualifying data is missing are silently omitted.
pub fn generate(
    now: DateTime<Utc>,
    sessions_desc: &[Session],
    _treatments: &[Treatment],
    settings: &ReminderSettings,
) -> Vec<ProgressInsight> {
    let mut insights = Vec::new();

    // 1-month comparison
    if let (Some(recent), Some(month_ago)) = (
        sessions_desc.first(),
        find_session_days_ago(now, 30, sessions_desc, DEFAULT_TOLERANCE_DAYS),
    ) {
        insights.push(ProgressInsight {
            insight_type: InsightType::OneMonthComparison,
            title: "1 Month Progress".to_string(),
            subtitle: "Compare your progress over the last month".to_string(),
            before_session: Some(month_ago.clone()),
            after_session: Some(recent.clone()),
        });
    }

    // 3-month comparison
    if let (Some(recent), Some(three_months_ago)) = (
        sessions_desc.first(),
        find_session_days_ago(now, 90, sessions_desc, DEFAULT_TOLERANCE_DAYS),
    ) {
        insights.push(ProgressInsight {
            insight_type: InsightType::ThreeMonthComparison,
            title: "3 Month Progress".to_string(),
            subtitle: "See how far you've come in 3 months".to_string(),
            before_session: Some(three_months_ago.clone()),
            after_session: Some(recent.clone()),
        });
    }

    // First capture comparison, once two weeks of history exist
    if sessions_desc.len() >= 2 {
        if let (Some(latest), Some(first)) = (sessions_desc.first(), sessions_desc.last()) {
            let span = days_between(first.date, latest.date);
            if span >= FIRST_CAPTURE_MIN_DAYS {
                insights.push(ProgressInsight {
                    insight_type: InsightType::FirstCapture,
                    title: "Since Day 1".to_string(),
                    subtitle: format!("{} days of progress", span),
                    before_session: Some(first.clone()),
                    after_session: Some(latest.clone()),
                });
            }
        }
    }

    // Streak insight
    if settings.current_streak >= STREAK_THRESHOLD {
        insights.push(ProgressInsight {
            insight_type: InsightType::Streak,
            title: format!("{} Captures in a Row", settings.current_streak),
            subtitle: "Keep the streak going!".to_string(),
            before_session: None,
            after_session: None,
        });
    }

    debug!(count = insights.len(), "Generated progress insights");
    insights
}
