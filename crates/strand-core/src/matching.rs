//! Temporal matching engine
//!
//! Nearest-session lookup with a tolerance window, used for "N days ago"
//! comparisons on the dashboard.

use chrono::{DateTime, Utc};

use crate::dates::{days_ago, days_between};
use crate::models::Session;

/// Default tolerance window for "N days ago" lookups, in days
pub const DEFAULT_TOLERANCE_DAYS: i64 = 10;

/// Find the session nearest to `target`, within `tolerance_days`
///
/// Only candidates whose calendar-day distance from the target is at most
/// `tolerance_days` are considered; among those the smallest absolute day
/// difference wins. Ties break toward the earlier session date, so the
/// result is deterministic regardless of input order.
pub fn find_nearest(
    target: DateTime<Utc>,
    candidates: &[Session],
    tolerance_days: i64,
) -> Option<&Session> {
    let mut best: Option<(&Session, i64)> = None;

    for session in candidates {
        let diff = days_between(session.date, target).abs();
        if diff > tolerance_days {
            continue;
        }
        match best {
            None => best = Some((session, diff)),
            Some((current, current_diff)) => {
                if diff < current_diff || (diff == current_diff && session.date < current.date) {
                    best = Some((session, diff));
                }
            }
        }
    }

    best.map(|(session, _)| session)
}

/// Find the session closest to `days` before `now`
pub fn find_session_days_ago(
    now: DateTime<Utc>,
    days: i64,
    candidates: &[Session],
    tolerance_days: i64,
) -> Option<&Session> {
    find_nearest(days_ago(now, days), candidates, tolerance_days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 31, 12, 0, 0).unwrap()
    }

    fn session_days_ago(days: i64) -> Session {
        Session::new(now() - Duration::days(days))
    }

    #[test]
    fn test_empty_candidates() {
        assert!(find_nearest(now(), &[], 10).is_none());
    }

    #[test]
    fn test_no_candidate_within_tolerance() {
        let sessions = vec![session_days_ago(50), session_days_ago(55)];
        assert!(find_session_days_ago(now(), 30, &sessions, 10).is_none());
    }

    #[test]
    fn test_picks_nearest() {
        let sessions = vec![session_days_ago(40), session_days_ago(28), session_days_ago(20)];
        let found = find_session_days_ago(now(), 30, &sessions, 10).unwrap();
        assert_eq!(found.date, sessions[1].date);
    }

    #[test]
    fn test_exact_match_wins() {
        let sessions = vec![session_days_ago(33), session_days_ago(30), session_days_ago(27)];
        let found = find_session_days_ago(now(), 30, &sessions, 10).unwrap();
        assert_eq!(found.date, sessions[1].date);
    }

    #[test]
    fn test_tie_breaks_to_earlier_date() {
        // -31 and -29 are both one day from the target; the earlier wins
        let newer = session_days_ago(29);
        let older = session_days_ago(31);
        for sessions in [vec![newer.clone(), older.clone()], vec![older.clone(), newer.clone()]] {
            let found = find_session_days_ago(now(), 30, &sessions, 10).unwrap();
            assert_eq!(found.date, older.date);
        }
    }

    #[test]
    fn test_boundary_of_tolerance_included() {
        let sessions = vec![session_days_ago(40)];
        assert!(find_session_days_ago(now(), 30, &sessions, 10).is_some());
        assert!(find_session_days_ago(now(), 30, &sessions, 9).is_none());
    }

    #[test]
    fn test_result_is_within_tolerance() {
        let sessions: Vec<Session> = (0..120).step_by(7).map(session_days_ago).collect();
        for days in [7, 30, 60, 90] {
            if let Some(found) = find_session_days_ago(now(), days, &sessions, 10) {
                let diff = crate::dates::days_between(found.date, crate::dates::days_ago(now(), days)).abs();
                assert!(diff <= 10);
            }
        }
    }
}
