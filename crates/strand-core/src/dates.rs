//! Calendar-day arithmetic
//!
//! All gap and tolerance logic in the crate works on whole calendar days,
//! not raw durations: a capture logged at 23:50 and one at 00:10 the next
//! morning are one day apart, not 0.01 days. The original app leaned on a
//! calendar API whose missing day component silently defaulted to 0; here
//! the day difference is an explicit, tested function.

use chrono::{DateTime, Duration, Utc};

/// Signed whole-day difference between two timestamps, `to - from`
///
/// Computed on the calendar dates, so time of day never contributes.
pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to.date_naive() - from.date_naive()).num_days()
}

/// The timestamp `n` days before `now`
pub fn days_ago(now: DateTime<Utc>, n: i64) -> DateTime<Utc> {
    now - Duration::days(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_days_between_same_day() {
        let morning = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2026, 3, 1, 23, 0, 0).unwrap();
        assert_eq!(days_between(morning, evening), 0);
    }

    #[test]
    fn test_days_between_crosses_midnight() {
        // 20 minutes apart on the clock, but different calendar days
        let late = Utc.with_ymd_and_hms(2026, 3, 1, 23, 50, 0).unwrap();
        let early = Utc.with_ymd_and_hms(2026, 3, 2, 0, 10, 0).unwrap();
        assert_eq!(days_between(late, early), 1);
    }

    #[test]
    fn test_days_between_signed() {
        let a = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2026, 3, 8, 12, 0, 0).unwrap();
        assert_eq!(days_between(a, b), 7);
        assert_eq!(days_between(b, a), -7);
    }

    #[test]
    fn test_days_ago() {
        let now = Utc.with_ymd_and_hms(2026, 3, 31, 12, 0, 0).unwrap();
        let target = days_ago(now, 30);
        assert_eq!(days_between(target, now), 30);
    }
}
