//! Lookback window generation
//!
//! Every report covers a fixed-length run of calendar days ending
//! "today". The clock is injected so report runs are reproducible in
//! tests; "today" is the clock instant truncated to its UTC day.

use crate::types::{Result, SpendtrackError};
use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Source of "now" for window generation.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A pinned instant, for deterministic report runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The `days_back` calendar days ending today, oldest first and
/// most-recent-last. Pure function of `(clock.now(), days_back)`.
pub fn lookback_window(days_back: u32, clock: &dyn Clock) -> Vec<NaiveDate> {
    let today = clock.now().date_naive();
    (0..i64::from(days_back))
        .rev()
        .map(|k| today - Duration::days(k))
        .collect()
}

/// Two-digit day-of-month labels for the chart x-axis, one per window
/// day, in the same order as the window.
pub fn day_of_month_labels(window: &[NaiveDate]) -> Vec<String> {
    window.iter().map(|d| d.format("%d").to_string()).collect()
}

/// Parse the calendar day from a query date string.
///
/// The queries return either `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`;
/// only the day part matters, so the first ten characters are parsed
/// and any time-of-day suffix is ignored.
pub fn parse_day(raw: &str) -> Result<NaiveDate> {
    let day = raw
        .get(..10)
        .ok_or_else(|| SpendtrackError::Row(format!("date too short: {raw:?}")))?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| SpendtrackError::Row(format!("unparseable date {raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed(y: i32, m: u32, d: u32, h: u32) -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap())
    }

    #[test]
    fn test_window_is_oldest_first() {
        let window = lookback_window(30, &fixed(2017, 9, 30, 0));
        assert_eq!(window.len(), 30);
        assert_eq!(window[0], NaiveDate::from_ymd_opt(2017, 9, 1).unwrap());
        assert_eq!(window[29], NaiveDate::from_ymd_opt(2017, 9, 30).unwrap());
    }

    #[test]
    fn test_window_single_day() {
        let window = lookback_window(1, &fixed(2017, 9, 30, 12));
        assert_eq!(window, vec![NaiveDate::from_ymd_opt(2017, 9, 30).unwrap()]);
    }

    #[test]
    fn test_window_crosses_month_boundary() {
        let window = lookback_window(3, &fixed(2017, 10, 1, 0));
        assert_eq!(
            window,
            vec![
                NaiveDate::from_ymd_opt(2017, 9, 29).unwrap(),
                NaiveDate::from_ymd_opt(2017, 9, 30).unwrap(),
                NaiveDate::from_ymd_opt(2017, 10, 1).unwrap(),
            ]
        );
    }

    #[test]
    fn test_window_is_deterministic() {
        let clock = fixed(2017, 9, 30, 23);
        assert_eq!(lookback_window(30, &clock), lookback_window(30, &clock));
    }

    #[test]
    fn test_time_of_day_does_not_move_the_window() {
        // Any instant within the same UTC day anchors the same window
        assert_eq!(
            lookback_window(7, &fixed(2017, 9, 30, 0)),
            lookback_window(7, &fixed(2017, 9, 30, 23))
        );
    }

    #[test]
    fn test_day_of_month_labels() {
        let window = lookback_window(3, &fixed(2017, 10, 1, 0));
        assert_eq!(day_of_month_labels(&window), vec!["29", "30", "01"]);
    }

    #[test]
    fn test_parse_day_date_only() {
        assert_eq!(
            parse_day("2017-09-01").unwrap(),
            NaiveDate::from_ymd_opt(2017, 9, 1).unwrap()
        );
    }

    #[test]
    fn test_parse_day_ignores_time_suffix() {
        assert_eq!(
            parse_day("2017-09-01 09:00:00").unwrap(),
            NaiveDate::from_ymd_opt(2017, 9, 1).unwrap()
        );
    }

    #[test]
    fn test_parse_day_rejects_garbage() {
        assert!(parse_day("not-a-date").is_err());
        assert!(parse_day("2017").is_err());
        assert!(parse_day("").is_err());
    }
}
