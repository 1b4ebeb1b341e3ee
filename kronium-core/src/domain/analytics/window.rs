//! Time windows and calendar-month keys

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Half-open time range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, DomainError> {
        if start >= end {
            return Err(DomainError::validation(
                "window",
                "window start must be before its end",
            ));
        }
        Ok(Self { start, end })
    }

    /// The `days` days ending at `end`
    pub fn trailing_days(end: DateTime<Utc>, days: u32) -> Result<Self, DomainError> {
        if days == 0 {
            return Err(DomainError::validation("days", "days must be greater than 0"));
        }
        Self::new(end - Duration::days(i64::from(days)), end)
    }

    /// The window of equal length ending where this one starts
    pub fn preceding(&self) -> Self {
        Self {
            start: self.start - self.length(),
            end: self.start,
        }
    }

    pub fn length(&self) -> Duration {
        self.end - self.start
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// First day of the calendar month (UTC) containing `instant`
pub fn month_start(instant: DateTime<Utc>) -> NaiveDate {
    let date = instant.date_naive();
    // Day 1 exists in every month
    date.with_day(1).unwrap_or(date)
}

/// Display label for a month key, e.g. "Dec 2024"
pub fn month_label(month: NaiveDate) -> String {
    month.format("%b %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_trailing_window_and_predecessor() {
        let end = at(2025, 1, 31);
        let window = TimeWindow::trailing_days(end, 30).unwrap();
        assert_eq!(window.start, at(2025, 1, 1));

        let previous = window.preceding();
        assert_eq!(previous.end, window.start);
        assert_eq!(previous.length(), window.length());
        assert_eq!(previous.start, at(2024, 12, 2));
    }

    #[test]
    fn test_window_is_half_open() {
        let window = TimeWindow::new(at(2025, 1, 1), at(2025, 1, 2)).unwrap();
        assert!(window.contains(at(2025, 1, 1)));
        assert!(!window.contains(at(2025, 1, 2)));
        assert!(!window.preceding().contains(window.start));
    }

    #[test]
    fn test_invalid_windows() {
        assert!(TimeWindow::trailing_days(Utc::now(), 0).is_err());
        let now = Utc::now();
        assert!(TimeWindow::new(now, now).is_err());
    }

    #[test]
    fn test_month_key_and_label() {
        let key = month_start(at(2024, 12, 20));
        assert_eq!(key, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(month_label(key), "Dec 2024");
        assert!(key < month_start(at(2025, 1, 2)));
    }
}
