//! Weekly window helpers and chart series types
//!
//! This module knows what "the week ending today" means: the calendar dates
//! it covers, the short weekday labels shown under the chart, and the
//! fixed-length series type the chart consumes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of days in the weekly window
pub const DAYS_PER_WEEK: usize = 7;

/// The seven calendar dates ending at `today`, oldest first
///
/// Offset 6 days back through today, using whatever calendar day the caller
/// considers current. No timezone handling happens here.
pub fn week_window(today: NaiveDate) -> [NaiveDate; DAYS_PER_WEEK] {
    std::array::from_fn(|i| today - chrono::Duration::days((DAYS_PER_WEEK - 1 - i) as i64))
}

/// Short English weekday labels for the week ending at `today`, oldest first
///
/// These are the chart axis labels ("Mon", "Tue", ...). The last label is
/// always today's weekday.
pub fn week_labels(today: NaiveDate) -> [String; DAYS_PER_WEEK] {
    week_window(today).map(|date| date.format("%a").to_string())
}

/// Chart-ready weekly series: labels plus four parallel metric arrays
///
/// The fixed-size arrays carry the length invariant in the type. Index `i`
/// in every array refers to the same calendar day, oldest (0) to most
/// recent (6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySeries {
    /// Weekday labels, oldest first
    pub labels: [String; DAYS_PER_WEEK],
    /// Steps per day
    pub steps: [u32; DAYS_PER_WEEK],
    /// Calories burned per day (kcal)
    pub calories: [f64; DAYS_PER_WEEK],
    /// Active minutes per day
    pub active_minutes: [f64; DAYS_PER_WEEK],
    /// Sleep hours per day
    pub sleep_hours: [f64; DAYS_PER_WEEK],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_window_ends_today() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let window = week_window(today);

        assert_eq!(window[0], NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(window[6], today);
    }

    #[test]
    fn test_labels_for_a_sunday() {
        // 2024-03-10 is a Sunday, so the window runs Monday through Sunday
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let labels = week_labels(today);

        assert_eq!(labels, ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]);
    }

    #[test]
    fn test_labels_for_a_midweek_day() {
        // 2023-06-15 is a Thursday
        let today = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
        let labels = week_labels(today);

        assert_eq!(labels, ["Fri", "Sat", "Sun", "Mon", "Tue", "Wed", "Thu"]);
        assert_eq!(labels.last().map(String::as_str), Some("Thu"));
    }

    #[test]
    fn test_window_crosses_month_boundary() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let window = week_window(today);

        assert_eq!(window[0], NaiveDate::from_ymd_opt(2024, 2, 25).unwrap());
        assert_eq!(window[6], today);
    }
}
