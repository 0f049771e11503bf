use std::sync::LazyLock;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};

static RE_WEEK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{4})-W(\d{1,2})$").unwrap());

/// A closed date interval `[start, end]`, inclusive on both ends.
///
/// Construction enforces `start <= end`; every window in the system goes
/// through here, so downstream code never re-checks ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    #[serde(rename = "start_date")]
    start: NaiveDate,
    #[serde(rename = "end_date")]
    end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::Window(format!("start {start} is after end {end}")));
        }
        Ok(Self { start, end })
    }

    /// The current reporting week: Monday on/before `today`, through `today`.
    pub fn this_week(today: NaiveDate) -> Self {
        Self {
            start: monday_on_or_before(today),
            end: today,
        }
    }

    /// A full Monday–Sunday ISO week.
    pub fn iso_week(year: i32, week: u32) -> Result<Self> {
        let start = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
            .ok_or_else(|| Error::Window(format!("invalid ISO week {year}-W{week:02}")))?;
        Ok(Self {
            start,
            end: start + Duration::days(6),
        })
    }

    /// Parse a window string in ISO-week form, e.g. `2025-W33`.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(caps) = RE_WEEK.captures(s) {
            let year: i32 = caps[1].parse().unwrap();
            let week: u32 = caps[2].parse().unwrap();
            return Self::iso_week(year, week);
        }
        Err(Error::Window(format!("unrecognized window: {s}")))
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl std::fmt::Display for DateWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// The Monday of the week containing `date` (identity for Mondays).
pub fn monday_on_or_before(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// One week of the reporting horizon. Future weeks are labeled but never
/// fetched; the aggregator emits placeholder metrics for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekSlot {
    pub window: DateWindow,
    pub future: bool,
}

/// Split a reporting horizon into consecutive Monday-start weeks.
///
/// Windows start on the Monday on/before `horizon_start` and advance seven
/// days at a time through `horizon_end`. Slots starting after `today` are
/// marked future; the last real slot is truncated so its end never passes
/// `today`. Starts are exactly seven days apart, so the sequence has no gaps
/// and no overlaps.
pub fn weekly_windows(
    horizon_start: NaiveDate,
    horizon_end: NaiveDate,
    today: NaiveDate,
) -> Vec<WeekSlot> {
    if horizon_start > horizon_end {
        return vec![];
    }

    let mut slots = Vec::new();
    let mut monday = monday_on_or_before(horizon_start);
    while monday <= horizon_end {
        let future = monday > today;
        let mut end = (monday + Duration::days(6)).min(horizon_end);
        if !future {
            end = end.min(today);
        }
        slots.push(WeekSlot {
            window: DateWindow { start: monday, end },
            future,
        });
        monday += Duration::days(7);
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_new_rejects_inverted() {
        assert!(DateWindow::new(d(2025, 8, 24), d(2025, 8, 18)).is_err());
    }

    #[test]
    fn test_new_allows_single_day() {
        let w = DateWindow::new(d(2025, 8, 18), d(2025, 8, 18)).unwrap();
        assert_eq!(w.num_days(), 1);
    }

    #[test]
    fn test_monday_on_or_before() {
        // 2025-08-18 is a Monday
        assert_eq!(monday_on_or_before(d(2025, 8, 18)), d(2025, 8, 18));
        assert_eq!(monday_on_or_before(d(2025, 8, 20)), d(2025, 8, 18));
        assert_eq!(monday_on_or_before(d(2025, 8, 24)), d(2025, 8, 18));
    }

    #[test]
    fn test_this_week_midweek() {
        let w = DateWindow::this_week(d(2025, 8, 21)); // Thursday
        assert_eq!(w.start(), d(2025, 8, 18));
        assert_eq!(w.end(), d(2025, 8, 21));
    }

    #[test]
    fn test_this_week_on_monday() {
        let w = DateWindow::this_week(d(2025, 8, 18));
        assert_eq!(w.start(), d(2025, 8, 18));
        assert_eq!(w.end(), d(2025, 8, 18));
        assert_eq!(w.num_days(), 1);
    }

    #[test]
    fn test_parse_iso_week() {
        let w = DateWindow::parse("2025-W34").unwrap();
        assert_eq!(w.start(), d(2025, 8, 18));
        assert_eq!(w.end(), d(2025, 8, 24));
        assert_eq!(w.start().weekday(), Weekday::Mon);
    }

    #[test]
    fn test_parse_single_digit_week() {
        let w = DateWindow::parse("2025-W1").unwrap();
        assert_eq!(w.start().weekday(), Weekday::Mon);
        assert_eq!(w.num_days(), 7);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(DateWindow::parse("garbage").is_err());
        assert!(DateWindow::parse("2025-W0").is_err());
        assert!(DateWindow::parse("2025-W54").is_err());
        assert!(DateWindow::parse("2025-08-18").is_err());
    }

    #[test]
    fn test_contains() {
        let w = DateWindow::new(d(2025, 8, 18), d(2025, 8, 24)).unwrap();
        assert!(w.contains(d(2025, 8, 18)));
        assert!(w.contains(d(2025, 8, 24)));
        assert!(!w.contains(d(2025, 8, 25)));
        assert!(!w.contains(d(2025, 8, 17)));
    }

    #[test]
    fn test_weekly_windows_contiguous() {
        // Launch Wednesday 2025-06-04; today well past the horizon end.
        let slots = weekly_windows(d(2025, 6, 4), d(2025, 6, 30), d(2025, 8, 24));
        assert_eq!(slots.len(), 5);
        // Aligned back to the Monday of the launch week
        assert_eq!(slots[0].window.start(), d(2025, 6, 2));
        for pair in slots.windows(2) {
            assert_eq!(
                pair[1].window.start() - pair[0].window.start(),
                Duration::days(7)
            );
            assert_eq!(
                pair[1].window.start(),
                pair[0].window.end() + Duration::days(1)
            );
        }
        assert!(slots.iter().all(|s| !s.future));
        assert!(slots.iter().all(|s| s.window.start().weekday() == Weekday::Mon));
    }

    #[test]
    fn test_weekly_windows_truncates_current_week() {
        // Today is Thursday of the second week.
        let slots = weekly_windows(d(2025, 8, 11), d(2025, 8, 21), d(2025, 8, 21));
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].window.end(), d(2025, 8, 17));
        assert_eq!(slots[1].window.start(), d(2025, 8, 18));
        assert_eq!(slots[1].window.end(), d(2025, 8, 21));
        assert!(!slots[1].future);
    }

    #[test]
    fn test_weekly_windows_future_placeholders() {
        // Horizon extends two weeks past today.
        let slots = weekly_windows(d(2025, 8, 11), d(2025, 9, 7), d(2025, 8, 21));
        assert_eq!(slots.len(), 4);
        assert!(!slots[0].future);
        assert!(!slots[1].future);
        assert!(slots[2].future);
        assert!(slots[3].future);
        assert_eq!(slots[2].window.start(), d(2025, 8, 25));
        // Real windows never pass today; future ones keep their full span.
        assert_eq!(slots[1].window.end(), d(2025, 8, 21));
        assert_eq!(slots[3].window.end(), d(2025, 9, 7));
    }

    #[test]
    fn test_weekly_windows_empty_horizon() {
        assert!(weekly_windows(d(2025, 8, 24), d(2025, 8, 18), d(2025, 8, 24)).is_empty());
    }

    #[test]
    fn test_weekly_windows_single_partial_week() {
        let slots = weekly_windows(d(2025, 8, 18), d(2025, 8, 20), d(2025, 8, 20));
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].window.start(), d(2025, 8, 18));
        assert_eq!(slots[0].window.end(), d(2025, 8, 20));
    }
}
