use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::classify::MatchedTicket;
use crate::query::DateWindow;

/// Counts for one date window.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WindowMetrics {
    /// Tickets in the window after group filtering.
    pub total: u64,
    /// Subset carrying at least one tracked tag.
    pub matched: u64,
    /// `round(matched / total * 100, 1)`; `0` when the window is empty.
    pub percentage: f64,
    /// False when any page of the window's sweep failed. Zero counts then
    /// mean "fetch failed", not "no tickets".
    pub complete: bool,
}

impl WindowMetrics {
    pub fn from_counts(total: u64, matched: u64, complete: bool) -> Self {
        Self {
            total,
            matched,
            percentage: percentage(matched, total),
            complete,
        }
    }
}

/// Share of `matched` in `total`, rounded to one decimal place.
pub fn percentage(matched: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (matched as f64 / total as f64 * 1000.0).round() / 10.0
}

/// Metrics plus the matched tickets for one aggregated window.
#[derive(Debug, Clone, Serialize)]
pub struct WindowReport {
    pub window: DateWindow,
    pub metrics: WindowMetrics,
    pub matched: Vec<MatchedTicket>,
}

/// One week of the reporting horizon, oldest first in the report. Future
/// weeks carry no metrics: they are placeholders, never fetched.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub window: DateWindow,
    pub metrics: Option<WindowMetrics>,
}

/// A matched ticket decorated for display.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedTicket {
    pub id: u64,
    pub subject: String,
    pub created_at: DateTime<Utc>,
    pub requester: String,
    pub organization: String,
    pub beta_tags: Vec<String>,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounds_to_one_decimal() {
        assert_eq!(percentage(2, 3), 66.7);
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(1, 1), 100.0);
        assert_eq!(percentage(1, 8), 12.5);
    }

    #[test]
    fn test_percentage_of_empty_window_is_zero() {
        assert_eq!(percentage(0, 0), 0.0);
    }

    #[test]
    fn test_percentage_zero_matched() {
        assert_eq!(percentage(0, 50), 0.0);
    }

    #[test]
    fn test_from_counts() {
        let m = WindowMetrics::from_counts(3, 2, true);
        assert_eq!(m.total, 3);
        assert_eq!(m.matched, 2);
        assert_eq!(m.percentage, 66.7);
        assert!(m.complete);

        let degraded = WindowMetrics::from_counts(0, 0, false);
        assert_eq!(degraded.percentage, 0.0);
        assert!(!degraded.complete);
    }
}
