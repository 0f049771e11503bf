pub mod types;

pub use types::*;

use chrono::NaiveDate;

use crate::classify::{classify, TagTaxonomy};
use crate::client::ZendeskApi;
use crate::fetch::{fetch_window, FetchOutcome};
use crate::groups::GroupFilter;
use crate::query::weekly_windows;
use crate::query::DateWindow;

/// Aggregate one window: fetch exhaustively, apply the group filter,
/// classify, count. Fetch failures degrade to the counts of whatever was
/// retrieved, with `complete` unset.
pub async fn aggregate_window<A: ZendeskApi>(
    api: &A,
    window: &DateWindow,
    filter: &GroupFilter,
    taxonomy: &TagTaxonomy,
    page_size: u32,
) -> WindowReport {
    let FetchOutcome { tickets, complete } = fetch_window(api, window, page_size).await;
    let tickets = filter.apply(tickets);
    let total = tickets.len() as u64;
    let matched = classify(&tickets, taxonomy);
    let metrics = WindowMetrics::from_counts(total, matched.len() as u64, complete);

    log::info!(
        "window {window}: {} beta / {} total ({}%){}",
        metrics.matched,
        metrics.total,
        metrics.percentage,
        if metrics.complete { "" } else { " [incomplete]" }
    );
    WindowReport {
        window: *window,
        metrics,
        matched,
    }
}

/// Aggregate the weekly horizon into chronological entries. Weeks starting
/// after `today` are emitted as placeholders without touching the API.
pub async fn aggregate_history<A: ZendeskApi>(
    api: &A,
    horizon_start: NaiveDate,
    horizon_end: NaiveDate,
    today: NaiveDate,
    filter: &GroupFilter,
    taxonomy: &TagTaxonomy,
    page_size: u32,
) -> Vec<HistoryEntry> {
    let slots = weekly_windows(horizon_start, horizon_end, today);
    let mut entries = Vec::with_capacity(slots.len());
    for slot in slots {
        if slot.future {
            entries.push(HistoryEntry {
                window: slot.window,
                metrics: None,
            });
            continue;
        }
        let report = aggregate_window(api, &slot.window, filter, taxonomy, page_size).await;
        entries.push(HistoryEntry {
            window: slot.window,
            metrics: Some(report.metrics),
        });
    }
    entries
}
