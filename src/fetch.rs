use std::collections::HashSet;

use crate::client::{Ticket, ZendeskApi};
use crate::query::{DateWindow, SearchQuery};

/// Result of a full-pagination sweep over one window.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub tickets: Vec<Ticket>,
    /// False when any page failed. Counts derived from `tickets` then
    /// undercount the window.
    pub complete: bool,
}

/// Fetch every ticket created in `window`.
///
/// Pages through `search.json` until a page comes back short or empty, so
/// windows larger than one page are still retrieved exhaustively. A failed
/// page keeps the prefix fetched so far and marks the outcome incomplete;
/// the caller decides how to degrade. Duplicate IDs across pages (the
/// backend shifting mid-sweep) are dropped, first occurrence wins.
pub async fn fetch_window<A: ZendeskApi>(
    api: &A,
    window: &DateWindow,
    page_size: u32,
) -> FetchOutcome {
    let query = SearchQuery::tickets().created_in(window).build();
    let mut tickets: Vec<Ticket> = Vec::new();
    let mut page = 1u32;

    loop {
        match api.search_page(&query, page, page_size).await {
            Ok(result) => {
                if page == 1 {
                    log::debug!("window {window}: server reports {} tickets", result.count);
                }
                let fetched = result.results.len();
                tickets.extend(result.results);
                if fetched < page_size as usize {
                    break;
                }
                page += 1;
            }
            Err(e) => {
                log::warn!("search page {page} failed for window {window}: {e}");
                return FetchOutcome {
                    tickets: dedupe_by_id(tickets),
                    complete: false,
                };
            }
        }
    }

    log::debug!(
        "window {window}: fetched {} tickets across {page} page(s)",
        tickets.len()
    );
    FetchOutcome {
        tickets: dedupe_by_id(tickets),
        complete: true,
    }
}

fn dedupe_by_id(tickets: Vec<Ticket>) -> Vec<Ticket> {
    let mut seen = HashSet::new();
    tickets.into_iter().filter(|t| seen.insert(t.id)).collect()
}
