use chrono::NaiveDate;

use crate::query::window::DateWindow;

/// Builder for Zendesk search strings.
///
/// Produces the raw query (e.g. `type:ticket created>=2025-08-18
/// created<=2025-08-24`); URL escaping happens at the client when the
/// request is issued.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    kind: Option<String>,
    created_on_or_after: Option<NaiveDate>,
    created_on_or_before: Option<NaiveDate>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict results to tickets (`type:ticket`).
    pub fn tickets() -> Self {
        Self {
            kind: Some("ticket".to_string()),
            ..Self::default()
        }
    }

    pub fn created_on_or_after(mut self, date: NaiveDate) -> Self {
        self.created_on_or_after = Some(date);
        self
    }

    pub fn created_on_or_before(mut self, date: NaiveDate) -> Self {
        self.created_on_or_before = Some(date);
        self
    }

    /// Bound creation dates to a window (both ends inclusive).
    pub fn created_in(self, window: &DateWindow) -> Self {
        self.created_on_or_after(window.start())
            .created_on_or_before(window.end())
    }

    pub fn build(&self) -> String {
        let mut terms = Vec::new();
        if let Some(ref kind) = self.kind {
            terms.push(format!("type:{kind}"));
        }
        if let Some(date) = self.created_on_or_after {
            terms.push(format!("created>={date}"));
        }
        if let Some(date) = self.created_on_or_before {
            terms.push(format!("created<={date}"));
        }
        terms.join(" ")
    }
}
