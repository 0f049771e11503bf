pub mod classify;
pub mod client;
pub mod config;
pub mod date_util;
pub mod error;
pub mod fetch;
pub mod groups;
pub mod llm;
pub mod metrics;
pub mod query;
pub mod render;
pub mod report;
pub mod resolve;
pub mod url;
pub mod views;

pub use classify::{classify, MatchedTicket, TagTaxonomy};
pub use client::{Group, Organization, Ticket, User, ZendeskApi, ZendeskClient};
pub use config::ReportConfig;
pub use error::{Error, Result};
pub use groups::GroupFilter;
pub use metrics::{EnrichedTicket, HistoryEntry, WindowMetrics, WindowReport};
pub use query::{DateWindow, SearchQuery};
pub use report::{Report, ReportBuilder, WindowSection};
pub use url::{explore_dashboard_url, parse_ticket_url, resolve_ticket_id, ticket_url};
pub use views::{CsvViews, ViewsSource};

/// Main entry point for beta-ticket reporting against one Zendesk account.
pub struct ZenReport {
    client: ZendeskClient,
    config: ReportConfig,
}

impl ZenReport {
    /// Build from the `ZENDESK_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ReportConfig::from_env()?)
    }

    pub fn new(config: ReportConfig) -> Result<Self> {
        config.validate()?;
        let client = ZendeskClient::new(&config)?;
        Ok(Self { client, config })
    }

    /// Access the run configuration (for display in the CLI).
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    // ── Report commands ────────────────────────────────────────────

    /// Build the full report: this week, all time since launch, and the
    /// weekly history, with enriched beta tickets.
    pub async fn build_report(&self) -> Result<Report> {
        self.report_builder().build().await
    }

    /// A [`ReportBuilder`] over this account, for wiring in adjunct
    /// sources (views feed, sentiment agent) before building.
    pub fn report_builder(&self) -> ReportBuilder<'_, ZendeskClient> {
        ReportBuilder::new(&self.client, &self.config)
    }

    /// Metrics and matched tickets for a single window. Degrades rather
    /// than fails: fetch problems surface as incomplete metrics.
    pub async fn week_metrics(&self, window: &DateWindow) -> WindowReport {
        let taxonomy = TagTaxonomy::new(self.config.beta_tags.clone());
        let filter = groups::resolve_group_filter(&self.client, &self.config.group_names).await;
        metrics::aggregate_window(
            &self.client,
            window,
            &filter,
            &taxonomy,
            self.config.page_size,
        )
        .await
    }

    /// List the account's groups (debugging aid for the group filter).
    pub async fn groups(&self) -> Result<Vec<Group>> {
        self.client.groups().await
    }
}
