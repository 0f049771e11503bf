//! Report assembly: windows, history, enrichment, and optional adjuncts
//! rolled into the single structure the renderers consume.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::classify::{MatchedTicket, TagTaxonomy};
use crate::client::ZendeskApi;
use crate::config::ReportConfig;
use crate::error::Result;
use crate::groups::resolve_group_filter;
use crate::llm::sentiment::{analyze_sentiment, SentimentSummary};
use crate::metrics::{
    aggregate_history, aggregate_window, EnrichedTicket, HistoryEntry, WindowMetrics,
};
use crate::query::DateWindow;
use crate::resolve::{organization_name, requester_name, NameCache};
use crate::url::ticket_url;
use crate::views::ViewsSource;

/// One reporting window with its counts and the enriched beta tickets.
#[derive(Debug, Clone, Serialize)]
pub struct WindowSection {
    pub window: DateWindow,
    pub metrics: WindowMetrics,
    pub tickets: Vec<EnrichedTicket>,
}

/// Everything the dashboard and digest renderers need, in one place.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Account the report describes.
    pub subdomain: String,
    /// The tag taxonomy the report tracked, in reporting order.
    pub beta_tags: Vec<String>,
    /// Monday of the current week through today.
    pub week: WindowSection,
    /// Launch date through today.
    pub alltime: WindowSection,
    /// One entry per Monday-aligned week of the horizon, oldest first.
    /// Weeks that have not started yet carry no metrics.
    pub history: Vec<HistoryEntry>,
    /// Help Center article views for the week, when a source was wired in.
    pub help_center_views: Option<u64>,
    /// Sentiment read over the week's beta tickets, when an agent was wired in.
    pub sentiment: Option<SentimentSummary>,
    pub generated_at: DateTime<Utc>,
}

impl Report {
    /// True when every fetched window retrieved all of its pages.
    pub fn complete(&self) -> bool {
        self.week.metrics.complete
            && self.alltime.metrics.complete
            && self
                .history
                .iter()
                .filter_map(|entry| entry.metrics.as_ref())
                .all(|m| m.complete)
    }
}

/// Assembles a [`Report`] against a Zendesk account.
///
/// Adjunct sources are optional and degrade independently: a missing or
/// failing adjunct leaves its slot empty rather than failing the run.
pub struct ReportBuilder<'a, A> {
    api: &'a A,
    config: &'a ReportConfig,
    views: Option<&'a dyn ViewsSource>,
    agent: Option<&'a mixtape_core::Agent>,
    today: Option<NaiveDate>,
}

impl<'a, A: ZendeskApi> ReportBuilder<'a, A> {
    pub fn new(api: &'a A, config: &'a ReportConfig) -> Self {
        ReportBuilder {
            api,
            config,
            views: None,
            agent: None,
            today: None,
        }
    }

    pub fn with_views(mut self, views: &'a dyn ViewsSource) -> Self {
        self.views = Some(views);
        self
    }

    pub fn with_agent(mut self, agent: &'a mixtape_core::Agent) -> Self {
        self.agent = Some(agent);
        self
    }

    /// Override the reporting day. Defaults to the local calendar date.
    pub fn on_date(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub async fn build(self) -> Result<Report> {
        let config = self.config;
        let today = self
            .today
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let taxonomy = TagTaxonomy::new(config.beta_tags.clone());

        let week_window = DateWindow::this_week(today);
        let alltime_window = DateWindow::new(config.launch_date, today)?;
        let horizon_end = config.history_end.unwrap_or(today);

        // One group resolution and one name cache for the whole run.
        let filter = resolve_group_filter(self.api, &config.group_names).await;
        let mut names = NameCache::new();

        let week = aggregate_window(self.api, &week_window, &filter, &taxonomy, config.page_size)
            .await;
        let alltime = aggregate_window(
            self.api,
            &alltime_window,
            &filter,
            &taxonomy,
            config.page_size,
        )
        .await;
        let history = aggregate_history(
            self.api,
            config.launch_date,
            horizon_end,
            today,
            &filter,
            &taxonomy,
            config.page_size,
        )
        .await;

        let week_tickets =
            enrich_tickets(self.api, &mut names, &config.subdomain, &week.matched).await;
        let alltime_tickets =
            enrich_tickets(self.api, &mut names, &config.subdomain, &alltime.matched).await;

        let help_center_views = self.views.and_then(|source| source.weekly_views());
        let sentiment = match self.agent {
            Some(agent) => match analyze_sentiment(agent, &week.matched).await {
                Ok(summary) => Some(summary),
                Err(e) => {
                    log::warn!("Sentiment analysis failed: {e}");
                    None
                }
            },
            None => None,
        };

        Ok(Report {
            subdomain: config.subdomain.clone(),
            beta_tags: taxonomy.tags().to_vec(),
            week: WindowSection {
                window: week.window,
                metrics: week.metrics,
                tickets: week_tickets,
            },
            alltime: WindowSection {
                window: alltime.window,
                metrics: alltime.metrics,
                tickets: alltime_tickets,
            },
            history,
            help_center_views,
            sentiment,
            generated_at: Utc::now(),
        })
    }
}

/// Resolve requester and organization names for the matched tickets and
/// attach agent links. History windows are never enriched; only the
/// week and all-time ticket lists surface in the rendered output.
async fn enrich_tickets<A: ZendeskApi>(
    api: &A,
    names: &mut NameCache,
    subdomain: &str,
    matched: &[MatchedTicket],
) -> Vec<EnrichedTicket> {
    let mut out = Vec::with_capacity(matched.len());
    for m in matched {
        let requester = requester_name(api, names, m.ticket.requester_id).await;
        let organization = organization_name(api, names, m.ticket.organization_id).await;
        out.push(EnrichedTicket {
            id: m.ticket.id,
            subject: m.ticket.subject.clone(),
            created_at: m.ticket.created_at,
            requester,
            organization,
            beta_tags: m.beta_tags.clone(),
            url: ticket_url(subdomain, m.ticket.id),
        });
    }
    out
}
