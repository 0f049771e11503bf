use std::env;

use chrono::NaiveDate;

use crate::error::{Error, Result};

/// Default tag taxonomy tracked by the report.
pub const DEFAULT_BETA_TAGS: [&str; 4] = ["ux_assets", "ux_feedback", "ux_login", "ux_redirect"];

/// Default team whose tickets the report covers.
pub const DEFAULT_GROUP_NAMES: [&str; 1] = ["Support"];

/// Default all-time anchor: the Monday the beta launched.
pub const DEFAULT_LAUNCH_DATE: (i32, u32, u32) = (2025, 6, 2);

/// Configuration for a report run.
///
/// Credentials come from `ZENDESK_SUBDOMAIN` / `ZENDESK_EMAIL` /
/// `ZENDESK_TOKEN`; everything else has defaults matching the production
/// dashboard and can be overridden per run.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Zendesk subdomain, e.g. `visitingmedia` for visitingmedia.zendesk.com.
    pub subdomain: String,
    /// Agent email for basic auth (sent as `<email>/token`).
    pub email: String,
    /// API token paired with the email.
    pub token: String,
    /// Ordered tag taxonomy; matching tags are reported in this order.
    pub beta_tags: Vec<String>,
    /// Team names narrowing the ticket population. Unresolvable names make
    /// the filter a no-op rather than zeroing the report.
    pub group_names: Vec<String>,
    /// Start of the all-time window and of the weekly history horizon.
    pub launch_date: NaiveDate,
    /// End of the weekly history horizon. `None` means today; a future date
    /// pads the history with placeholder weeks.
    pub history_end: Option<NaiveDate>,
    /// Search page size. Zendesk caps search pages at 100.
    pub page_size: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        let (y, m, d) = DEFAULT_LAUNCH_DATE;
        Self {
            subdomain: "visitingmedia".to_string(),
            email: String::new(),
            token: String::new(),
            beta_tags: DEFAULT_BETA_TAGS.iter().map(|s| s.to_string()).collect(),
            group_names: DEFAULT_GROUP_NAMES.iter().map(|s| s.to_string()).collect(),
            launch_date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            history_end: None,
            page_size: 100,
        }
    }
}

impl ReportConfig {
    /// Build a config from the `ZENDESK_*` environment variables, falling
    /// back to defaults for everything else.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(subdomain) = env::var("ZENDESK_SUBDOMAIN") {
            config.subdomain = subdomain;
        }
        config.email = env::var("ZENDESK_EMAIL")
            .map_err(|_| Error::Config("ZENDESK_EMAIL is not set".to_string()))?;
        config.token = env::var("ZENDESK_TOKEN")
            .map_err(|_| Error::Config("ZENDESK_TOKEN is not set".to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants a run depends on.
    pub fn validate(&self) -> Result<()> {
        if self.subdomain.trim().is_empty() {
            return Err(Error::Config("subdomain must not be empty".to_string()));
        }
        if self.email.trim().is_empty() {
            return Err(Error::Config("email must not be empty".to_string()));
        }
        if self.token.trim().is_empty() {
            return Err(Error::Config("token must not be empty".to_string()));
        }
        if self.beta_tags.is_empty() {
            return Err(Error::Config(
                "at least one beta tag must be configured".to_string(),
            ));
        }
        if self.page_size == 0 || self.page_size > 100 {
            return Err(Error::Config(format!(
                "page_size must be 1-100, got {}",
                self.page_size
            )));
        }
        Ok(())
    }

    /// Base URL for API calls against this subdomain.
    pub fn api_base_url(&self) -> String {
        format!("https://{}.zendesk.com/api/v2", self.subdomain)
    }
}
