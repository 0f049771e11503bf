use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ReportConfig;
use crate::error::{Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The Zendesk endpoints the aggregation engine depends on.
///
/// `ZendeskClient` is the production implementation; tests drive the engine
/// with in-memory fakes. Futures here are awaited in place, never spawned.
#[allow(async_fn_in_trait)]
pub trait ZendeskApi {
    /// One page of `search.json` results for a raw query string.
    async fn search_page(&self, query: &str, page: u32, per_page: u32) -> Result<SearchPage>;

    /// All groups visible to the authenticated agent.
    async fn groups(&self) -> Result<Vec<Group>>;

    async fn user(&self, id: u64) -> Result<User>;

    async fn organization(&self, id: u64) -> Result<Organization>;
}

/// Authenticated Zendesk API client.
#[derive(Clone)]
pub struct ZendeskClient {
    client: reqwest::Client,
    base_url: String,
    email: String,
    token: String,
}

impl ZendeskClient {
    pub fn new(config: &ReportConfig) -> Result<Self> {
        Self::with_base_url(&config.api_base_url(), &config.email, &config.token)
    }

    /// Create a client against a custom base URL (for testing).
    pub fn with_base_url(base_url: &str, email: &str, token: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Config(format!("could not build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            email: email.to_string(),
            token: token.to_string(),
        })
    }

    /// Issue a GET against `endpoint` (path + query, relative to the API
    /// base) and decode the JSON body. Exactly one attempt; no retries.
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .basic_auth(format!("{}/token", self.email), Some(&self.token))
            .send()
            .await
            .map_err(|e| Error::api(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| Error::api(endpoint, e))
    }
}

impl ZendeskApi for ZendeskClient {
    async fn search_page(&self, query: &str, page: u32, per_page: u32) -> Result<SearchPage> {
        self.get(&search_endpoint(query, page, per_page)).await
    }

    async fn groups(&self) -> Result<Vec<Group>> {
        let response: GroupsResponse = self.get("groups.json").await?;
        Ok(response.groups)
    }

    async fn user(&self, id: u64) -> Result<User> {
        let response: UserResponse = self.get(&format!("users/{id}.json")).await?;
        Ok(response.user)
    }

    async fn organization(&self, id: u64) -> Result<Organization> {
        let response: OrganizationResponse =
            self.get(&format!("organizations/{id}.json")).await?;
        Ok(response.organization)
    }
}

fn search_endpoint(query: &str, page: u32, per_page: u32) -> String {
    format!(
        "search.json?query={}&per_page={}&page={}",
        urlencoding::encode(query),
        per_page,
        page
    )
}

// ── Wire schema ──────────────────────────────────────────────────

/// A ticket as returned by the search API. Unknown upstream fields are
/// ignored; absent optional fields decode to their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: u64,
    #[serde(default)]
    pub subject: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub requester_id: Option<u64>,
    #[serde(default)]
    pub organization_id: Option<u64>,
    #[serde(default)]
    pub group_id: Option<u64>,
}

/// One page of search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub results: Vec<Ticket>,
    /// Server-side total across all pages. Logged for sanity checks only;
    /// reported totals always come from the concatenated result lists.
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct GroupsResponse {
    #[serde(default)]
    groups: Vec<Group>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct UserResponse {
    user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct OrganizationResponse {
    organization: Organization,
}

/// In-memory `ZendeskApi` for engine tests: canned pages per query, injected
/// failures, and a call log for asserting what was (not) fetched.
#[cfg(test)]
pub(crate) mod fake {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use chrono::TimeZone;

    use super::*;
    use crate::query::{DateWindow, SearchQuery};

    #[derive(Default)]
    pub struct FakeApi {
        pages_by_query: HashMap<String, Vec<Vec<Ticket>>>,
        default_pages: Vec<Vec<Ticket>>,
        fail_search_from_page: Option<u32>,
        fail_groups: bool,
        group_list: Vec<Group>,
        users: HashMap<u64, String>,
        orgs: HashMap<u64, String>,
        pub calls: RefCell<CallLog>,
    }

    #[derive(Default)]
    pub struct CallLog {
        pub search: Vec<(String, u32)>,
        pub groups: u32,
        pub users: Vec<u64>,
        pub orgs: Vec<u64>,
    }

    impl FakeApi {
        pub fn new() -> Self {
            Self::default()
        }

        /// Serve one page of `tickets` for every search query.
        pub fn with_tickets(mut self, tickets: Vec<Ticket>) -> Self {
            self.default_pages = vec![tickets];
            self
        }

        /// Serve explicit pages, in order, for every search query.
        pub fn with_pages(mut self, pages: Vec<Vec<Ticket>>) -> Self {
            self.default_pages = pages;
            self
        }

        /// Serve one page of `tickets` for the window's sweep query only.
        pub fn with_window_tickets(mut self, window: &DateWindow, tickets: Vec<Ticket>) -> Self {
            let query = SearchQuery::tickets().created_in(window).build();
            self.pages_by_query.insert(query, vec![tickets]);
            self
        }

        /// Fail every search request from `page` onward.
        pub fn fail_search_from_page(mut self, page: u32) -> Self {
            self.fail_search_from_page = Some(page);
            self
        }

        pub fn with_groups(mut self, groups: Vec<(u64, &str)>) -> Self {
            self.group_list = groups
                .into_iter()
                .map(|(id, name)| Group {
                    id,
                    name: name.to_string(),
                })
                .collect();
            self
        }

        pub fn failing_groups(mut self) -> Self {
            self.fail_groups = true;
            self
        }

        pub fn with_user(mut self, id: u64, name: &str) -> Self {
            self.users.insert(id, name.to_string());
            self
        }

        pub fn with_org(mut self, id: u64, name: &str) -> Self {
            self.orgs.insert(id, name.to_string());
            self
        }

        pub fn search_calls(&self) -> usize {
            self.calls.borrow().search.len()
        }

        pub fn user_calls(&self) -> usize {
            self.calls.borrow().users.len()
        }

        pub fn org_calls(&self) -> usize {
            self.calls.borrow().orgs.len()
        }

        fn not_found(endpoint: &str) -> Error {
            Error::Status {
                endpoint: endpoint.to_string(),
                status: 404,
            }
        }
    }

    impl ZendeskApi for FakeApi {
        async fn search_page(&self, query: &str, page: u32, _per_page: u32) -> Result<SearchPage> {
            self.calls
                .borrow_mut()
                .search
                .push((query.to_string(), page));
            if let Some(fail_from) = self.fail_search_from_page {
                if page >= fail_from {
                    return Err(Error::Status {
                        endpoint: "search.json".to_string(),
                        status: 500,
                    });
                }
            }
            let pages = self
                .pages_by_query
                .get(query)
                .unwrap_or(&self.default_pages);
            let results = pages
                .get(page as usize - 1)
                .cloned()
                .unwrap_or_default();
            let count = pages.iter().map(|p| p.len() as u64).sum();
            Ok(SearchPage { results, count })
        }

        async fn groups(&self) -> Result<Vec<Group>> {
            self.calls.borrow_mut().groups += 1;
            if self.fail_groups {
                return Err(Error::Status {
                    endpoint: "groups.json".to_string(),
                    status: 500,
                });
            }
            Ok(self.group_list.clone())
        }

        async fn user(&self, id: u64) -> Result<User> {
            self.calls.borrow_mut().users.push(id);
            match self.users.get(&id) {
                Some(name) => Ok(User {
                    id,
                    name: name.clone(),
                }),
                None => Err(Self::not_found(&format!("users/{id}.json"))),
            }
        }

        async fn organization(&self, id: u64) -> Result<Organization> {
            self.calls.borrow_mut().orgs.push(id);
            match self.orgs.get(&id) {
                Some(name) => Ok(Organization {
                    id,
                    name: name.clone(),
                }),
                None => Err(Self::not_found(&format!("organizations/{id}.json"))),
            }
        }
    }

    pub fn ticket(id: u64, tags: &[&str]) -> Ticket {
        Ticket {
            id,
            subject: format!("Ticket {id}"),
            created_at: Utc.with_ymd_and_hms(2025, 8, 19, 12, 0, 0).unwrap(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            requester_id: None,
            organization_id: None,
            group_id: None,
        }
    }

    pub fn ticket_in_group(id: u64, tags: &[&str], group_id: u64) -> Ticket {
        Ticket {
            group_id: Some(group_id),
            ..ticket(id, tags)
        }
    }
}
