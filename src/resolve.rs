use std::collections::HashMap;

use crate::client::ZendeskApi;

/// Display name for tickets with no requester, or when the lookup fails.
pub const UNKNOWN_REQUESTER: &str = "Unknown";

/// Display name for tickets with no organization, or when the lookup fails.
pub const NO_ORGANIZATION: &str = "No Account";

/// Per-run name caches for requesters and organizations.
///
/// Built fresh for each report run and discarded afterward. Failed lookups
/// are cached as the default string, so a given ID costs at most one API
/// call per run regardless of outcome.
#[derive(Debug, Default)]
pub struct NameCache {
    users: HashMap<u64, String>,
    orgs: HashMap<u64, String>,
}

impl NameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_entries(&self) -> usize {
        self.users.len()
    }

    pub fn org_entries(&self) -> usize {
        self.orgs.len()
    }
}

/// Resolve a requester ID to a display name. `None` IDs cost nothing.
pub async fn requester_name<A: ZendeskApi>(
    api: &A,
    cache: &mut NameCache,
    id: Option<u64>,
) -> String {
    let Some(id) = id else {
        return UNKNOWN_REQUESTER.to_string();
    };
    if let Some(name) = cache.users.get(&id) {
        return name.clone();
    }

    let name = match api.user(id).await {
        Ok(user) if !user.name.trim().is_empty() => user.name,
        Ok(_) => UNKNOWN_REQUESTER.to_string(),
        Err(e) => {
            log::warn!("requester {id} lookup failed: {e}");
            UNKNOWN_REQUESTER.to_string()
        }
    };
    cache.users.insert(id, name.clone());
    name
}

/// Resolve an organization ID to a display name. `None` IDs cost nothing.
pub async fn organization_name<A: ZendeskApi>(
    api: &A,
    cache: &mut NameCache,
    id: Option<u64>,
) -> String {
    let Some(id) = id else {
        return NO_ORGANIZATION.to_string();
    };
    if let Some(name) = cache.orgs.get(&id) {
        return name.clone();
    }

    let name = match api.organization(id).await {
        Ok(org) if !org.name.trim().is_empty() => org.name,
        Ok(_) => NO_ORGANIZATION.to_string(),
        Err(e) => {
            log::warn!("organization {id} lookup failed: {e}");
            NO_ORGANIZATION.to_string()
        }
    };
    cache.orgs.insert(id, name.clone());
    name
}
