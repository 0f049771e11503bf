use std::collections::HashSet;

use crate::client::{Ticket, ZendeskApi};

/// Narrows ticket sets to the configured support teams.
///
/// An empty ID set means the filter is open: every ticket passes. That is
/// the degraded state when no configured name resolves upstream, so a team
/// rename widens the report instead of silently zeroing it.
#[derive(Debug, Clone, Default)]
pub struct GroupFilter {
    ids: HashSet<u64>,
}

impl GroupFilter {
    /// A filter that passes everything.
    pub fn open() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.ids.is_empty()
    }

    /// Keep tickets belonging to a resolved group. Tickets without a group
    /// assignment are excluded unless the filter is open.
    pub fn apply(&self, tickets: Vec<Ticket>) -> Vec<Ticket> {
        if self.ids.is_empty() {
            return tickets;
        }
        tickets
            .into_iter()
            .filter(|t| t.group_id.is_some_and(|gid| self.ids.contains(&gid)))
            .collect()
    }
}

/// Resolve configured team names to group IDs, once per run.
///
/// Matching is case-insensitive. Any failure mode (listing call rejected,
/// no name matched, nothing configured) yields the open filter.
pub async fn resolve_group_filter<A: ZendeskApi>(api: &A, names: &[String]) -> GroupFilter {
    if names.is_empty() {
        return GroupFilter::open();
    }

    let groups = match api.groups().await {
        Ok(groups) => groups,
        Err(e) => {
            log::warn!("group listing failed, reporting across all teams: {e}");
            return GroupFilter::open();
        }
    };

    let mut ids = HashSet::new();
    for name in names {
        match groups.iter().find(|g| g.name.eq_ignore_ascii_case(name)) {
            Some(group) => {
                log::debug!("resolved group {:?} to id {}", name, group.id);
                ids.insert(group.id);
            }
            None => log::warn!("configured group {name:?} not found upstream"),
        }
    }

    if ids.is_empty() {
        log::warn!("no configured group names resolved; reporting across all teams");
    }
    GroupFilter::from_ids(ids)
}
