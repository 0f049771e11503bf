use serde::Serialize;

use crate::client::Ticket;

/// The ordered set of tags the report tracks.
#[derive(Debug, Clone)]
pub struct TagTaxonomy {
    tags: Vec<String>,
}

impl TagTaxonomy {
    /// Build a taxonomy, dropping duplicates while preserving first-seen
    /// order. Order matters: matched tags are always reported in taxonomy
    /// order, so displays stay deterministic.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = Vec::new();
        for tag in tags {
            let tag = tag.into();
            if !seen.contains(&tag) {
                seen.push(tag);
            }
        }
        Self { tags: seen }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// The subset of taxonomy tags carried by `ticket`, in taxonomy order.
    pub fn matching(&self, ticket: &Ticket) -> Vec<String> {
        self.tags
            .iter()
            .filter(|tag| ticket.tags.iter().any(|t| t == *tag))
            .cloned()
            .collect()
    }

    pub fn matches(&self, ticket: &Ticket) -> bool {
        self.tags
            .iter()
            .any(|tag| ticket.tags.iter().any(|t| t == tag))
    }
}

/// A ticket paired with its tracked tags.
#[derive(Debug, Clone, Serialize)]
pub struct MatchedTicket {
    pub ticket: Ticket,
    pub beta_tags: Vec<String>,
}

/// Keep the tickets whose tag sets intersect the taxonomy, pairing each
/// with its matching tags. Input order is preserved; unmatched tickets are
/// dropped (totals are counted before classification).
pub fn classify(tickets: &[Ticket], taxonomy: &TagTaxonomy) -> Vec<MatchedTicket> {
    tickets
        .iter()
        .filter_map(|ticket| {
            let beta_tags = taxonomy.matching(ticket);
            if beta_tags.is_empty() {
                None
            } else {
                Some(MatchedTicket {
                    ticket: ticket.clone(),
                    beta_tags,
                })
            }
        })
        .collect()
}
