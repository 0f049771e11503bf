use crate::error::{Error, Result};

/// Agent-facing URL for a ticket.
pub fn ticket_url(subdomain: &str, id: u64) -> String {
    format!("https://{subdomain}.zendesk.com/agent/tickets/{id}")
}

/// Zendesk Explore studio dashboards for the account.
pub fn explore_dashboard_url(subdomain: &str) -> String {
    format!("https://{subdomain}.zendesk.com/explore/studio#/dashboards")
}

/// Check if a string looks like a bare ticket ID (all digits).
pub fn is_ticket_id(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Extract the ticket ID from a Zendesk URL.
///
/// Supported URL patterns:
/// - `https://<subdomain>.zendesk.com/agent/tickets/<id>` (trailing view
///   segments allowed)
/// - `https://<subdomain>.zendesk.com/api/v2/tickets/<id>.json`
/// - `https://<subdomain>.zendesk.com/hc/<locale>/requests/<id>`
///
/// If the input is not a Zendesk URL, returns an error.
pub fn parse_ticket_url(input: &str) -> Result<u64> {
    let url = url::Url::parse(input).map_err(|e| Error::UrlParse(e.to_string()))?;

    let host = url.host_str().unwrap_or("");
    if !host.contains("zendesk.com") {
        return Err(Error::UrlParse(format!("not a Zendesk URL: {input}")));
    }

    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.collect())
        .unwrap_or_default();

    let id = segments
        .iter()
        .position(|s| *s == "tickets" || *s == "requests")
        .and_then(|i| segments.get(i + 1))
        .map(|s| s.trim_end_matches(".json"))
        .filter(|s| is_ticket_id(s));

    match id {
        Some(id) => id
            .parse()
            .map_err(|e| Error::UrlParse(format!("bad ticket ID in URL: {e}"))),
        None => Err(Error::UrlParse(format!("no ticket ID in URL: {input}"))),
    }
}

/// Extract a ticket ID from either a raw numeric ID or a pasted Zendesk URL.
pub fn resolve_ticket_id(input: &str) -> Result<u64> {
    if is_ticket_id(input) {
        return input
            .parse()
            .map_err(|e| Error::UrlParse(format!("ticket ID out of range: {e}")));
    }
    if input.contains("zendesk.com") {
        return parse_ticket_url(input);
    }
    Err(Error::UrlParse(format!(
        "expected a ticket ID or Zendesk URL, got: {input}"
    )))
}
