use serde::{Deserialize, Serialize};

use crate::classify::MatchedTicket;
use crate::date_util::strip_code_fences;
use crate::error::{Error, Result};

/// Sentiment call for one ticket, joined back to the ticket it describes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketSentiment {
    pub ticket_num: usize,
    pub sentiment: String,
    pub reason: String,
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub subject: String,
}

/// Positive/neutral/negative counts across the analyzed tickets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentBreakdown {
    pub positive: u32,
    pub neutral: u32,
    pub negative: u32,
}

/// Structured sentiment read over the week's beta tickets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub overall_sentiment: String,
    pub summary: String,
    #[serde(default)]
    pub sentiment_breakdown: SentimentBreakdown,
    #[serde(default)]
    pub ticket_sentiments: Vec<TicketSentiment>,
}

/// Analyze customer sentiment across the week's beta tickets.
///
/// An empty slate returns a neutral summary without calling the model.
pub async fn analyze_sentiment(
    agent: &mixtape_core::Agent,
    tickets: &[MatchedTicket],
) -> Result<SentimentSummary> {
    if tickets.is_empty() {
        return Ok(empty_summary());
    }

    let prompt = build_prompt(tickets);

    log::info!("Analyzing sentiment for {} tickets", tickets.len());
    let response = agent
        .run(&prompt)
        .await
        .map_err(|e| Error::Llm(e.to_string()))?;

    parse_response(response.text().trim(), tickets)
}

fn empty_summary() -> SentimentSummary {
    SentimentSummary {
        overall_sentiment: "neutral".to_string(),
        summary: "No beta-tagged tickets to analyze".to_string(),
        sentiment_breakdown: SentimentBreakdown::default(),
        ticket_sentiments: Vec::new(),
    }
}

fn build_prompt(tickets: &[MatchedTicket]) -> String {
    let lines: Vec<String> = tickets
        .iter()
        .enumerate()
        .map(|(i, m)| format!("Ticket {}: {}", i + 1, m.ticket.subject))
        .collect();

    format!(
        r#"Analyze the sentiment of these support tickets. For each ticket, determine if the customer sentiment is positive, neutral, or negative based on the subject line.

Tickets:
{}

Respond in JSON format:
{{
    "ticket_sentiments": [
        {{"ticket_num": 1, "sentiment": "positive/neutral/negative", "reason": "brief reason"}}
    ],
    "overall_sentiment": "positive/neutral/negative",
    "summary": "1-2 sentence summary of overall customer sentiment"
}}

Only respond with valid JSON, no other text."#,
        lines.join("\n")
    )
}

/// Parse the model's JSON (fenced or bare), recount the breakdown, and
/// join IDs and subjects back onto the per-ticket entries by position.
fn parse_response(text: &str, tickets: &[MatchedTicket]) -> Result<SentimentSummary> {
    let json_str = strip_code_fences(text);
    let mut summary: SentimentSummary = serde_json::from_str(json_str).map_err(|e| {
        Error::Llm(format!(
            "Failed to parse sentiment response: {e}\nResponse: {text}"
        ))
    })?;

    summary.sentiment_breakdown = breakdown(&summary.ticket_sentiments);
    for (i, ts) in summary.ticket_sentiments.iter_mut().enumerate() {
        if let Some(m) = tickets.get(i) {
            ts.id = m.ticket.id;
            ts.subject = m.ticket.subject.clone();
        }
    }
    Ok(summary)
}

fn breakdown(sentiments: &[TicketSentiment]) -> SentimentBreakdown {
    let mut out = SentimentBreakdown::default();
    for ts in sentiments {
        match ts.sentiment.as_str() {
            "positive" => out.positive += 1,
            "neutral" => out.neutral += 1,
            "negative" => out.negative += 1,
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::MatchedTicket;
    use crate::client::fake::ticket;

    fn matched(id: u64, subject: &str) -> MatchedTicket {
        let mut t = ticket(id, &["ux_assets"]);
        t.subject = subject.to_string();
        MatchedTicket {
            ticket: t,
            beta_tags: vec!["ux_assets".to_string()],
        }
    }

    #[test]
    fn test_empty_summary_is_neutral() {
        let s = empty_summary();
        assert_eq!(s.overall_sentiment, "neutral");
        assert_eq!(s.summary, "No beta-tagged tickets to analyze");
        assert_eq!(s.sentiment_breakdown, SentimentBreakdown::default());
        assert!(s.ticket_sentiments.is_empty());
    }

    #[test]
    fn test_prompt_numbers_tickets_from_one() {
        let tickets = vec![matched(10, "Cannot login"), matched(11, "Broken link")];
        let prompt = build_prompt(&tickets);
        assert!(prompt.contains("Ticket 1: Cannot login"));
        assert!(prompt.contains("Ticket 2: Broken link"));
        assert!(prompt.contains("Only respond with valid JSON"));
    }

    #[test]
    fn test_parse_counts_breakdown_and_joins_details() {
        let tickets = vec![matched(10, "Cannot login"), matched(11, "Love the redesign")];
        let response = r#"{
            "ticket_sentiments": [
                {"ticket_num": 1, "sentiment": "negative", "reason": "frustrated"},
                {"ticket_num": 2, "sentiment": "positive", "reason": "praise"}
            ],
            "overall_sentiment": "neutral",
            "summary": "Mixed week."
        }"#;

        let summary = parse_response(response, &tickets).unwrap();
        assert_eq!(summary.overall_sentiment, "neutral");
        assert_eq!(summary.sentiment_breakdown.positive, 1);
        assert_eq!(summary.sentiment_breakdown.negative, 1);
        assert_eq!(summary.sentiment_breakdown.neutral, 0);
        assert_eq!(summary.ticket_sentiments[0].id, 10);
        assert_eq!(summary.ticket_sentiments[0].subject, "Cannot login");
        assert_eq!(summary.ticket_sentiments[1].id, 11);
    }

    #[test]
    fn test_parse_accepts_fenced_json() {
        let tickets = vec![matched(10, "Cannot login")];
        let response = "```json\n{\"ticket_sentiments\": [], \"overall_sentiment\": \"neutral\", \"summary\": \"Quiet.\"}\n```";
        let summary = parse_response(response, &tickets).unwrap();
        assert_eq!(summary.summary, "Quiet.");
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let tickets = vec![matched(10, "Cannot login")];
        let err = parse_response("Sure! Here is my analysis.", &tickets).unwrap_err();
        assert!(err.to_string().contains("sentiment response"));
    }

    #[test]
    fn test_unrecognized_sentiment_counts_nowhere() {
        let tickets = vec![matched(10, "Cannot login")];
        let response = r#"{
            "ticket_sentiments": [
                {"ticket_num": 1, "sentiment": "mixed", "reason": "both"}
            ],
            "overall_sentiment": "neutral",
            "summary": "Odd."
        }"#;
        let summary = parse_response(response, &tickets).unwrap();
        assert_eq!(summary.sentiment_breakdown, SentimentBreakdown::default());
    }
}
