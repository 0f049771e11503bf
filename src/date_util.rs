use chrono::NaiveDate;

/// Format a date as "Aug 18" for digest headings.
pub fn short_month_day(d: NaiveDate) -> String {
    d.format("%b %d").to_string()
}

/// Format a date as "Aug 24, 2025" for digest headings.
pub fn short_month_day_year(d: NaiveDate) -> String {
    d.format("%b %d, %Y").to_string()
}

/// Strip markdown code fences from LLM responses.
pub fn strip_code_fences(s: &str) -> &str {
    let s = s.trim();
    if let Some(rest) = s.strip_prefix("```json") {
        rest.strip_suffix("```").unwrap_or(rest).trim()
    } else if let Some(rest) = s.strip_prefix("```") {
        rest.strip_suffix("```").unwrap_or(rest).trim()
    } else {
        s
    }
}
