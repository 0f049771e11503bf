//! Weekly email digest.
//!
//! Renders the multipart pieces (subject, HTML body, plain-text
//! alternative); delivery is left to whatever sends the mail.

use crate::date_util::{short_month_day, short_month_day_year};
use crate::report::Report;

use super::escape_html;

/// Where the digest's call-to-action points.
const DASHBOARD_URL: &str = "https://lucaswillett.github.io/zendesk-dashboard/";

/// Rendered parts for a multipart/alternative email.
#[derive(Debug, Clone)]
pub struct Digest {
    pub subject: String,
    pub html: String,
    pub plain: String,
}

pub fn render_digest(report: &Report) -> Digest {
    let week_start = short_month_day(report.week.window.start());
    let week_end = short_month_day_year(report.week.window.end());

    let week_beta = report.week.metrics.matched;
    let week_pct = report.week.metrics.percentage;
    let alltime_beta = report.alltime.metrics.matched;
    let alltime_pct = report.alltime.metrics.percentage;

    let status = status_line(week_beta);
    let tags_line = tags_line(report);

    let subject = format!("Weekly Beta Summary: {week_start} - {week_end}");

    let html = format!(
        r#"
    <div style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 600px; margin: 0 auto;">
        <div style="background: #1a2332; color: white; padding: 30px; border-radius: 12px;">
            <h1 style="margin: 0 0 5px 0; font-size: 24px;">Weekly Beta Summary</h1>
            <p style="margin: 0; color: rgba(255,255,255,0.6); font-size: 14px;">{week_start} - {week_end}</p>
        </div>

        <div style="padding: 30px 0;">
            <p style="font-size: 16px; color: #333; margin-bottom: 20px;">{status}</p>

            <table style="width: 100%; border-collapse: collapse; margin-bottom: 20px;">
                <tr>
                    <td style="padding: 15px; background: #f5f5f5; border-radius: 8px; text-align: center; width: 50%;">
                        <div style="font-size: 32px; font-weight: bold; color: #4a9aa8;">{week_beta}</div>
                        <div style="font-size: 12px; color: #666; text-transform: uppercase;">This Week</div>
                    </td>
                    <td style="width: 20px;"></td>
                    <td style="padding: 15px; background: #f5f5f5; border-radius: 8px; text-align: center; width: 50%;">
                        <div style="font-size: 32px; font-weight: bold; color: #1a2332;">{week_pct}%</div>
                        <div style="font-size: 12px; color: #666; text-transform: uppercase;">Beta %</div>
                    </td>
                </tr>
            </table>

            <p style="font-size: 14px; color: #666; margin-bottom: 10px;"><strong>Tags this week:</strong> {escaped_tags}</p>
            <p style="font-size: 14px; color: #666;"><strong>Since launch:</strong> {alltime_beta} total ({alltime_pct}% of support volume)</p>
        </div>

        <div style="border-top: 1px solid #eee; padding-top: 20px;">
            <a href="{DASHBOARD_URL}" style="display: inline-block; background: #4a9aa8; color: white; padding: 12px 24px; border-radius: 6px; text-decoration: none; font-weight: 500;">View Full Dashboard &rarr;</a>
        </div>

        <p style="font-size: 12px; color: #999; margin-top: 30px;">This summary is automatically generated every Friday.</p>
    </div>
    "#,
        escaped_tags = escape_html(&tags_line),
    );

    let plain = format!(
        r#"
Weekly Beta Summary
{week_start} - {week_end}

{status}

This Week: {week_beta} beta-tagged tickets ({week_pct}%)
Tags: {tags_line}
Since Launch: {alltime_beta} total ({alltime_pct}%)

View Dashboard: {DASHBOARD_URL}
"#
    );

    Digest {
        subject,
        html,
        plain,
    }
}

fn status_line(week_beta: u64) -> String {
    if week_beta == 0 {
        "No beta-tagged tickets this week - looking good! 🎉".to_string()
    } else if week_beta <= 2 {
        format!(
            "{week_beta} beta-tagged ticket{} this week.",
            if week_beta > 1 { "s" } else { "" }
        )
    } else {
        format!("{week_beta} beta-tagged tickets this week - worth monitoring.")
    }
}

/// Per-tag counts over the week's beta tickets, in taxonomy order.
fn tags_line(report: &Report) -> String {
    let counts: Vec<String> = report
        .beta_tags
        .iter()
        .filter_map(|tag| {
            let count = report
                .week
                .tickets
                .iter()
                .filter(|t| t.beta_tags.iter().any(|bt| bt == tag))
                .count();
            (count > 0).then(|| format!("{count} {tag}"))
        })
        .collect();
    if counts.is_empty() {
        "No new beta tags this week".to_string()
    } else {
        counts.join(", ")
    }
}
