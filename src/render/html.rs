//! Static HTML dashboard.
//!
//! Produces a fully self-contained page (inline CSS, no scripts) suitable
//! for publishing to static hosting.

use crate::metrics::EnrichedTicket;
use crate::report::Report;
use crate::url::explore_dashboard_url;

use super::escape_html;

pub fn render_dashboard(report: &Report) -> String {
    let week = &report.week;
    let mut out = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Beta Ticket Dashboard</title>
    <style>
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: linear-gradient(135deg, #1a1a2e 0%, #16213e 100%);
            min-height: 100vh;
            display: flex;
            justify-content: center;
            align-items: center;
            padding: 20px;
        }}
        .dashboard {{
            background: rgba(255,255,255,0.1);
            backdrop-filter: blur(10px);
            border-radius: 20px;
            padding: 40px;
            max-width: 600px;
            width: 100%;
            box-shadow: 0 8px 32px rgba(0,0,0,0.3);
        }}
        h1 {{
            color: #fff;
            text-align: center;
            margin-bottom: 10px;
            font-size: 28px;
        }}
        .subtitle {{
            color: rgba(255,255,255,0.6);
            text-align: center;
            margin-bottom: 40px;
            font-size: 14px;
        }}
        .metrics {{
            display: grid;
            grid-template-columns: repeat(3, 1fr);
            gap: 20px;
            margin-bottom: 30px;
        }}
        .metric {{
            background: rgba(255,255,255,0.1);
            border-radius: 15px;
            padding: 25px 15px;
            text-align: center;
        }}
        .metric-value {{
            font-size: 48px;
            font-weight: bold;
            margin-bottom: 8px;
        }}
        .metric-label {{
            color: rgba(255,255,255,0.7);
            font-size: 12px;
            text-transform: uppercase;
            letter-spacing: 1px;
        }}
        .beta .metric-value {{ color: #4285f4; }}
        .total .metric-value {{ color: #34a853; }}
        .percentage .metric-value {{ color: #ea4335; }}
        .formula {{
            text-align: center;
            color: rgba(255,255,255,0.5);
            font-size: 16px;
            margin-bottom: 20px;
        }}
        .notice {{
            text-align: center;
            color: #f4b400;
            font-size: 13px;
            margin-bottom: 20px;
        }}
        .section {{
            margin-bottom: 30px;
        }}
        .section h2 {{
            color: rgba(255,255,255,0.8);
            font-size: 16px;
            margin-bottom: 12px;
        }}
        table {{
            width: 100%;
            border-collapse: collapse;
            font-size: 13px;
        }}
        th {{
            color: rgba(255,255,255,0.5);
            text-transform: uppercase;
            font-size: 11px;
            letter-spacing: 1px;
            text-align: left;
            padding: 6px 8px;
        }}
        td {{
            color: rgba(255,255,255,0.85);
            padding: 6px 8px;
            border-top: 1px solid rgba(255,255,255,0.1);
        }}
        td.upcoming {{
            color: rgba(255,255,255,0.35);
            font-style: italic;
        }}
        td a {{
            color: #4285f4;
            text-decoration: none;
        }}
        .alltime, .views {{
            text-align: center;
            color: rgba(255,255,255,0.6);
            font-size: 14px;
            margin-bottom: 15px;
        }}
        .sentiment p {{
            color: rgba(255,255,255,0.7);
            font-size: 14px;
            margin-bottom: 8px;
        }}
        .updated {{
            text-align: center;
            color: rgba(255,255,255,0.4);
            font-size: 12px;
        }}
        .links {{
            margin-top: 30px;
            text-align: center;
        }}
        .links a {{
            color: #4285f4;
            text-decoration: none;
            margin: 0 10px;
            font-size: 14px;
        }}
        .links a:hover {{
            text-decoration: underline;
        }}
    </style>
</head>
<body>
    <div class="dashboard">
        <h1>Beta Ticket Dashboard</h1>
        <div class="subtitle">Week: {window}</div>

        <div class="metrics">
            <div class="metric beta">
                <div class="metric-value">{beta}</div>
                <div class="metric-label">Beta Tagged</div>
            </div>
            <div class="metric total">
                <div class="metric-value">{total}</div>
                <div class="metric-label">Total Tickets</div>
            </div>
            <div class="metric percentage">
                <div class="metric-value">{pct}%</div>
                <div class="metric-label">Beta %</div>
            </div>
        </div>

        <div class="formula">{beta} / {total} = {pct}%</div>
"#,
        window = week.window,
        beta = week.metrics.matched,
        total = week.metrics.total,
        pct = week.metrics.percentage,
    );

    if !report.complete() {
        out.push_str(
            "        <div class=\"notice\">Some windows could not be fully retrieved; counts may be low.</div>\n",
        );
    }

    if !week.tickets.is_empty() {
        out.push_str("        <div class=\"section\">\n");
        out.push_str("            <h2>This Week's Beta Tickets</h2>\n");
        out.push_str("            <table>\n");
        out.push_str(
            "                <tr><th>ID</th><th>Subject</th><th>Tags</th><th>Requester</th><th>Account</th></tr>\n",
        );
        for ticket in &week.tickets {
            out.push_str(&ticket_row(ticket));
        }
        out.push_str("            </table>\n");
        out.push_str("        </div>\n");
    }

    if !report.history.is_empty() {
        out.push_str("        <div class=\"section\">\n");
        out.push_str("            <h2>Weekly History</h2>\n");
        out.push_str("            <table>\n");
        out.push_str(
            "                <tr><th>Week</th><th>Beta</th><th>Total</th><th>Beta %</th></tr>\n",
        );
        for entry in &report.history {
            match &entry.metrics {
                Some(m) => out.push_str(&format!(
                    "                <tr><td>{}</td><td>{}</td><td>{}</td><td>{}%</td></tr>\n",
                    entry.window, m.matched, m.total, m.percentage
                )),
                None => out.push_str(&format!(
                    "                <tr><td>{}</td><td class=\"upcoming\" colspan=\"3\">upcoming</td></tr>\n",
                    entry.window
                )),
            }
        }
        out.push_str("            </table>\n");
        out.push_str("        </div>\n");
    }

    out.push_str(&format!(
        "        <div class=\"alltime\">Since launch: {} beta / {} total ({}%)</div>\n",
        report.alltime.metrics.matched,
        report.alltime.metrics.total,
        report.alltime.metrics.percentage
    ));

    if let Some(views) = report.help_center_views {
        out.push_str(&format!(
            "        <div class=\"views\">Help Center views this week: {views}</div>\n"
        ));
    }

    if let Some(ref sentiment) = report.sentiment {
        out.push_str("        <div class=\"section sentiment\">\n");
        out.push_str("            <h2>Sentiment</h2>\n");
        out.push_str(&format!(
            "            <p>Overall: {}</p>\n",
            escape_html(&sentiment.overall_sentiment)
        ));
        out.push_str(&format!(
            "            <p>{}</p>\n",
            escape_html(&sentiment.summary)
        ));
        out.push_str(&format!(
            "            <p>{} positive / {} neutral / {} negative</p>\n",
            sentiment.sentiment_breakdown.positive,
            sentiment.sentiment_breakdown.neutral,
            sentiment.sentiment_breakdown.negative
        ));
        out.push_str("        </div>\n");
    }

    out.push_str(&format!(
        r#"        <div class="updated">Last updated: {}</div>

        <div class="links">
            <a href="{}" target="_blank">View in Zendesk Explore</a>
        </div>
    </div>
</body>
</html>
"#,
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        explore_dashboard_url(&report.subdomain)
    ));

    out
}

fn ticket_row(ticket: &EnrichedTicket) -> String {
    format!(
        "                <tr><td><a href=\"{}\">#{}</a></td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
        ticket.url,
        ticket.id,
        escape_html(&ticket.subject),
        escape_html(&ticket.beta_tags.join(", ")),
        escape_html(&ticket.requester),
        escape_html(&ticket.organization),
    )
}
