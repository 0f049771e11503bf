use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "zenreport", about = "Zendesk beta-ticket metrics and reporting CLI")]
struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Zendesk subdomain (overrides ZENDESK_SUBDOMAIN)
    #[arg(long)]
    subdomain: Option<String>,

    /// Agent email for API auth (overrides ZENDESK_EMAIL)
    #[arg(long)]
    email: Option<String>,

    /// API token (overrides ZENDESK_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// Tracked beta tags, comma-separated
    #[arg(long)]
    beta_tags: Option<String>,

    /// Support group names, comma-separated
    #[arg(long)]
    group_names: Option<String>,

    /// All-time anchor date (YYYY-MM-DD)
    #[arg(long)]
    launch_date: Option<String>,

    /// End of the weekly history horizon (YYYY-MM-DD, default: today)
    #[arg(long)]
    history_end: Option<String>,

    /// Search page size (1-100)
    #[arg(long)]
    page_size: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the full report and emit it as JSON
    Report {
        /// Write the JSON to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Explore CSV export to read Help Center views from
        #[arg(long)]
        views_csv: Option<PathBuf>,
        /// Analyze sentiment of the week's beta tickets
        #[arg(long)]
        sentiment: bool,
        /// LLM provider: anthropic, bedrock
        #[arg(long, default_value = "anthropic")]
        llm_provider: String,
        /// LLM model (e.g. claude-haiku-4-5)
        #[arg(long, default_value = "claude-sonnet-4-5")]
        llm_model: String,
    },
    /// Generate the static HTML dashboard
    Dashboard {
        /// Where to write the page
        #[arg(long, default_value = "index.html")]
        output: PathBuf,
        /// Explore CSV export to read Help Center views from
        #[arg(long)]
        views_csv: Option<PathBuf>,
        /// Analyze sentiment of the week's beta tickets
        #[arg(long)]
        sentiment: bool,
        /// LLM provider: anthropic, bedrock
        #[arg(long, default_value = "anthropic")]
        llm_provider: String,
        /// LLM model (e.g. claude-haiku-4-5)
        #[arg(long, default_value = "claude-sonnet-4-5")]
        llm_model: String,
    },
    /// Render the weekly digest email parts
    Email {
        /// Write subject.txt, body.html, and body.txt here instead of stdout
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Metrics for a single week
    Week {
        /// ISO week (e.g. 2025-W33); defaults to the current week
        #[arg(long)]
        week: Option<String>,
        /// Window start (YYYY-MM-DD), paired with --end
        #[arg(long)]
        start: Option<String>,
        /// Window end (YYYY-MM-DD), paired with --start
        #[arg(long)]
        end: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the account's groups (group-filter debugging aid)
    Groups,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = build_config(&cli)?;
    let zr = zenreport::ZenReport::new(config)?;

    match cli.command {
        Commands::Report {
            output,
            views_csv,
            sentiment,
            llm_provider,
            llm_model,
        } => {
            handle_report(&zr, output, views_csv, sentiment, &llm_provider, &llm_model).await?;
        }
        Commands::Dashboard {
            output,
            views_csv,
            sentiment,
            llm_provider,
            llm_model,
        } => {
            handle_dashboard(&zr, output, views_csv, sentiment, &llm_provider, &llm_model).await?;
        }
        Commands::Email { output_dir } => {
            handle_email(&zr, output_dir).await?;
        }
        Commands::Week {
            week,
            start,
            end,
            json,
        } => {
            let window = resolve_window(week.as_deref(), start.as_deref(), end.as_deref())?;
            handle_week(&zr, window, json).await?;
        }
        Commands::Groups => {
            handle_groups(&zr).await?;
        }
    }

    Ok(())
}

/// Layer the config: defaults, then environment, then CLI flags.
fn build_config(cli: &Cli) -> anyhow::Result<zenreport::ReportConfig> {
    let mut config = zenreport::ReportConfig::default();
    if let Ok(v) = std::env::var("ZENDESK_SUBDOMAIN") {
        config.subdomain = v;
    }
    if let Ok(v) = std::env::var("ZENDESK_EMAIL") {
        config.email = v;
    }
    if let Ok(v) = std::env::var("ZENDESK_TOKEN") {
        config.token = v;
    }
    if let Some(ref v) = cli.subdomain {
        config.subdomain = v.clone();
    }
    if let Some(ref v) = cli.email {
        config.email = v.clone();
    }
    if let Some(ref v) = cli.token {
        config.token = v.clone();
    }
    if let Some(ref v) = cli.beta_tags {
        config.beta_tags = split_list(v);
    }
    if let Some(ref v) = cli.group_names {
        config.group_names = split_list(v);
    }
    if let Some(ref v) = cli.launch_date {
        config.launch_date = parse_date(v)?;
    }
    if let Some(ref v) = cli.history_end {
        config.history_end = Some(parse_date(v)?);
    }
    if let Some(v) = cli.page_size {
        config.page_size = v;
    }
    Ok(config)
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

fn parse_date(s: &str) -> anyhow::Result<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("invalid date (expected YYYY-MM-DD): {s}"))
}

fn resolve_window(
    week: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
) -> anyhow::Result<zenreport::DateWindow> {
    match (week, start, end) {
        (Some(w), None, None) => Ok(zenreport::DateWindow::parse(w)?),
        (None, Some(s), Some(e)) => Ok(zenreport::DateWindow::new(parse_date(s)?, parse_date(e)?)?),
        (None, None, None) => Ok(zenreport::DateWindow::this_week(
            chrono::Local::now().date_naive(),
        )),
        _ => anyhow::bail!("pass either --week or both --start and --end"),
    }
}

/// Build the report with whichever adjunct sources the flags enabled.
async fn assemble_report(
    zr: &zenreport::ZenReport,
    views_csv: Option<PathBuf>,
    sentiment: bool,
    llm_provider: &str,
    llm_model: &str,
) -> anyhow::Result<zenreport::Report> {
    let views = views_csv.map(zenreport::CsvViews::new);
    let agent = if sentiment {
        Some(zenreport::llm::create_agent(llm_provider, llm_model).await?)
    } else {
        None
    };

    let mut builder = zr.report_builder();
    if let Some(ref views) = views {
        builder = builder.with_views(views);
    }
    if let Some(ref agent) = agent {
        builder = builder.with_agent(agent);
    }
    Ok(builder.build().await?)
}

async fn handle_report(
    zr: &zenreport::ZenReport,
    output: Option<PathBuf>,
    views_csv: Option<PathBuf>,
    sentiment: bool,
    llm_provider: &str,
    llm_model: &str,
) -> anyhow::Result<()> {
    let report = assemble_report(zr, views_csv, sentiment, llm_provider, llm_model).await?;
    let json = serde_json::to_string_pretty(&report)?;
    match output {
        Some(path) => {
            std::fs::write(&path, json)?;
            println!("Report saved to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

async fn handle_dashboard(
    zr: &zenreport::ZenReport,
    output: PathBuf,
    views_csv: Option<PathBuf>,
    sentiment: bool,
    llm_provider: &str,
    llm_model: &str,
) -> anyhow::Result<()> {
    let report = assemble_report(zr, views_csv, sentiment, llm_provider, llm_model).await?;
    let html = zenreport::render::render_dashboard(&report);
    std::fs::write(&output, html)?;
    println!("Dashboard saved to {}", output.display());
    Ok(())
}

async fn handle_email(
    zr: &zenreport::ZenReport,
    output_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let report = zr.build_report().await?;
    let digest = zenreport::render::render_digest(&report);
    match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            std::fs::write(dir.join("subject.txt"), &digest.subject)?;
            std::fs::write(dir.join("body.html"), &digest.html)?;
            std::fs::write(dir.join("body.txt"), &digest.plain)?;
            println!("Digest parts saved to {}", dir.display());
        }
        None => {
            println!("Subject: {}", digest.subject);
            print!("{}", digest.plain);
        }
    }
    Ok(())
}

async fn handle_week(
    zr: &zenreport::ZenReport,
    window: zenreport::DateWindow,
    json: bool,
) -> anyhow::Result<()> {
    let report = zr.week_metrics(&window).await;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Week {}", report.window);
        println!("  Beta:   {}", report.metrics.matched);
        println!("  Total:  {}", report.metrics.total);
        println!("  Beta %: {}%", report.metrics.percentage);
        if !report.metrics.complete {
            println!("  Warning: fetch incomplete; counts may be low");
        }
        for m in &report.matched {
            println!(
                "  #{} {} [{}]",
                m.ticket.id,
                m.ticket.subject,
                m.beta_tags.join(", ")
            );
        }
    }
    Ok(())
}

async fn handle_groups(zr: &zenreport::ZenReport) -> anyhow::Result<()> {
    let groups = zr.groups().await?;
    if groups.is_empty() {
        println!("No groups visible to this account.");
    } else {
        for group in &groups {
            println!("{:>12}  {}", group.id, group.name);
        }
    }
    Ok(())
}
