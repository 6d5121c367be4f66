//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `web_radar` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use web_radar::app::{format_statistics, normalize_url};
use web_radar::config::{DB_PATH, DEFAULT_BATCH_SIZE, DEFAULT_HISTORY_LIMIT, SETTINGS_PATH};
use web_radar::initialization::init_logger_with;
use web_radar::{
    export_report, run_analysis, Country, Filters, LogFormat, LogLevel, ReportFormat,
    ReportOptions, RunConfig, Sector, SqliteStore,
};

#[derive(Debug, Parser)]
#[command(
    name = "web_radar",
    version,
    about = "Scores websites on on-page SEO signals and tracks them by country and sector."
)]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, value_enum, global = true, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log format: plain or json
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Plain)]
    log_format: LogFormat,

    /// SQLite database file
    #[arg(long, global = true, default_value = DB_PATH)]
    db_path: PathBuf,

    /// Analyzer settings file (JSON, created with defaults when missing)
    #[arg(long, global = true, default_value = SETTINGS_PATH)]
    settings: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyze every URL in a list (text file, .csv, or `-` for stdin)
    Analyze {
        file: PathBuf,

        /// Only keep sites detected in this country (`all` for no filter)
        #[arg(long)]
        country: Option<String>,

        /// Only keep sites detected in this sector (`all` for no filter)
        #[arg(long)]
        sector: Option<String>,

        /// URLs analyzed in parallel per batch
        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,

        /// Write a report of this run's stored results
        #[arg(long)]
        report: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = ReportFormat::Html)]
        report_format: ReportFormat,
    },

    /// List stored analyses, most recent first
    History {
        #[arg(long)]
        country: Option<String>,

        #[arg(long)]
        sector: Option<String>,

        #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: usize,
    },

    /// Print the latest stored analysis of a URL as JSON
    Show { url: String },

    /// Print aggregate statistics over stored analyses
    Stats,

    /// Render a report from stored analyses
    Report {
        #[arg(long)]
        output: PathBuf,

        #[arg(long, value_enum, default_value_t = ReportFormat::Html)]
        format: ReportFormat,

        #[arg(long)]
        country: Option<String>,

        #[arg(long)]
        sector: Option<String>,

        /// Only scored sites below 60, lowest score first
        #[arg(long)]
        priority: bool,

        #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: usize,
    },
}

/// `all` (any case) or no value means "no filter".
fn parse_label<T: FromStr>(raw: Option<&str>, what: &str) -> Result<Option<T>> {
    match raw.map(str::trim) {
        None => Ok(None),
        Some(value) if value.eq_ignore_ascii_case("all") => Ok(None),
        Some(value) => T::from_str(value)
            .map(Some)
            .map_err(|_| anyhow!("Unknown {what}: {value}")),
    }
}

fn parse_filters(country: Option<&str>, sector: Option<&str>) -> Result<Filters> {
    Ok(Filters {
        country: parse_label::<Country>(country, "country")?,
        sector: parse_label::<Sector>(sector, "sector")?,
    })
}

async fn open_store(db_path: &Path) -> Result<SqliteStore> {
    SqliteStore::open(db_path)
        .await
        .with_context(|| format!("Failed to open database {}", db_path.display()))
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Analyze {
            file,
            country,
            sector,
            batch_size,
            report,
            report_format,
        } => {
            let config = RunConfig {
                file,
                db_path: cli.db_path,
                settings_path: cli.settings,
                batch_size,
                filters: parse_filters(country.as_deref(), sector.as_deref())?,
                report: report.map(|path| (path, report_format)),
            };
            let report = run_analysis(config).await?;
            println!(
                "✅ Analyzed {} URL{} ({} scored, {} failed, {} filtered) in {:.1}s{}",
                report.requested,
                if report.requested == 1 { "" } else { "s" },
                report.scored,
                report.failed,
                report.filtered,
                report.elapsed_seconds,
                if report.cancelled { " - cancelled" } else { "" }
            );
            println!("Results saved in {}", report.db_path.display());
        }
        Command::History {
            country,
            sector,
            limit,
        } => {
            let filters = parse_filters(country.as_deref(), sector.as_deref())?;
            let store = open_store(&cli.db_path).await?;
            let rows = store.history(&filters, limit).await?;
            if rows.is_empty() {
                println!("No analyses stored yet.");
            }
            for row in rows {
                println!(
                    "{}  {:>3}/100  {:<8} {:<16} {:<14} {:>2} issues  {}",
                    row.created_at.format("%Y-%m-%d %H:%M:%S"),
                    row.score,
                    row.outcome,
                    row.country,
                    row.sector,
                    row.issues_count,
                    row.url
                );
            }
            store.close().await;
        }
        Command::Show { url } => {
            let store = open_store(&cli.db_path).await?;
            let url = normalize_url(&url);
            let latest = store.latest_by_url(&url).await?;
            store.close().await;
            let analysis = latest.ok_or_else(|| anyhow!("No analysis stored for {url}"))?;
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
        Command::Stats => {
            let store = open_store(&cli.db_path).await?;
            let statistics = store.statistics().await?;
            store.close().await;
            print!("{}", format_statistics(&statistics));
        }
        Command::Report {
            output,
            format,
            country,
            sector,
            priority,
            limit,
        } => {
            let options = ReportOptions {
                output,
                format,
                filters: parse_filters(country.as_deref(), sector.as_deref())?,
                priority_only: priority,
                limit,
            };
            let store = open_store(&cli.db_path).await?;
            let written = export_report(&store, &options).await?;
            store.close().await;
            println!(
                "Report with {} analyses written to {}",
                written,
                options.output.display()
            );
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // This allows setting WEB_RADAR_MOBILE_API_KEY in .env without exporting it manually
    if dotenvy::dotenv().is_err() {
        // If .env not found in current dir, try next to the executable
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = run(cli).await {
        eprintln!("web_radar error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
