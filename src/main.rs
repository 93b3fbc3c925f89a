//! CLI entry point for the bikeshare statistics tool.
//!
//! Provides subcommands for printing statistics for a city and filter,
//! paging through the filtered trips, and an interactive exploration session.

mod session;

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bikeshare_stats::{
    analyzers::analyze,
    cities::CityRegistry,
    filter::{MonthSelector, WeekdaySelector, filter},
    loader::TripLoader,
    output::{print_pretty, render_report, write_json, write_rows},
    pager::{PageCursor, page},
    parser::LoadPolicy,
    records::TripCollection,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::session::Session;

#[derive(Parser)]
#[command(name = "bikeshare_stats")]
#[command(about = "Explore US bikeshare trip data", long_about = None)]
struct Cli {
    /// Directory holding the per-city trip CSV files
    #[arg(long, global = true, env = "BIKESHARE_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// JSON file mapping city names to CSV file names (overrides the built-in cities)
    #[arg(long, global = true, env = "BIKESHARE_CITIES")]
    cities: Option<PathBuf>,

    /// Skip malformed rows instead of aborting the load
    #[arg(long, global = true, default_value_t = false)]
    skip_bad_rows: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print trip statistics for a city
    Stats {
        #[command(flatten)]
        selection: Selection,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print one page of the filtered trips as CSV
    Rows {
        #[command(flatten)]
        selection: Selection,

        /// 0-based page number
        #[arg(short, long, default_value_t = 0)]
        page: usize,
    },
    /// Interactive session: choose filters, view statistics, browse rows
    Explore,
}

#[derive(Args)]
struct Selection {
    /// City to analyze (e.g. "chicago", "new york city", "washington")
    #[arg(short, long)]
    city: String,

    /// Month to filter by (January-June), or "all"
    #[arg(short, long, default_value = "all")]
    month: String,

    /// Day of week to filter by, or "all"
    #[arg(short, long, default_value = "all")]
    day: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bikeshare_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let loader = build_loader(&cli)?;

    match cli.command {
        Commands::Stats { selection, format } => {
            let (trips, month, weekday) = load_selection(&loader, &selection)?;
            let report = analyze(&trips, month, weekday)
                .with_context(|| format!("No statistics for {}", describe(&selection)))?;
            print_pretty(&report);

            match format {
                Format::Text => print!("{}", render_report(&report)),
                Format::Json => write_json(io::stdout().lock(), &report)?,
            }
        }
        Commands::Rows {
            selection,
            page: number,
        } => {
            let (trips, _, _) = load_selection(&loader, &selection)?;
            let cursor = PageCursor::at_page(number);
            let current = page(&trips, cursor);
            if current.records.is_empty() {
                info!(
                    page = number,
                    offset = cursor.offset(),
                    total = trips.len(),
                    "Page is past the end of the selection"
                );
            }
            write_rows(io::stdout().lock(), current.records, trips.capabilities())?;
        }
        Commands::Explore => {
            let stdin = io::stdin().lock();
            let stdout = io::stdout().lock();
            Session::new(stdin, stdout, loader).run()?;
        }
    }

    Ok(())
}

fn build_loader(cli: &Cli) -> Result<TripLoader> {
    let registry = match &cli.cities {
        Some(path) => CityRegistry::load(path, &cli.data_dir)
            .with_context(|| format!("Failed to read city mapping {}", path.display()))?,
        None => CityRegistry::builtin(&cli.data_dir),
    };
    let policy = if cli.skip_bad_rows {
        LoadPolicy::Collect
    } else {
        LoadPolicy::Strict
    };
    Ok(TripLoader::new(registry).with_policy(policy))
}

/// Validates the selectors, loads the city and applies the filter.
#[tracing::instrument(skip_all, fields(city = %selection.city))]
fn load_selection(
    loader: &TripLoader,
    selection: &Selection,
) -> Result<(TripCollection, MonthSelector, WeekdaySelector)> {
    let month: MonthSelector = selection.month.parse()?;
    let weekday: WeekdaySelector = selection.day.parse()?;

    let outcome = loader
        .load(&selection.city)
        .with_context(|| format!("Failed to load trips for {}", selection.city))?;
    if !outcome.rejected.is_empty() {
        warn!(
            rejected = outcome.rejected.len(),
            "Malformed rows were skipped"
        );
    }

    let trips = filter(&outcome.collection, month, weekday);
    info!(
        %month,
        %weekday,
        total = outcome.collection.len(),
        selected = trips.len(),
        "Selection applied"
    );
    Ok((trips, month, weekday))
}

fn describe(selection: &Selection) -> String {
    format!(
        "{} (month: {}, day: {})",
        selection.city, selection.month, selection.day
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_bad_rows_selects_collect_policy() {
        let cli = Cli::try_parse_from(["bikeshare_stats", "explore"]).unwrap();
        assert_eq!(build_loader(&cli).unwrap().policy(), LoadPolicy::Strict);

        let cli = Cli::try_parse_from(["bikeshare_stats", "--skip-bad-rows", "explore"]).unwrap();
        assert_eq!(build_loader(&cli).unwrap().policy(), LoadPolicy::Collect);
    }

    #[test]
    fn test_stats_json_format_parses() {
        let cli = Cli::try_parse_from([
            "bikeshare_stats",
            "stats",
            "--city",
            "chicago",
            "--format",
            "json",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Stats {
                format: Format::Json,
                ..
            }
        ));
    }
}
