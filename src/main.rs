//! CLI entry point for the bikeshare explorer.
//!
//! Provides an interactive session that mirrors the classic prompt loop and a
//! one-shot `report` subcommand for scripted use.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bikeshare_explorer::analyzers::analyzer::run;
use bikeshare_explorer::dataset::{City, DatasetConfig, Loader};
use bikeshare_explorer::filter::{DayFilter, FilterSpec, MonthFilter};
use bikeshare_explorer::output::{print_json, print_pretty, print_text};
use bikeshare_explorer::prompt::session;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_explorer")]
#[command(about = "Explore US bikeshare trip data", long_about = None)]
struct Cli {
    /// Directory containing chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, global = true, env = "BIKESHARE_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prompt for a city, month and day, print statistics, and offer a restart
    Explore,
    /// Print statistics for one city and filter selection
    Report {
        /// chicago, "new york city" or washington
        #[arg(short, long)]
        city: City,

        /// Month name (january..june) or "all"
        #[arg(short, long, default_value = "all")]
        month: MonthFilter,

        /// Day name (monday..sunday) or "all"
        #[arg(short, long, default_value = "all")]
        day: DayFilter,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_explorer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_explorer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    // Stderr stays at warn by default so it does not interleave with the prompts.
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(log_filter(
            std::env::var("RUST_LOG").ok().as_deref(),
            LevelFilter::WARN,
        ));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(non_blocking_file)
        .with_filter(log_filter(
            std::env::var("RUST_LOG_JSON").ok().as_deref(),
            LevelFilter::DEBUG,
        ));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let config = DatasetConfig::from_data_dir(&cli.data_dir);
    for (city, path) in config.iter() {
        debug!(city = %city, path = %path.display(), "Dataset resource");
    }
    let loader = Loader::new(config);

    match cli.command {
        Commands::Explore => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            session(&loader, &mut stdin.lock(), &mut stdout.lock())?;
        }
        Commands::Report {
            city,
            month,
            day,
            format,
        } => {
            let spec = FilterSpec::new(city, month, day);
            let report = run(&loader, &spec)
                .with_context(|| format!("Failed to build report for {city}"))?;
            print_pretty(&report);

            match format {
                Format::Text => print_text(&report),
                Format::Json => print_json(&report)?,
            }
        }
    }

    Ok(())
}

/// Builds a layer filter from a directive string, falling back to `default`
/// when the variable is unset or holds no valid directive.
fn log_filter(directives: Option<&str>, default: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default.into())
        .parse_lossy(directives.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_env_value_wins() {
        let filter = log_filter(Some("debug"), LevelFilter::WARN);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_log_filter_default_when_unset() {
        let filter = log_filter(None, LevelFilter::WARN);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));

        let filter = log_filter(Some(""), LevelFilter::DEBUG);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }
}
