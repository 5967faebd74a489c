//! tickview CLI: inspect a price dataset and render one instrument view.
//!
//! Commands:
//! - `instruments`: list instruments with row counts and first/last dates
//! - `show`: latest price, change, chart series with SMA overlay, latest row
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tickview_core::config::ExplorerConfig;
use tickview_core::data::{load_csv, synthetic_dataset};
use tickview_core::domain::{window_start, Dataset, Selection};
use tickview_core::pipeline::{format_number, ChangeDirection};
use tickview_core::view::{Dashboard, ExplorerView};
use tracing_subscriber::EnvFilter;

/// Instruments generated by `--synthetic`.
const SYNTHETIC_INSTRUMENTS: [&str; 3] = ["SPY", "QQQ", "IWM"];

#[derive(Parser)]
#[command(name = "tickview", about = "single-instrument price explorer")]
struct Cli {
    /// TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// CSV dataset. Overrides `[data] path` from the config. Defaults to ./data.csv.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Use a generated one-year dataset instead of a CSV file.
    #[arg(long, global = true, default_value_t = false, conflicts_with = "data")]
    synthetic: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List instruments with row counts and first/last dates.
    Instruments,
    /// Render the view for one instrument and date range.
    Show {
        /// Instrument. Defaults to the first one in the dataset.
        #[arg(long)]
        ticker: Option<String>,

        /// Start date (YYYY-MM-DD). Defaults to the configured window before --end.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD). Defaults to the latest date in the dataset.
        #[arg(long)]
        end: Option<String>,

        /// Print the dashboard as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Only print the last N chart rows.
        #[arg(long)]
        tail: Option<usize>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ExplorerConfig::from_file(path)?,
        None => ExplorerConfig::default(),
    };
    let dataset = Arc::new(load_dataset(&cli, &config)?);

    match cli.command {
        Commands::Instruments => run_instruments(&dataset),
        Commands::Show {
            ticker,
            start,
            end,
            json,
            tail,
        } => run_show(dataset, &config, ticker, start, end, json, tail),
    }
}

fn load_dataset(cli: &Cli, config: &ExplorerConfig) -> Result<Dataset> {
    if cli.synthetic {
        let end = chrono::Local::now().date_naive();
        let start = end - chrono::Duration::days(365);
        return Ok(synthetic_dataset(&SYNTHETIC_INSTRUMENTS, start, end)?);
    }

    let path = cli
        .data
        .clone()
        .or_else(|| config.data.path.clone())
        .unwrap_or_else(|| PathBuf::from("data.csv"));
    load_csv(&path, &config.csv_options())
        .with_context(|| format!("Failed to load dataset: {}", path.display()))
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

fn run_instruments(dataset: &Dataset) -> Result<()> {
    let Some((first, last)) = dataset.date_bounds() else {
        println!("Dataset is empty");
        return Ok(());
    };

    println!("Rows: {}", dataset.len());
    println!("Dates: {first} to {last}");
    println!("Fingerprint: {}", dataset.fingerprint());
    println!();
    println!("{:<12} {:>8} {:>12} {:>12}", "Instrument", "Rows", "First", "Last");
    println!("{}", "-".repeat(47));
    for id in dataset.instruments() {
        let (first, last) = match dataset.instrument_bounds(id) {
            Some((first, last)) => (first.to_string(), last.to_string()),
            None => ("-".into(), "-".into()),
        };
        println!("{:<12} {:>8} {:>12} {:>12}", id, dataset.row_count(id), first, last);
    }

    Ok(())
}

fn run_show(
    dataset: Arc<Dataset>,
    config: &ExplorerConfig,
    ticker: Option<String>,
    start: Option<String>,
    end: Option<String>,
    json: bool,
    tail: Option<usize>,
) -> Result<()> {
    let Some(mut view) = ExplorerView::open(Arc::clone(&dataset), config.view.window_weeks) else {
        bail!("dataset is empty");
    };

    let selection = build_selection(
        view.selection().clone(),
        &dataset.instruments(),
        ticker,
        start.as_deref(),
        end.as_deref(),
        config.view.window_weeks,
    )?;

    let dashboard = view.select(selection);

    if json {
        println!("{}", serde_json::to_string_pretty(dashboard)?);
        return Ok(());
    }

    print_dashboard(dashboard, tail);
    Ok(())
}

/// Apply `--ticker`, `--start` and `--end` on top of the view's opening selection.
///
/// `--end` alone keeps the configured window length; `--start` alone keeps the
/// current end date.
fn build_selection(
    base: Selection,
    instruments: &[&str],
    ticker: Option<String>,
    start: Option<&str>,
    end: Option<&str>,
    window_weeks: u32,
) -> Result<Selection> {
    let mut selection = base;
    if let Some(ticker) = ticker {
        if !instruments.contains(&ticker.as_str()) {
            bail!(
                "unknown ticker '{ticker}'. Available: {}",
                instruments.join(", ")
            );
        }
        selection = selection.with_instrument(ticker);
    }

    let (start, end) = match (start, end) {
        (Some(start), Some(end)) => (parse_date(start)?, parse_date(end)?),
        (Some(start), None) => (parse_date(start)?, selection.end),
        (None, Some(end)) => {
            let end = parse_date(end)?;
            (window_start(end, window_weeks), end)
        }
        (None, None) => (selection.start, selection.end),
    };
    Ok(selection.with_range(start, end))
}

fn print_dashboard(dash: &Dashboard, tail: Option<usize>) {
    let sel = &dash.selection;
    let arrow = match dash.direction {
        ChangeDirection::Up => "▲",
        ChangeDirection::Down => "▼",
    };

    println!("{} | {} to {} | {} rows", sel.instrument, sel.start, sel.end, dash.rows);
    println!();
    println!("{:<16} {}", "Current Price", dash.price_display());
    println!("{:<16} {} {}", "Change", dash.change_display(), arrow);
    println!("{:<16} {}", "Percent Change", dash.percent_display());

    if dash.chart.is_empty() {
        println!();
        println!("No data for this selection");
        return;
    }

    let skip = tail.map_or(0, |n| dash.chart.len().saturating_sub(n));
    let cell = |v: Option<f64>| v.map(format_number).unwrap_or_else(|| "-".into());

    println!();
    println!("Price history");
    println!(
        "{:<10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "Date", "Open", "High", "Low", "Close", dash.chart.overlay_name
    );
    println!("{}", "-".repeat(65));
    for (point, sma) in dash.chart.ohlc.iter().zip(&dash.chart.overlay).skip(skip) {
        println!(
            "{:<10} {:>10} {:>10} {:>10} {:>10} {:>10}",
            point.date,
            cell(point.open),
            cell(point.high),
            cell(point.low),
            format_number(point.close),
            cell(*sma),
        );
    }

    println!();
    println!("Latest data");
    println!("{:<16} {:>14}", "Category", "Value");
    println!("{}", "-".repeat(31));
    for entry in &dash.snapshot {
        println!("{:<16} {:>14}", entry.name, entry.value);
    }
}
