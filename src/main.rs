use analytics::{AnalyticsEngine, PerformanceReport};
use anyhow::{Context, Result};
use backtester::{BacktestResult, Backtester};
use clap::{Parser, Subcommand};
use comfy_table::{Table, presets::UTF8_FULL};
use configuration::settings::Config;
use configuration::{load_config, load_config_from};
use market_data::{SeriesRow, load_bars, load_returns, write_series, write_values};
use pnl::compute_pnl_series;
use std::path::PathBuf;
use strategies::create_strategy;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the PnL series application.
fn main() -> Result<()> {
    // A .env file is optional; it only supplies RUST_LOG and PNL_* overrides.
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Backtest(args) => handle_backtest(args),
        Commands::Compound(args) => handle_compound(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Compounds strategy returns into a value path and compares it with buy-and-hold.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the moving average crossover backtest over a CSV of daily closes.
    Backtest(BacktestArgs),
    /// Compound a CSV column of returns into a PnL series.
    Compound(CompoundArgs),
}

#[derive(Parser)]
struct BacktestArgs {
    /// CSV file with `Date,Close` columns.
    #[arg(long)]
    data: PathBuf,

    /// TOML configuration file. Defaults to ./config.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the per-bar series to this CSV file.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the performance report as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct CompoundArgs {
    /// CSV file with a `Return` column.
    #[arg(long)]
    input: PathBuf,

    /// Write the compounded series to this CSV file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

// ==============================================================================
// Backtest Command Logic
// ==============================================================================

fn handle_backtest(args: BacktestArgs) -> Result<()> {
    let config: Config = match &args.config {
        Some(path) => load_config_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => load_config().context("Failed to load configuration")?,
    };

    let bars = load_bars(&args.data)
        .with_context(|| format!("Failed to load price data from {}", args.data.display()))?;

    let strategy = create_strategy(config.strategy.id, &config)?;
    let analytics_engine = AnalyticsEngine::new(
        config.analytics.periods_per_year,
        config.analytics.risk_free_rate,
    );

    let result = Backtester::new(strategy, analytics_engine).run(&bars)?;

    if let Some(path) = &args.output {
        write_series(path, &series_rows(&result))
            .with_context(|| format!("Failed to write series to {}", path.display()))?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.report)?);
    } else {
        println!("{}", report_table(&result.report));
        println!(
            "PnL series: {:?} (iterator scan: {:?})",
            result.pnl_elapsed, result.reference_elapsed
        );
    }

    Ok(())
}

fn series_rows(result: &BacktestResult) -> Vec<SeriesRow> {
    result
        .bars
        .iter()
        .enumerate()
        .map(|(i, bar)| SeriesRow {
            date: bar.date,
            close: bar.close,
            period_return: result.returns[i],
            exposure: result.exposures[i].as_f64(),
            strategy_return: result.strategy_returns[i],
            strategy_pnl: result.strategy_pnl[i],
            buy_hold_pnl: result.buy_hold_pnl[i],
        })
        .collect()
}

fn report_table(report: &PerformanceReport) -> Table {
    let pct = |v: f64| format!("{v:.2}%");

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Metric", "Strategy", "Buy & Hold"]);
    table.add_row(vec![
        "Final value".to_string(),
        format!("{:.4}", report.final_value),
        format!("{:.4}", report.buy_hold_final_value),
    ]);
    table.add_row(vec![
        "Total return".to_string(),
        pct(report.total_return_pct),
        pct(report.buy_hold_return_pct),
    ]);
    table.add_row(vec![
        "Max drawdown".to_string(),
        pct(report.max_drawdown_pct),
        pct(report.buy_hold_max_drawdown_pct),
    ]);
    table.add_row(vec![
        "Sharpe ratio".to_string(),
        report
            .sharpe_ratio
            .map_or_else(|| "n/a".to_string(), |s| format!("{s:.2}")),
        String::new(),
    ]);
    table.add_row(vec![
        "Time in market".to_string(),
        pct(report.time_in_market_pct),
        pct(100.0),
    ]);
    table.add_row(vec![
        "Periods".to_string(),
        report.periods.to_string(),
        report.periods.to_string(),
    ]);
    table
}

// ==============================================================================
// Compound Command Logic
// ==============================================================================

fn handle_compound(args: CompoundArgs) -> Result<()> {
    let returns = load_returns(&args.input)
        .with_context(|| format!("Failed to load returns from {}", args.input.display()))?;

    let series = compute_pnl_series(&returns);

    match &args.output {
        Some(path) => write_values(path, "PnL", &series)
            .with_context(|| format!("Failed to write series to {}", path.display()))?,
        None => {
            for value in &series {
                println!("{value}");
            }
        }
    }

    Ok(())
}
