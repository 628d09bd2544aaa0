//! CLI definition and dispatch.

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

use crate::adapters::csv_adapter::{parse_timestamp, CsvAdapter};
use crate::adapters::csv_order_writer::CsvOrderWriter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::account::AccountSnapshot;
use crate::domain::config_validation::validate_run_config;
use crate::domain::ema_cross::EmaCrossStrategy;
use crate::domain::error::EmacrossError;
use crate::domain::indicator::ExponentialAverage;
use crate::domain::instrument::Instrument;
use crate::domain::market::MarketSnapshot;
use crate::domain::order::{validate_batch, Order};
use crate::domain::strategy::StrategyConfig;
use crate::domain::universe::parse_instruments;
use crate::logging::{init_logging, LoggingConfig};
use crate::ports::account_port::AccountPort;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::order_sink::OrderSink;
use crate::ports::trade_system::TradeSystem;

#[derive(Parser, Debug)]
#[command(name = "emacross", about = "EMA crossover order generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one evaluation cycle and print the resulting orders
    Evaluate {
        #[arg(short, long)]
        config: PathBuf,
        /// Market timestamp (YYYY-MM-DD[ HH:MM:SS]); defaults to the newest bar
        #[arg(long)]
        at: Option<String>,
        /// Write orders here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Evaluate { config, at, output } => {
            run_evaluate(&config, at.as_deref(), output.as_deref())
        }
        Command::Validate { config } => run_validate(&config),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, EmacrossError> {
    let adapter = FileConfigAdapter::from_file(path)?;
    validate_run_config(&adapter)?;
    Ok(adapter)
}

fn run_validate(config_path: &Path) -> Result<(), EmacrossError> {
    load_config(config_path)?;
    eprintln!("{}: OK", config_path.display());
    Ok(())
}

fn run_evaluate(
    config_path: &Path,
    at: Option<&str>,
    output_path: Option<&Path>,
) -> Result<(), EmacrossError> {
    let adapter = load_config(config_path)?;
    init_logging(&LoggingConfig::from_config(&adapter));
    info!(config = %config_path.display(), "loaded config");

    let at = at.map(parse_at).transpose()?;
    let orders = evaluate_from_config(&adapter, at)?;

    match output_path {
        Some(path) => {
            write_orders_file(path, &orders)?;
            info!(path = %path.display(), orders = orders.len(), "orders written");
        }
        None => {
            let mut sink = CsvOrderWriter::new(io::stdout().lock());
            sink.submit(&orders)?;
            sink.into_inner()?.flush()?;
        }
    }
    Ok(())
}

/// Writes the batch to `path`. The batch is validated before the file is
/// opened, so a rejected batch leaves an existing file untouched.
pub fn write_orders_file(path: &Path, orders: &[Order]) -> Result<(), EmacrossError> {
    validate_batch(orders)?;
    let mut sink = CsvOrderWriter::new(File::create(path)?);
    sink.submit(orders)?;
    sink.into_inner()?.flush()?;
    Ok(())
}

fn parse_at(value: &str) -> Result<NaiveDateTime, EmacrossError> {
    parse_timestamp(value).ok_or_else(|| EmacrossError::ConfigInvalid {
        section: "cli".into(),
        key: "at".into(),
        reason: format!("invalid timestamp {:?}", value),
    })
}

pub fn build_strategy_config(adapter: &dyn ConfigPort) -> StrategyConfig {
    let defaults = StrategyConfig::default();
    StrategyConfig {
        period_short: adapter.get_int("strategy", "period_short", defaults.period_short as i64)
            as usize,
        period_long: adapter.get_int("strategy", "period_long", defaults.period_long as i64)
            as usize,
        min_bars: adapter.get_int("strategy", "min_bars", defaults.min_bars as i64) as usize,
        capital_fraction: adapter.get_double(
            "strategy",
            "capital_fraction",
            defaults.capital_fraction,
        ),
    }
}

pub fn resolve_instruments(adapter: &dyn ConfigPort) -> Result<Vec<Instrument>, EmacrossError> {
    let list = adapter
        .get_string("market", "instruments")
        .ok_or_else(|| EmacrossError::ConfigMissing {
            section: "market".into(),
            key: "instruments".into(),
        })?;
    parse_instruments(&list).map_err(|e| EmacrossError::ConfigInvalid {
        section: "market".into(),
        key: "instruments".into(),
        reason: e.to_string(),
    })
}

/// Fetches every configured series, in configuration order. Any fetch error
/// aborts; a cycle never runs on a partial market.
pub fn build_market(
    data_port: &dyn DataPort,
    instruments: &[Instrument],
    at: Option<NaiveDateTime>,
) -> Result<MarketSnapshot, EmacrossError> {
    let series = instruments
        .iter()
        .map(|instrument| data_port.fetch_series(instrument))
        .collect::<Result<Vec<_>, _>>()?;

    for s in series.iter().filter(|s| s.is_empty()) {
        warn!(instrument = %s.instrument(), "no bars");
    }

    match at {
        Some(timestamp) => Ok(MarketSnapshot::new(timestamp, series)),
        None => MarketSnapshot::at_latest_bar(series).ok_or_else(|| EmacrossError::Data {
            reason: "no bars for any instrument; pass --at to evaluate anyway".into(),
        }),
    }
}

pub fn build_account(
    adapter: &dyn ConfigPort,
    account_port: &dyn AccountPort,
) -> Result<AccountSnapshot, EmacrossError> {
    let balance = adapter.get_double("account", "balance", 0.0);
    Ok(AccountSnapshot::new(balance, account_port.fetch_positions()?))
}

/// Loads both snapshots through the CSV adapter and runs one cycle.
pub fn evaluate_from_config(
    adapter: &dyn ConfigPort,
    at: Option<NaiveDateTime>,
) -> Result<Vec<Order>, EmacrossError> {
    let data_dir = adapter
        .get_string("market", "data_dir")
        .ok_or_else(|| EmacrossError::ConfigMissing {
            section: "market".into(),
            key: "data_dir".into(),
        })?;
    let csv = CsvAdapter::new(PathBuf::from(data_dir.trim()));

    let instruments = resolve_instruments(adapter)?;
    let market = build_market(&csv, &instruments, at)?;
    let account = build_account(adapter, &csv)?;

    let strategy = EmaCrossStrategy::new(build_strategy_config(adapter), ExponentialAverage);
    info!(
        strategy = strategy.name(),
        instruments = market.instrument_count(),
        positions = account.position_count(),
        balance = account.balance,
        "running cycle"
    );
    strategy.on_market(&account, &market)
}
