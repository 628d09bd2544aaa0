//! Configuration validation.
//!
//! Validates every config field before a cycle runs, so a typo fails the run
//! instead of silently falling back to a default.

use crate::domain::error::EmacrossError;
use crate::domain::strategy::MAX_PERIOD;
use crate::domain::universe::parse_instruments;
use crate::ports::config_port::ConfigPort;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), EmacrossError> {
    validate_period(config, "period_short")?;
    validate_period(config, "period_long")?;
    validate_min_bars(config)?;
    validate_capital_fraction(config)?;
    Ok(())
}

pub fn validate_run_config(config: &dyn ConfigPort) -> Result<(), EmacrossError> {
    validate_strategy_config(config)?;
    validate_data_dir(config)?;
    validate_instruments(config)?;
    validate_balance(config)?;
    validate_log_level(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> EmacrossError {
    EmacrossError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn missing(section: &str, key: &str) -> EmacrossError {
    EmacrossError::ConfigMissing {
        section: section.to_string(),
        key: key.to_string(),
    }
}

/// `None` when the key is absent or blank.
fn parse_optional<T: FromStr>(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<T>, EmacrossError> {
    match config.get_string(section, key) {
        Some(s) if !s.trim().is_empty() => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| invalid(section, key, format!("cannot parse {:?}", s))),
        _ => Ok(None),
    }
}

fn validate_period(config: &dyn ConfigPort, key: &str) -> Result<(), EmacrossError> {
    if let Some(period) = parse_optional::<i64>(config, "strategy", key)? {
        if period < 1 || period > MAX_PERIOD as i64 {
            return Err(invalid(
                "strategy",
                key,
                format!("{} must be between 1 and {}", key, MAX_PERIOD),
            ));
        }
    }
    Ok(())
}

fn validate_min_bars(config: &dyn ConfigPort) -> Result<(), EmacrossError> {
    if let Some(min_bars) = parse_optional::<i64>(config, "strategy", "min_bars")? {
        // Two opens are read from every evaluated series.
        if min_bars < 2 {
            return Err(invalid("strategy", "min_bars", "min_bars must be at least 2"));
        }
    }
    Ok(())
}

fn validate_capital_fraction(config: &dyn ConfigPort) -> Result<(), EmacrossError> {
    if let Some(fraction) = parse_optional::<f64>(config, "strategy", "capital_fraction")? {
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(invalid(
                "strategy",
                "capital_fraction",
                "capital_fraction must be in (0, 1]",
            ));
        }
    }
    Ok(())
}

fn validate_data_dir(config: &dyn ConfigPort) -> Result<(), EmacrossError> {
    match config.get_string("market", "data_dir") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(missing("market", "data_dir")),
    }
}

fn validate_instruments(config: &dyn ConfigPort) -> Result<(), EmacrossError> {
    match config.get_string("market", "instruments") {
        Some(s) if !s.trim().is_empty() => parse_instruments(&s)
            .map(|_| ())
            .map_err(|e| invalid("market", "instruments", e.to_string())),
        _ => Err(missing("market", "instruments")),
    }
}

fn validate_balance(config: &dyn ConfigPort) -> Result<(), EmacrossError> {
    match parse_optional::<f64>(config, "account", "balance")? {
        None => Err(missing("account", "balance")),
        Some(balance) if !balance.is_finite() || balance < 0.0 => Err(invalid(
            "account",
            "balance",
            "balance must be a non-negative number",
        )),
        Some(_) => Ok(()),
    }
}

/// A bare word must be a level name; anything with `target=level` parts goes
/// through the filter parser. A blank or absent level falls back to the
/// default.
fn validate_log_level(config: &dyn ConfigPort) -> Result<(), EmacrossError> {
    let Some(level) = config.get_string("logging", "level") else {
        return Ok(());
    };
    let level = level.trim();
    if level.is_empty() || level.parse::<LevelFilter>().is_ok() {
        return Ok(());
    }
    if !level.contains('=') {
        return Err(invalid(
            "logging",
            "level",
            format!("unknown log level {:?}", level),
        ));
    }
    EnvFilter::try_new(level)
        .map(|_| ())
        .map_err(|e| invalid("logging", "level", e.to_string()))
}
