//! CSV file data adapter.
//!
//! Bars live in `<base>/<SYMBOL>_<EXCHANGE>.csv` with header
//! `date,open,high,low,close,volume`; positions in `<base>/positions.csv`
//! with header `instrument,quantity`.

use crate::domain::candle_series::CandleSeries;
use crate::domain::error::EmacrossError;
use crate::domain::instrument::Instrument;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::position::Position;
use crate::ports::account_port::AccountPort;
use crate::ports::data_port::DataPort;
use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const POSITIONS_FILE: &str = "positions.csv";

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, instrument: &Instrument) -> PathBuf {
        self.base_path
            .join(format!("{}_{}.csv", instrument.symbol, instrument.exchange))
    }

    fn read(&self, path: &Path) -> Result<csv::Reader<fs::File>, EmacrossError> {
        csv::Reader::from_path(path).map_err(|e| EmacrossError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })
    }
}

/// Accepts `YYYY-MM-DD HH:MM:SS` or a bare `YYYY-MM-DD` (midnight).
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn field<T: FromStr>(
    record: &StringRecord,
    index: usize,
    name: &str,
    source: &str,
) -> Result<T, EmacrossError>
where
    T::Err: std::fmt::Display,
{
    let raw = record.get(index).ok_or_else(|| EmacrossError::Data {
        reason: format!("{}: missing {} column", source, name),
    })?;
    raw.trim().parse().map_err(|e| EmacrossError::Data {
        reason: format!("{}: invalid {} value {:?}: {}", source, name, raw, e),
    })
}

impl DataPort for CsvAdapter {
    fn fetch_series(&self, instrument: &Instrument) -> Result<CandleSeries, EmacrossError> {
        let path = self.csv_path(instrument);
        let source = path.display().to_string();
        let mut rdr = self.read(&path)?;
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| EmacrossError::Data {
                reason: format!("{}: CSV parse error: {}", source, e),
            })?;

            let date_str = record.get(0).ok_or_else(|| EmacrossError::Data {
                reason: format!("{}: missing date column", source),
            })?;
            let timestamp = parse_timestamp(date_str).ok_or_else(|| EmacrossError::Data {
                reason: format!("{}: invalid date {:?}", source, date_str),
            })?;

            let bar = OhlcvBar {
                timestamp,
                open: field(&record, 1, "open", &source)?,
                high: field(&record, 2, "high", &source)?,
                low: field(&record, 3, "low", &source)?,
                close: field(&record, 4, "close", &source)?,
                volume: field(&record, 5, "volume", &source)?,
            };
            // "NaN" and "inf" parse as f64.
            if !bar.has_finite_prices() {
                return Err(EmacrossError::Data {
                    reason: format!("{}: non-finite price on {}", source, date_str),
                });
            }
            bars.push(bar);
        }

        CandleSeries::from_unordered(instrument.clone(), bars)
    }
}

impl AccountPort for CsvAdapter {
    /// A missing positions file means no open positions.
    fn fetch_positions(&self) -> Result<Vec<Position>, EmacrossError> {
        let path = self.base_path.join(POSITIONS_FILE);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let source = path.display().to_string();
        let mut rdr = self.read(&path)?;
        let mut positions = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| EmacrossError::Data {
                reason: format!("{}: CSV parse error: {}", source, e),
            })?;
            let instrument: Instrument = field(&record, 0, "instrument", &source)?;
            let quantity: f64 = field(&record, 1, "quantity", &source)?;
            if !quantity.is_finite() {
                return Err(EmacrossError::Data {
                    reason: format!("{}: quantity for {} is not finite", source, instrument),
                });
            }
            positions.push(Position::new(instrument, quantity));
        }

        Ok(positions)
    }
}
