//! Point-in-time market state handed to a strategy each cycle.

use crate::domain::candle_series::CandleSeries;
use crate::domain::instrument::Instrument;
use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct MarketSnapshot {
    pub timestamp: NaiveDateTime,
    pub series: Vec<CandleSeries>,
}

impl MarketSnapshot {
    pub fn new(timestamp: NaiveDateTime, series: Vec<CandleSeries>) -> Self {
        Self { timestamp, series }
    }

    /// Uses the newest bar across all series as the snapshot time.
    /// Returns `None` when no series has any bars.
    pub fn at_latest_bar(series: Vec<CandleSeries>) -> Option<Self> {
        let timestamp = series
            .iter()
            .filter_map(|s| s.latest().map(|b| b.timestamp))
            .max()?;
        Some(Self { timestamp, series })
    }

    /// Number of series in the snapshot, including ones too short to trade.
    pub fn instrument_count(&self) -> usize {
        self.series.len()
    }

    pub fn series_for(&self, instrument: &Instrument) -> Option<&CandleSeries> {
        self.series.iter().find(|s| s.instrument() == instrument)
    }
}
