//! Per-instrument bar series, newest bar first.

use crate::domain::error::EmacrossError;
use crate::domain::instrument::Instrument;
use crate::domain::ohlcv::OhlcvBar;

/// Bars for one instrument. Index 0 is the most recent bar.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleSeries {
    instrument: Instrument,
    bars: Vec<OhlcvBar>,
}

impl CandleSeries {
    /// Builds a series from bars already ordered newest-first.
    ///
    /// Timestamps must be strictly decreasing.
    pub fn new(instrument: Instrument, bars: Vec<OhlcvBar>) -> Result<Self, EmacrossError> {
        if let Some(index) = bars
            .windows(2)
            .position(|w| w[0].timestamp <= w[1].timestamp)
        {
            return Err(EmacrossError::InvalidDateOrder {
                instrument: instrument.to_string(),
                index: index + 1,
            });
        }
        Ok(Self { instrument, bars })
    }

    /// Builds a series from bars in any order, sorting them newest-first.
    pub fn from_unordered(
        instrument: Instrument,
        mut bars: Vec<OhlcvBar>,
    ) -> Result<Self, EmacrossError> {
        bars.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Self::new(instrument, bars)
    }

    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[OhlcvBar] {
        &self.bars
    }

    pub fn get(&self, index: usize) -> Option<&OhlcvBar> {
        self.bars.get(index)
    }

    pub fn latest(&self) -> Option<&OhlcvBar> {
        self.bars.first()
    }

    pub fn open(&self, index: usize) -> Result<f64, EmacrossError> {
        self.price(index, "open", |b| b.open)
    }

    pub fn close(&self, index: usize) -> Result<f64, EmacrossError> {
        self.price(index, "close", |b| b.close)
    }

    /// Closing prices, newest first.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    fn price(
        &self,
        index: usize,
        field: &str,
        pick: impl Fn(&OhlcvBar) -> f64,
    ) -> Result<f64, EmacrossError> {
        let bar = self.get(index).ok_or_else(|| EmacrossError::MalformedSeries {
            instrument: self.instrument.to_string(),
            reason: format!("missing bar {} (series has {})", index, self.len()),
        })?;
        let value = pick(bar);
        if !value.is_finite() {
            return Err(EmacrossError::MalformedSeries {
                instrument: self.instrument.to_string(),
                reason: format!("{} of bar {} is not finite", field, index),
            });
        }
        Ok(value)
    }
}
