//! Market data access port.

use crate::domain::candle_series::CandleSeries;
use crate::domain::error::EmacrossError;
use crate::domain::instrument::Instrument;

pub trait DataPort {
    /// Bars for `instrument`, newest first.
    fn fetch_series(&self, instrument: &Instrument) -> Result<CandleSeries, EmacrossError>;
}
