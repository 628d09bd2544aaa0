//! Indicator provider port.

use crate::domain::error::EmacrossError;

/// Supplies scalar indicator values computed from a price series.
///
/// `closes` is ordered newest first. `offset` counts bars back from the most
/// recent one: the value at offset 1 is the indicator as it stood one bar ago.
pub trait IndicatorPort {
    fn ema(&self, period: usize, closes: &[f64], offset: usize) -> Result<f64, EmacrossError>;
}

impl<T: IndicatorPort + ?Sized> IndicatorPort for &T {
    fn ema(&self, period: usize, closes: &[f64], offset: usize) -> Result<f64, EmacrossError> {
        (**self).ema(period, closes, offset)
    }
}
