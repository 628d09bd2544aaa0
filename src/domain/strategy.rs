//! Strategy parameters.

use crate::domain::sizing::DEFAULT_CAPITAL_FRACTION;

pub const DEFAULT_MIN_BARS: usize = 7;
pub const MAX_PERIOD: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyConfig {
    /// EMA period compared against the latest open.
    pub period_short: usize,
    /// EMA period, taken one bar back, compared against the previous open.
    pub period_long: usize,
    /// Series with fewer bars are skipped.
    pub min_bars: usize,
    pub capital_fraction: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        StrategyConfig {
            period_short: 1,
            period_long: 1,
            min_bars: DEFAULT_MIN_BARS,
            capital_fraction: DEFAULT_CAPITAL_FRACTION,
        }
    }
}
