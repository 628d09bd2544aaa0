//! Open-price / EMA crossover detection.

use crate::domain::order::OrderSide;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossover {
    Bullish,
    Bearish,
}

impl Crossover {
    /// Compares the latest two opens against the short and long EMA.
    ///
    /// Bullish: `open0 > ema_short && open1 < ema_long`.
    /// Bearish: `open0 < ema_short && open1 > ema_long`.
    /// Bullish is checked first. Equality on either side fires nothing.
    pub fn detect(open0: f64, open1: f64, ema_short: f64, ema_long: f64) -> Option<Crossover> {
        if open0 > ema_short && open1 < ema_long {
            Some(Crossover::Bullish)
        } else if open0 < ema_short && open1 > ema_long {
            Some(Crossover::Bearish)
        } else {
            None
        }
    }

    pub fn entry_side(&self) -> OrderSide {
        match self {
            Crossover::Bullish => OrderSide::Buy,
            Crossover::Bearish => OrderSide::ShortSell,
        }
    }
}
