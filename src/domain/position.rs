//! Open positions as seen by a strategy.

use crate::domain::instrument::Instrument;

/// An open position. Positive quantity is long, negative is short.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub instrument: Instrument,
    pub quantity: f64,
}

impl Position {
    pub fn new(instrument: Instrument, quantity: f64) -> Self {
        Self {
            instrument,
            quantity,
        }
    }

    pub fn is_long(&self) -> bool {
        self.quantity > 0.0
    }

    pub fn is_short(&self) -> bool {
        self.quantity < 0.0
    }

    pub fn abs_quantity(&self) -> f64 {
        self.quantity.abs()
    }
}
