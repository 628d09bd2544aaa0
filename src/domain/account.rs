//! Account state handed to a strategy each cycle.

use crate::domain::instrument::Instrument;
use crate::domain::position::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct AccountSnapshot {
    pub balance: f64,
    pub positions: Vec<Position>,
}

impl AccountSnapshot {
    pub fn new(balance: f64, positions: Vec<Position>) -> Self {
        AccountSnapshot { balance, positions }
    }

    /// Account with cash only.
    pub fn flat(balance: f64) -> Self {
        Self::new(balance, Vec::new())
    }

    /// Positions held in `instrument`, in account order.
    pub fn positions_in<'a>(
        &'a self,
        instrument: &'a Instrument,
    ) -> impl Iterator<Item = &'a Position> + 'a {
        self.positions
            .iter()
            .filter(move |pos| &pos.instrument == instrument)
    }

    pub fn has_position(&self, instrument: &Instrument) -> bool {
        self.positions_in(instrument).next().is_some()
    }

    pub fn position_count(&self) -> usize {
        self.positions.len()
    }
}
