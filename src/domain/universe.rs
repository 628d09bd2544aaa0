//! The set of instruments a cycle evaluates.
//!
//! Parses the instrument list from configuration. Snapshot iteration order is
//! the order instruments appear in the list.

use crate::domain::instrument::{Instrument, InstrumentParseError};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in instrument list")]
    EmptyToken,

    #[error("duplicate instrument: {0}")]
    DuplicateInstrument(Instrument),

    #[error(transparent)]
    Parse(#[from] InstrumentParseError),
}

pub fn parse_instruments(input: &str) -> Result<Vec<Instrument>, UniverseError> {
    let mut instruments = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let instrument: Instrument = trimmed.parse()?;
        if !seen.insert(instrument.clone()) {
            return Err(UniverseError::DuplicateInstrument(instrument));
        }
        instruments.push(instrument);
    }

    Ok(instruments)
}
