//! Instrument identity.

use std::fmt;
use std::str::FromStr;

/// A tradable instrument, identified by symbol and exchange.
///
/// Orders, positions and series refer to instruments by value; two
/// instruments are the same instrument exactly when they compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instrument {
    pub symbol: String,
    pub exchange: String,
}

impl Instrument {
    pub fn new(symbol: impl Into<String>, exchange: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            exchange: exchange.into(),
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.symbol, self.exchange)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid instrument {input:?}: expected SYMBOL.EXCHANGE")]
pub struct InstrumentParseError {
    pub input: String,
}

impl FromStr for Instrument {
    type Err = InstrumentParseError;

    /// Parses `SYMBOL.EXCHANGE`. The exchange is everything after the last
    /// dot, so symbols like `BRK.B.NYSE` keep their inner dot.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let err = || InstrumentParseError {
            input: s.to_string(),
        };
        let (symbol, exchange) = trimmed.rsplit_once('.').ok_or_else(err)?;
        if symbol.is_empty() || exchange.is_empty() {
            return Err(err());
        }
        Ok(Instrument::new(
            symbol.to_uppercase(),
            exchange.to_uppercase(),
        ))
    }
}
