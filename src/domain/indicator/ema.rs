//! Exponential Moving Average.
//!
//! k = 2/(n+1), seeded with the oldest close, then EMA[i] = C[i]*k + EMA[i-1]*(1-k).
//! Seeding with a single close instead of an SMA means any series with at
//! least one bar past the offset has a value, whatever the period.

use crate::domain::error::EmacrossError;
use crate::ports::indicator_port::IndicatorPort;

/// EMA over `closes` (newest first), skipping the `offset` newest values.
pub fn calculate_ema(period: usize, closes: &[f64], offset: usize) -> Result<f64, EmacrossError> {
    if period == 0 {
        return Err(EmacrossError::Indicator {
            reason: "EMA period must be positive".into(),
        });
    }
    let window = closes.get(offset..).filter(|w| !w.is_empty()).ok_or_else(|| {
        EmacrossError::Indicator {
            reason: format!(
                "EMA({}) at offset {} needs more than {} closes",
                period,
                offset,
                closes.len()
            ),
        }
    })?;

    let k = 2.0 / (period as f64 + 1.0);
    let mut oldest_first = window.iter().rev();
    // `window` is non-empty, checked above.
    let mut ema = oldest_first.next().copied().unwrap_or_default();
    for &close in oldest_first {
        ema = close * k + ema * (1.0 - k);
    }

    if !ema.is_finite() {
        return Err(EmacrossError::Indicator {
            reason: format!("EMA({}) at offset {} is not finite", period, offset),
        });
    }
    Ok(ema)
}

/// The in-crate [`IndicatorPort`] implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExponentialAverage;

impl IndicatorPort for ExponentialAverage {
    fn ema(&self, period: usize, closes: &[f64], offset: usize) -> Result<f64, EmacrossError> {
        calculate_ema(period, closes, offset)
    }
}
