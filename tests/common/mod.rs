#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use emacross::domain::candle_series::CandleSeries;
use emacross::domain::error::EmacrossError;
use emacross::domain::instrument::Instrument;
pub use emacross::domain::ohlcv::OhlcvBar;
use emacross::domain::order::Order;
use emacross::domain::position::Position;
use emacross::ports::account_port::AccountPort;
use emacross::ports::data_port::DataPort;
use emacross::ports::indicator_port::IndicatorPort;
use emacross::ports::order_sink::OrderSink;
use std::cell::Cell;
use std::collections::HashMap;

/// Indicator stub: `ema_short` at offset 0, `ema_long` at any other offset.
pub struct FixedIndicator {
    pub ema_short: f64,
    pub ema_long: f64,
    pub calls: Cell<usize>,
}

impl FixedIndicator {
    pub fn new(ema_short: f64, ema_long: f64) -> Self {
        Self {
            ema_short,
            ema_long,
            calls: Cell::new(0),
        }
    }
}

impl IndicatorPort for FixedIndicator {
    fn ema(&self, _period: usize, _closes: &[f64], offset: usize) -> Result<f64, EmacrossError> {
        self.calls.set(self.calls.get() + 1);
        Ok(if offset == 0 {
            self.ema_short
        } else {
            self.ema_long
        })
    }
}

/// Indicator stub that always fails.
pub struct FailingIndicator;

impl IndicatorPort for FailingIndicator {
    fn ema(&self, period: usize, _closes: &[f64], _offset: usize) -> Result<f64, EmacrossError> {
        Err(EmacrossError::Indicator {
            reason: format!("no EMA for period {}", period),
        })
    }
}

pub struct MockDataPort {
    pub data: HashMap<Instrument, Vec<OhlcvBar>>,
    pub errors: HashMap<Instrument, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, instrument: Instrument, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(instrument, bars);
        self
    }

    pub fn with_error(mut self, instrument: Instrument, reason: &str) -> Self {
        self.errors.insert(instrument, reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_series(&self, instrument: &Instrument) -> Result<CandleSeries, EmacrossError> {
        if let Some(reason) = self.errors.get(instrument) {
            return Err(EmacrossError::Data {
                reason: reason.clone(),
            });
        }
        let bars = self.data.get(instrument).cloned().unwrap_or_default();
        CandleSeries::from_unordered(instrument.clone(), bars)
    }
}

pub struct MockAccountPort {
    pub positions: Vec<Position>,
}

impl AccountPort for MockAccountPort {
    fn fetch_positions(&self) -> Result<Vec<Position>, EmacrossError> {
        Ok(self.positions.clone())
    }
}

/// Sink that keeps every submitted batch.
#[derive(Default)]
pub struct RecordingSink {
    pub batches: Vec<Vec<Order>>,
}

impl OrderSink for RecordingSink {
    fn submit(&mut self, orders: &[Order]) -> Result<(), EmacrossError> {
        for order in orders {
            order.validate()?;
        }
        self.batches.push(orders.to_vec());
        Ok(())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

pub fn bhp() -> Instrument {
    Instrument::new("BHP", "ASX")
}

pub fn cba() -> Instrument {
    Instrument::new("CBA", "ASX")
}

/// Daily bars from (open, close) pairs given newest first. The newest bar
/// falls on 2024-03-01.
pub fn bars_from(prices: &[(f64, f64)]) -> Vec<OhlcvBar> {
    let newest = date(2024, 3, 1);
    prices
        .iter()
        .enumerate()
        .map(|(i, &(open, close))| OhlcvBar {
            timestamp: newest - Duration::days(i as i64),
            open,
            high: open.max(close),
            low: open.min(close),
            close,
            volume: 10_000,
        })
        .collect()
}

/// `len` bars whose two newest opens are `open0` and `open1`; every close is
/// `close`.
pub fn make_bars(len: usize, open0: f64, open1: f64, close: f64) -> Vec<OhlcvBar> {
    let prices: Vec<(f64, f64)> = (0..len)
        .map(|i| match i {
            0 => (open0, close),
            1 => (open1, close),
            _ => (close, close),
        })
        .collect();
    bars_from(&prices)
}

pub fn make_series(instrument: Instrument, bars: Vec<OhlcvBar>) -> CandleSeries {
    CandleSeries::new(instrument, bars).unwrap()
}
