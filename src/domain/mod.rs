//! Core domain types and logic.

pub mod instrument;
pub mod ohlcv;
pub mod candle_series;
pub mod market;
pub mod position;
pub mod account;
pub mod order;
pub mod indicator;
pub mod signal;
pub mod sizing;
pub mod strategy;
pub mod ema_cross;
pub mod universe;
pub mod config_validation;
pub mod error;
