//! Reference indicator implementations.
//!
//! The strategy consumes indicators through
//! [`IndicatorPort`](crate::ports::indicator_port::IndicatorPort); this module
//! provides the implementation the binary wires in.

pub mod ema;

pub use ema::{calculate_ema, ExponentialAverage};
