//! Port traits: the seams between the strategy core and its collaborators.

pub mod account_port;
pub mod config_port;
pub mod data_port;
pub mod indicator_port;
pub mod order_sink;
pub mod trade_system;
