//! Port for handing a cycle's orders to whatever submits them.

use crate::domain::error::EmacrossError;
use crate::domain::order::Order;

pub trait OrderSink {
    fn submit(&mut self, orders: &[Order]) -> Result<(), EmacrossError>;
}
