//! Trade system port: what a scheduler calls once per cycle.

use crate::domain::account::AccountSnapshot;
use crate::domain::error::EmacrossError;
use crate::domain::market::MarketSnapshot;
use crate::domain::order::Order;

pub trait TradeSystem {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Orders to submit this cycle, in submission order.
    ///
    /// Either the whole batch or an error; never a partial batch.
    fn on_market(
        &self,
        account: &AccountSnapshot,
        market: &MarketSnapshot,
    ) -> Result<Vec<Order>, EmacrossError>;
}
