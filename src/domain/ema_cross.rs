//! EMA crossover strategy.
//!
//! Each cycle, for every series with enough history:
//! 1. Read the latest two opens and two EMAs of the closes (short period at
//!    offset 0, long period at offset 1).
//! 2. Detect a bullish or bearish [`Crossover`]; no crossover means hold.
//! 3. On a crossover, close every open position in the instrument, then
//!    enter in the signal's direction, sized by [`entry_quantity`].
//!
//! The strategy keeps no state between cycles.

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::domain::account::AccountSnapshot;
use crate::domain::candle_series::CandleSeries;
use crate::domain::error::EmacrossError;
use crate::domain::instrument::Instrument;
use crate::domain::market::MarketSnapshot;
use crate::domain::order::{Order, OrderSide};
use crate::domain::signal::Crossover;
use crate::domain::sizing::entry_quantity;
use crate::domain::strategy::StrategyConfig;
use crate::ports::indicator_port::IndicatorPort;
use crate::ports::trade_system::TradeSystem;

pub struct EmaCrossStrategy<I> {
    config: StrategyConfig,
    indicator: I,
}

impl<I: IndicatorPort> EmaCrossStrategy<I> {
    pub fn new(config: StrategyConfig, indicator: I) -> Self {
        Self { config, indicator }
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    /// Evaluates one cycle. See the module docs for the rules.
    pub fn evaluate(
        &self,
        account: &AccountSnapshot,
        market: &MarketSnapshot,
    ) -> Result<Vec<Order>, EmacrossError> {
        let total_instruments = market.instrument_count();
        let mut orders = Vec::new();

        for series in &market.series {
            if series.len() < self.config.min_bars {
                debug!(
                    instrument = %series.instrument(),
                    bars = series.len(),
                    min_bars = self.config.min_bars,
                    "skipping series with insufficient history"
                );
                continue;
            }

            let Some(signal) = self.signal(series)? else {
                continue;
            };

            let price = series.close(0)?;
            let quantity = entry_quantity(
                account.balance,
                self.config.capital_fraction,
                total_instruments,
                price,
            )
            .ok_or_else(|| EmacrossError::MalformedSeries {
                instrument: series.instrument().to_string(),
                reason: format!("cannot size an entry at close price {}", price),
            })?;

            orders.extend(closing_orders(account, series.instrument(), market.timestamp));
            orders.push(Order::market_gtc(
                series.instrument().clone(),
                signal.entry_side(),
                quantity,
                market.timestamp,
            ));
        }

        info!(
            at = %market.timestamp,
            instruments = total_instruments,
            orders = orders.len(),
            "evaluated cycle"
        );
        Ok(orders)
    }

    fn signal(&self, series: &CandleSeries) -> Result<Option<Crossover>, EmacrossError> {
        let open0 = series.open(0)?;
        let open1 = series.open(1)?;
        let closes = series.closes();
        let ema_short = self.indicator.ema(self.config.period_short, &closes, 0)?;
        let ema_long = self.indicator.ema(self.config.period_long, &closes, 1)?;

        let signal = Crossover::detect(open0, open1, ema_short, ema_long);
        debug!(
            instrument = %series.instrument(),
            open0,
            open1,
            ema_short,
            ema_long,
            ?signal,
            "computed crossover"
        );
        Ok(signal)
    }
}

/// One market order per open position in `instrument`, flattening it.
pub fn closing_orders(
    account: &AccountSnapshot,
    instrument: &Instrument,
    at: NaiveDateTime,
) -> Vec<Order> {
    account
        .positions_in(instrument)
        .map(|pos| {
            let side = if pos.is_long() {
                OrderSide::Sell
            } else {
                OrderSide::Buy
            };
            Order::market_gtc(instrument.clone(), side, pos.abs_quantity(), at)
        })
        .collect()
}

impl<I: IndicatorPort> TradeSystem for EmaCrossStrategy<I> {
    fn name(&self) -> &str {
        "EMA Crossover"
    }

    fn description(&self) -> &str {
        "Enters when the open crosses its exponential moving average."
    }

    fn on_market(
        &self,
        account: &AccountSnapshot,
        market: &MarketSnapshot,
    ) -> Result<Vec<Order>, EmacrossError> {
        self.evaluate(account, market)
    }
}
