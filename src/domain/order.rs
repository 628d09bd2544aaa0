//! Order data contract.
//!
//! An [`Order`] describes one desired trade action. Strategies build orders
//! fresh every cycle and hand them off unchanged; side carries direction, so
//! quantity is never negative.

use crate::domain::error::EmacrossError;
use crate::domain::instrument::Instrument;
use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum OrderType {
    #[default]
    Market,
    Limit,
    Stop,
    StopLimit,
    TrailingStop,
}

impl OrderType {
    pub fn requires_limit_price(&self) -> bool {
        matches!(self, OrderType::Limit | OrderType::StopLimit)
    }

    pub fn requires_stop_price(&self) -> bool {
        matches!(self, OrderType::Stop | OrderType::StopLimit)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
            OrderType::Stop => "STOP",
            OrderType::StopLimit => "STOP_LIMIT",
            OrderType::TrailingStop => "TRAILING_STOP",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum OrderSide {
    #[default]
    Buy,
    Sell,
    ShortSell,
    ShortSellExempt,
    Cross,
    CrossShort,
    CrossShortExempt,
}

impl OrderSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
            OrderSide::ShortSell => "SHORT_SELL",
            OrderSide::ShortSellExempt => "SHORT_SELL_EXEMPT",
            OrderSide::Cross => "CROSS",
            OrderSide::CrossShort => "CROSS_SHORT",
            OrderSide::CrossShortExempt => "CROSS_SHORT_EXEMPT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum TimeInForce {
    #[default]
    Day,
    ImmediateOrCancel,
    Opg,
    GoodTillCanceled,
    GoodTillExpires,
}

impl TimeInForce {
    /// Whether the order carries its own expiration timestamp.
    pub fn expires(&self) -> bool {
        matches!(self, TimeInForce::GoodTillExpires)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInForce::Day => "DAY",
            TimeInForce::ImmediateOrCancel => "IMMEDIATE_OR_CANCEL",
            TimeInForce::Opg => "OPG",
            TimeInForce::GoodTillCanceled => "GOOD_TILL_CANCELED",
            TimeInForce::GoodTillExpires => "GOOD_TILL_EXPIRES",
        }
    }
}

macro_rules! wire_name_impls {
    ($ty:ident, $label:literal, [$($variant:ident),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = OrderFieldParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                [$($ty::$variant),+]
                    .into_iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| OrderFieldParseError {
                        field: $label,
                        value: s.to_string(),
                    })
            }
        }
    };
}

wire_name_impls!(OrderType, "order type", [Market, Limit, Stop, StopLimit, TrailingStop]);
wire_name_impls!(
    OrderSide,
    "order side",
    [Buy, Sell, ShortSell, ShortSellExempt, Cross, CrossShort, CrossShortExempt]
);
wire_name_impls!(
    TimeInForce,
    "time in force",
    [Day, ImmediateOrCancel, Opg, GoodTillCanceled, GoodTillExpires]
);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown {field}: {value:?}")]
pub struct OrderFieldParseError {
    pub field: &'static str,
    pub value: String,
}

/// Order to buy or sell an instrument.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Order {
    /// Persistence identity; `None` until the order is stored.
    pub id: Option<i64>,
    pub order_type: OrderType,
    pub instrument: Instrument,
    pub side: OrderSide,
    pub order_timestamp: NaiveDateTime,
    /// "Not before" time. `None` means as soon as possible; independent of
    /// time-in-force, which the broker enforces.
    pub execution_target_timestamp: Option<NaiveDateTime>,
    pub expiration_timestamp: Option<NaiveDateTime>,
    pub time_in_force: TimeInForce,
    pub quantity: f64,
    pub limit_price: f64,
    pub stop_price: f64,
    pub trailing_distance: f64,
}

impl Order {
    pub fn new(instrument: Instrument, order_timestamp: NaiveDateTime) -> Self {
        Order {
            id: None,
            order_type: OrderType::default(),
            instrument,
            side: OrderSide::default(),
            order_timestamp,
            execution_target_timestamp: None,
            expiration_timestamp: None,
            time_in_force: TimeInForce::default(),
            quantity: 0.0,
            limit_price: 0.0,
            stop_price: 0.0,
            trailing_distance: 0.0,
        }
    }

    /// Market order, good till canceled.
    pub fn market_gtc(
        instrument: Instrument,
        side: OrderSide,
        quantity: f64,
        order_timestamp: NaiveDateTime,
    ) -> Self {
        Order::new(instrument, order_timestamp)
            .with_order_type(OrderType::Market)
            .with_time_in_force(TimeInForce::GoodTillCanceled)
            .with_side(side)
            .with_quantity(quantity)
    }

    pub fn has_id(&self) -> bool {
        self.id.is_some()
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = order_type;
        self
    }

    pub fn with_side(mut self, side: OrderSide) -> Self {
        self.side = side;
        self
    }

    pub fn with_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = tif;
        self
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_limit_price(mut self, price: f64) -> Self {
        self.limit_price = price;
        self
    }

    pub fn with_stop_price(mut self, price: f64) -> Self {
        self.stop_price = price;
        self
    }

    pub fn with_trailing_distance(mut self, distance: f64) -> Self {
        self.trailing_distance = distance;
        self
    }

    pub fn with_execution_target(mut self, at: NaiveDateTime) -> Self {
        self.execution_target_timestamp = Some(at);
        self
    }

    pub fn with_expiration(mut self, at: NaiveDateTime) -> Self {
        self.expiration_timestamp = Some(at);
        self
    }

    /// Checks the fields the order type and time-in-force depend on.
    pub fn validate(&self) -> Result<(), EmacrossError> {
        let invalid = |reason: String| Err(EmacrossError::InvalidOrder { reason });

        if !self.quantity.is_finite() || self.quantity < 0.0 {
            return invalid(format!(
                "quantity must be a non-negative number, got {}",
                self.quantity
            ));
        }
        if self.order_type.requires_limit_price() && !is_positive(self.limit_price) {
            return invalid(format!("{} order needs a positive limit price", self.order_type));
        }
        if self.order_type.requires_stop_price() && !is_positive(self.stop_price) {
            return invalid(format!("{} order needs a positive stop price", self.order_type));
        }
        if self.order_type == OrderType::TrailingStop && !is_positive(self.trailing_distance) {
            return invalid("TRAILING_STOP order needs a positive trailing distance".into());
        }
        match (self.time_in_force.expires(), self.expiration_timestamp) {
            (true, None) => {
                return invalid(format!("{} order needs an expiration", self.time_in_force));
            }
            (_, Some(expiry)) if expiry < self.order_timestamp => {
                return invalid("expiration precedes order timestamp".into());
            }
            _ => {}
        }
        Ok(())
    }
}

/// Validates every order; the first failure rejects the batch.
pub fn validate_batch(orders: &[Order]) -> Result<(), EmacrossError> {
    orders.iter().try_for_each(Order::validate)
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn fmt_optional(ts: &Option<NaiveDateTime>) -> String {
    ts.map(|t| t.to_string()).unwrap_or_else(|| "-".to_string())
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order: type={}, instrument={}, side={}, quantity={}, orderTimeStamp={}, \
             executionTargetTimeStamp={}, expirationTimeStamp={}, timeInForce={}, \
             stopPrice={}, limitPrice={}, trailingDistance={}",
            self.order_type,
            self.instrument,
            self.side,
            self.quantity,
            self.order_timestamp,
            fmt_optional(&self.execution_target_timestamp),
            fmt_optional(&self.expiration_timestamp),
            self.time_in_force,
            self.stop_price,
            self.limit_price,
            self.trailing_distance,
        )
    }
}
