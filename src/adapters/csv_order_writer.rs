//! Writes order batches as CSV.

use crate::domain::error::EmacrossError;
use crate::domain::order::{validate_batch, Order};
use crate::ports::order_sink::OrderSink;
use chrono::NaiveDateTime;
use std::io::Write;

pub const ORDER_HEADER: [&str; 11] = [
    "instrument",
    "side",
    "type",
    "time_in_force",
    "quantity",
    "limit_price",
    "stop_price",
    "trailing_distance",
    "order_timestamp",
    "execution_target_timestamp",
    "expiration_timestamp",
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct CsvOrderWriter<W: Write> {
    writer: csv::Writer<W>,
    header_written: bool,
}

impl<W: Write> CsvOrderWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
            header_written: false,
        }
    }

    pub fn into_inner(self) -> Result<W, EmacrossError> {
        self.writer.into_inner().map_err(|e| EmacrossError::Io(e.into_error()))
    }

    fn write_header(&mut self) -> Result<(), EmacrossError> {
        if !self.header_written {
            self.writer.write_record(ORDER_HEADER).map_err(csv_error)?;
            self.header_written = true;
        }
        Ok(())
    }
}

fn csv_error(e: csv::Error) -> EmacrossError {
    EmacrossError::Io(e.into())
}

fn timestamp_field(ts: Option<NaiveDateTime>) -> String {
    ts.map(|t| t.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

fn order_record(order: &Order) -> [String; 11] {
    [
        order.instrument.to_string(),
        order.side.to_string(),
        order.order_type.to_string(),
        order.time_in_force.to_string(),
        order.quantity.to_string(),
        order.limit_price.to_string(),
        order.stop_price.to_string(),
        order.trailing_distance.to_string(),
        timestamp_field(Some(order.order_timestamp)),
        timestamp_field(order.execution_target_timestamp),
        timestamp_field(order.expiration_timestamp),
    ]
}

impl<W: Write> OrderSink for CsvOrderWriter<W> {
    /// Validates the whole batch before writing any of it.
    fn submit(&mut self, orders: &[Order]) -> Result<(), EmacrossError> {
        validate_batch(orders)?;
        self.write_header()?;
        for order in orders {
            self.writer
                .write_record(order_record(order))
                .map_err(csv_error)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::instrument::Instrument;
    use crate::domain::order::{OrderSide, OrderType, TimeInForce};
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 2)
            .unwrap()
            .and_hms_opt(16, 0, 0)
            .unwrap()
    }

    fn written(orders: &[Order]) -> String {
        let mut sink = CsvOrderWriter::new(Vec::new());
        sink.submit(orders).unwrap();
        String::from_utf8(sink.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn writes_header_and_rows() {
        let bhp = Instrument::new("BHP", "ASX");
        let out = written(&[
            Order::market_gtc(bhp.clone(), OrderSide::Sell, 30.0, ts()),
            Order::market_gtc(bhp, OrderSide::Buy, 60.0, ts()),
        ]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], ORDER_HEADER.join(","));
        assert_eq!(
            lines[1],
            "BHP.ASX,SELL,MARKET,GOOD_TILL_CANCELED,30,0,0,0,2024-05-02 16:00:00,,"
        );
        assert!(lines[2].starts_with("BHP.ASX,BUY,MARKET,GOOD_TILL_CANCELED,60,"));
    }

    #[test]
    fn optional_timestamps_are_written() {
        let order = Order::new(Instrument::new("CBA", "ASX"), ts())
            .with_order_type(OrderType::Limit)
            .with_limit_price(101.5)
            .with_quantity(5.0)
            .with_time_in_force(TimeInForce::GoodTillExpires)
            .with_expiration(ts() + chrono::Duration::days(2));
        let out = written(&[order]);
        let row = out.lines().nth(1).unwrap();
        assert!(row.ends_with(",2024-05-02 16:00:00,,2024-05-04 16:00:00"));
        assert!(row.contains(",LIMIT,GOOD_TILL_EXPIRES,5,101.5,"));
    }

    #[test]
    fn execution_target_is_written() {
        let order = Order::market_gtc(Instrument::new("BHP", "ASX"), OrderSide::Buy, 2.0, ts())
            .with_execution_target(ts() + chrono::Duration::hours(1));
        let out = written(&[order]);
        let row = out.lines().nth(1).unwrap();
        assert!(row.ends_with(",2024-05-02 16:00:00,2024-05-02 17:00:00,"));
    }

    #[test]
    fn empty_batch_writes_header_only() {
        let out = written(&[]);
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn header_written_once_across_batches() {
        let mut sink = CsvOrderWriter::new(Vec::new());
        let order = Order::market_gtc(Instrument::new("BHP", "ASX"), OrderSide::Buy, 1.0, ts());
        sink.submit(std::slice::from_ref(&order)).unwrap();
        sink.submit(&[order]).unwrap();
        let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        assert_eq!(out.lines().count(), 3);
    }

    #[test]
    fn invalid_order_rejects_whole_batch() {
        let bhp = Instrument::new("BHP", "ASX");
        let mut sink = CsvOrderWriter::new(Vec::new());
        let result = sink.submit(&[
            Order::market_gtc(bhp.clone(), OrderSide::Buy, 10.0, ts()),
            Order::market_gtc(bhp, OrderSide::Buy, -1.0, ts()),
        ]);
        assert!(matches!(result, Err(EmacrossError::InvalidOrder { .. })));
        assert!(sink.into_inner().unwrap().is_empty());
    }
}
