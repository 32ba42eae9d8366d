//! Daily stock price observation model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One trading day of OHLCV data for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockObservation {
    /// Trading day; only the calendar day is used for alignment
    pub date: DateTime<Utc>,
    /// Ticker symbol (e.g., "AAPL")
    pub symbol: String,
    pub open_price: Decimal,
    pub close_price: Decimal,
    pub high_price: Decimal,
    pub low_price: Decimal,
    /// Shares traded
    pub volume: u64,
    /// Intraday change: (close - open) / open * 100
    pub percentage_change: f64,
}

impl StockObservation {
    /// Creates an observation, deriving the intraday percentage change.
    #[must_use]
    pub fn new(
        date: DateTime<Utc>,
        symbol: impl Into<String>,
        open_price: Decimal,
        close_price: Decimal,
        high_price: Decimal,
        low_price: Decimal,
        volume: u64,
    ) -> Self {
        Self {
            date,
            symbol: symbol.into(),
            open_price,
            close_price,
            high_price,
            low_price,
            volume,
            percentage_change: percentage_change(open_price, close_price),
        }
    }

    /// Calendar day of the observation with the time-of-day dropped.
    #[must_use]
    pub fn calendar_date(&self) -> NaiveDate {
        self.date.date_naive()
    }

    /// Closing price as a float for statistical work.
    #[must_use]
    pub fn close_f64(&self) -> f64 {
        self.close_price.to_f64().unwrap_or(0.0)
    }
}

/// Percentage change from `open` to `close`.
///
/// Zero when the open price is zero or the result overflows `Decimal`.
#[must_use]
pub fn percentage_change(open: Decimal, close: Decimal) -> f64 {
    if open.is_zero() {
        return 0.0;
    }

    close
        .checked_sub(open)
        .and_then(|diff| diff.checked_div(open))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|pct| pct.to_f64())
        .unwrap_or(0.0)
}
