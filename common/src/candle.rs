//! OHLC candle type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// OHLC candle labeled with the end time of its interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Right edge of the candle interval
    pub timestamp: DateTime<Utc>,
    /// Open price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Close price
    pub close: f64,
}

impl Candle {
    /// Create a new candle
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
        }
    }

    /// Candle whose four prices are the same value
    #[must_use]
    pub const fn flat(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self::new(timestamp, price, price, price, price)
    }

    /// Check `low <= min(open, close) <= max(open, close) <= high`
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.low <= self.open.min(self.close) && self.high >= self.open.max(self.close)
    }

    /// Aggregate a contiguous run of candles into one candle labeled `timestamp`.
    ///
    /// Open is the first open, high the max high, low the min low and close
    /// the last close. Returns `None` for an empty run.
    #[must_use]
    pub fn aggregate(run: &[Self], timestamp: DateTime<Utc>) -> Option<Self> {
        let first = run.first()?;
        let last = run.last()?;

        let (high, low) = run.iter().fold((first.high, first.low), |(high, low), candle| {
            (high.max(candle.high), low.min(candle.low))
        });

        Some(Self::new(timestamp, first.open, high, low, last.close))
    }

    /// Apply `f` to all four prices
    #[must_use]
    pub fn map_prices(self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(self.timestamp, f(self.open), f(self.high), f(self.low), f(self.close))
    }
}

impl fmt::Display for Candle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} O:{:.4} H:{:.4} L:{:.4} C:{:.4}",
            self.timestamp.format("%Y-%m-%d %H:%M"),
            self.open,
            self.high,
            self.low,
            self.close
        )
    }
}
