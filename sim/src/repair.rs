//! OHLC invariant correction and candle connection

use common::{Candle, Series};
use tracing::info;

/// Widen `low` and `high` so they bound the other three prices.
///
/// `low` becomes `min(open, high, close)` when it sits above that value,
/// then `high` becomes `max(open, low, close)` when it sits below. Open and
/// close are never touched. Returns whether the candle changed.
pub fn correct_candle(candle: &mut Candle) -> bool {
    let mut changed = false;

    let floor = candle.open.min(candle.high).min(candle.close);
    if candle.low > floor {
        candle.low = floor;
        changed = true;
    }

    let ceiling = candle.open.max(candle.low).max(candle.close);
    if candle.high < ceiling {
        candle.high = ceiling;
        changed = true;
    }

    changed
}

/// Correct every candle in place and return how many changed.
///
/// One pass always reaches a fixed point: after it `low` is at most every
/// other price and `high` is at least every other price, so a second pass
/// finds nothing to do.
pub fn correct(candles: &mut [Candle]) -> usize {
    candles.iter_mut().map(correct_candle).filter(|changed| *changed).count()
}

/// Shift closes forward into opens so every candle opens at the previous
/// close, and the first candle opens at `start_price`.
///
/// Moving an open can leave it outside `[low, high]`, so the series needs a
/// [`correct`] pass afterwards.
#[must_use]
pub fn connect(mut series: Series, start_price: f64) -> Series {
    info!("Connecting open and closing candles");

    let mut previous_close = start_price;
    for candle in series.candles_mut() {
        candle.open = previous_close;
        previous_close = candle.close;
    }
    series
}
