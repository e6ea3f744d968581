//! Min-max normalization with a random price scale

use crate::config::PriceScale;
use crate::error::{Result, SynthError};
use crate::walk::round_to;
use common::Series;
use rand::Rng;
use tracing::{debug, info};

/// Decimal places kept on normalized prices
pub const NORMALIZED_DECIMALS: i32 = 4;

/// Lowest and highest value across every open, high, low and close
#[must_use]
pub fn price_bounds(series: &Series) -> Option<(f64, f64)> {
    let first = series.first()?;
    Some(series.iter().fold((first.low, first.high), |(min, max), candle| {
        (
            min.min(candle.open).min(candle.high).min(candle.low).min(candle.close),
            max.max(candle.open).max(candle.high).max(candle.low).max(candle.close),
        )
    }))
}

/// Map every price to `(value - min) / (max - min) * multiplier`, rounded
/// to four places.
///
/// # Errors
/// Returns [`SynthError::DegenerateSeries`] when the series is empty or
/// every price is equal, and [`SynthError::Configuration`] when a price is
/// not finite.
pub fn normalize_with(mut series: Series, multiplier: u32) -> Result<Series> {
    let (min, max) = price_bounds(&series).ok_or(SynthError::DegenerateSeries {
        min: f64::NAN,
        max: f64::NAN,
    })?;

    if !min.is_finite() || !max.is_finite() {
        return Err(SynthError::Configuration(format!(
            "cannot normalize prices spanning {min} to {max}"
        )));
    }
    if max <= min {
        return Err(SynthError::DegenerateSeries { min, max });
    }

    let span = max - min;
    let scale = f64::from(multiplier);
    for candle in series.candles_mut() {
        *candle = candle.map_prices(|value| round_to((value - min) / span * scale, NORMALIZED_DECIMALS));
    }
    Ok(series)
}

/// Draw a multiplier from `scale` and normalize with it.
///
/// # Errors
/// Returns [`SynthError::DegenerateSeries`] for a constant series.
pub fn normalize<R: Rng + ?Sized>(rng: &mut R, series: Series, scale: PriceScale) -> Result<(Series, u32)> {
    info!("Normalizing OHLC data");

    let multiplier = rng.gen_range(scale.min..scale.max);
    debug!(multiplier, "Drew price scale");

    normalize_with(series, multiplier).map(|series| (series, multiplier))
}
