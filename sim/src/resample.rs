//! Multi-timeframe resampling
//!
//! Each ladder level is aggregated from the level right below it, never
//! straight from the base series. Bins are right-closed and labeled with
//! their end time (see [`Timeframe::bin_end`]).

use crate::error::{Result, SynthError};
use chrono::{DateTime, Utc};
use common::{Candle, LADDER, Series, SeriesFamily, Timeframe};
use std::time::Instant;
use tracing::{debug, info};

/// Aggregate `source` into `target` bins.
///
/// Every output candle is the first-open, max-high, min-low, last-close
/// aggregate of the contiguous run of source candles whose labels fall in
/// its bin. Bins with no source candle are not emitted.
///
/// # Errors
/// Returns [`SynthError::Configuration`] when a timestamp lies outside the
/// range `target` bins can be computed for.
pub fn resample(source: &Series, target: Timeframe, origin: DateTime<Utc>) -> Result<Series> {
    let labels = source
        .iter()
        .map(|candle| {
            target.bin_end(candle.timestamp, origin).ok_or_else(|| {
                SynthError::Configuration(format!("{} is outside the range of {target} bins", candle.timestamp))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let candles = source.candles();
    let mut out = Vec::new();
    let mut run_start = 0;

    while run_start < candles.len() {
        let label = labels[run_start];
        let run_len = labels[run_start..].iter().take_while(|next| **next == label).count();

        out.extend(Candle::aggregate(&candles[run_start..run_start + run_len], label));
        run_start += run_len;
    }

    Ok(Series::new(target, out))
}

/// Build the whole ladder from a finished base series.
///
/// `origin` is the time the first base candle opens at; it anchors the
/// `3D` bins.
///
/// # Errors
/// Propagates [`resample`] failures.
pub fn resample_ladder(base: Series, origin: DateTime<Utc>, price_scale: u32) -> Result<SeriesFamily> {
    info!("Resampling timeframes");
    let started = Instant::now();

    let mut family = SeriesFamily::new(price_scale);
    let mut previous = base;

    for target in LADDER.into_iter().skip(1) {
        let next = resample(&previous, target, origin)?;
        debug!(timeframe = %target, candles = next.len(), "Resampled");
        family.insert(std::mem::replace(&mut previous, next));
    }
    family.insert(previous);

    info!(elapsed_ms = started.elapsed().as_millis(), "Finished resampling");
    Ok(family)
}
