//! Volatile period injection
//!
//! Uniform noise looks synthetic. Short stretches of the base series are
//! regenerated with a slightly higher volatility and spliced back in place.

use crate::config::{SubPathAnchor, VolatilityInjection};
use crate::error::Result;
use crate::walk::WalkBuilder;
use chrono::Duration;
use common::{Candle, Series};
use rand::Rng;
use tracing::{debug, info};

/// Inclusive index range of base candles to regenerate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolatileRange {
    /// First replaced index
    pub start: usize,
    /// Last replaced index
    pub end: usize,
}

impl VolatileRange {
    /// Number of candles in the range
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Always false, a range covers at least one candle
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

/// Pick non-overlapping volatile ranges over a series of `len` candles.
///
/// A run-level chance in `1..100` is drawn first. Every index outside an
/// already accepted range then starts a new range when a uniform draw from
/// `1..probability_scale` falls below that chance. Range lengths are drawn
/// from `period_min..=period_max` and clipped to the last index.
pub fn select_ranges<R: Rng + ?Sized>(
    rng: &mut R,
    len: usize,
    config: &VolatilityInjection,
) -> Vec<VolatileRange> {
    let chance: u32 = rng.gen_range(1..100);
    let mut ranges = Vec::new();
    let mut index = 0;

    while index < len {
        if rng.gen_range(1..config.probability_scale) < chance {
            let period = rng.gen_range(config.period_min..=config.period_max);
            let end = (index + period - 1).min(len - 1);
            ranges.push(VolatileRange { start: index, end });
            index = end + 1;
        } else {
            index += 1;
        }
    }

    ranges
}

/// Overwrite the prices of `candles[start..]` with `replacement`.
///
/// Timestamps are kept. Writes past the end of the buffer are dropped.
/// Returns the number of candles written.
pub fn replace_range(candles: &mut [Candle], start: usize, replacement: &[Candle]) -> usize {
    let Some(target) = candles.get_mut(start..) else {
        return 0;
    };

    let written = target.len().min(replacement.len());
    for (slot, fresh) in target.iter_mut().zip(replacement) {
        slot.open = fresh.open;
        slot.high = fresh.high;
        slot.low = fresh.low;
        slot.close = fresh.close;
    }
    written
}

/// Splices higher-volatility sub-paths into a base series
#[derive(Debug, Clone)]
pub struct VolatilityInjector {
    config: VolatilityInjection,
    builder: WalkBuilder,
}

impl VolatilityInjector {
    /// Create an injector regenerating ranges with `builder`
    #[must_use]
    pub const fn new(config: VolatilityInjection, builder: WalkBuilder) -> Self {
        Self { config, builder }
    }

    /// Select ranges and regenerate each one in place.
    ///
    /// Each sub-path starts from `start_price`, or from the close right
    /// before its range under [`SubPathAnchor::PreviousClose`], and uses
    /// `volatility` scaled by a factor drawn from `boost_min..=boost_max`.
    /// Candle boundaries inside the series may break the OHLC ordering
    /// afterwards, so the result must go through connection and correction.
    ///
    /// # Errors
    /// Propagates walk construction failures.
    pub fn inject<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        mut series: Series,
        start_price: f64,
        volatility: f64,
    ) -> Result<(Series, Vec<VolatileRange>)> {
        if !self.config.enabled || series.is_empty() {
            return Ok((series, Vec::new()));
        }

        info!("Creating volatile periods");

        let ranges = select_ranges(rng, series.len(), &self.config);
        let candles = series.candles_mut();
        let mut replaced = 0;

        for range in &ranges {
            let anchor = match (self.config.anchor, range.start) {
                (SubPathAnchor::PreviousClose, start) if start > 0 => candles[start - 1].close,
                _ => start_price,
            };
            let boost = rng.gen_range(self.config.boost_min..=self.config.boost_max);
            let origin = candles[range.start].timestamp - Duration::minutes(1);

            debug!(start = range.start, len = range.len(), anchor, boost, "Regenerating volatile range");
            let (_, fresh) = self
                .builder
                .build(rng, anchor, volatility * boost, origin, range.len())?;
            replaced += replace_range(candles, range.start, &fresh);
        }

        debug!(ranges = ranges.len(), replaced, "Injected volatile periods");
        Ok((series, ranges))
    }
}
