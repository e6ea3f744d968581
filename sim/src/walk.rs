//! Random walk construction and binning into base candles

use crate::config::DistributionChoice;
use crate::error::{Result, SynthError};
use crate::steps::{StepDistribution, draw_steps};
use chrono::{DateTime, Duration, Utc};
use common::Candle;
use rand::Rng;
use tracing::debug;

/// Decimal places kept on walk prices
pub const PRICE_DECIMALS: i32 = 6;

/// Round to `decimals` places
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Integrate `steps` from `start_price`.
///
/// Prices are rounded to six places and folded to their absolute value so
/// the path never goes negative. The running sum itself stays unrounded.
#[must_use]
pub fn price_path(start_price: f64, steps: &[f64]) -> Vec<f64> {
    steps
        .iter()
        .scan(start_price, |price, step| {
            *price += step;
            Some(round_to(*price, PRICE_DECIMALS).abs())
        })
        .collect()
}

/// Group consecutive ticks into candles of `ticks_per_candle` ticks.
///
/// Candle `k` is labeled `origin + (k + 1)` minutes. A trailing partial
/// group is dropped.
#[must_use]
pub fn bin_ticks(ticks: &[f64], ticks_per_candle: usize, origin: DateTime<Utc>) -> Vec<Candle> {
    if ticks_per_candle == 0 {
        return Vec::new();
    }

    let mut label = origin;
    ticks
        .chunks_exact(ticks_per_candle)
        .map(|chunk| {
            label += Duration::minutes(1);
            let (high, low) = chunk
                .iter()
                .fold((f64::NEG_INFINITY, f64::INFINITY), |(high, low), tick| {
                    (high.max(*tick), low.min(*tick))
                });
            Candle::new(label, chunk[0], high, low, chunk[chunk.len() - 1])
        })
        .collect()
}

/// Builds base-resolution candles from a fresh random walk
#[derive(Debug, Clone, Copy)]
pub struct WalkBuilder {
    distribution: DistributionChoice,
    ticks_per_candle: usize,
}

impl WalkBuilder {
    /// Create a builder sampling `ticks_per_candle` ticks per candle
    #[must_use]
    pub const fn new(distribution: DistributionChoice, ticks_per_candle: usize) -> Self {
        Self {
            distribution,
            ticks_per_candle,
        }
    }

    /// Ticks binned into each candle
    #[must_use]
    pub const fn ticks_per_candle(&self) -> usize {
        self.ticks_per_candle
    }

    /// Build `candles` candles starting at `start_price`, the first one
    /// opening at `origin`.
    ///
    /// # Errors
    /// Propagates step generation failures and returns
    /// [`SynthError::Configuration`] when the cumulative path overflows.
    pub fn build<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        start_price: f64,
        volatility: f64,
        origin: DateTime<Utc>,
        candles: usize,
    ) -> Result<(StepDistribution, Vec<Candle>)> {
        let distribution = self.distribution.pick(rng);
        let ticks = candles * self.ticks_per_candle;

        debug!(%distribution, ticks, volatility, "Building random walk");

        let steps = draw_steps(rng, distribution, ticks, volatility)?;
        let prices = price_path(start_price, &steps);
        if let Some(index) = prices.iter().position(|price| !price.is_finite()) {
            return Err(SynthError::Configuration(format!(
                "price path overflows at tick {index} with volatility {volatility}"
            )));
        }
        Ok((distribution, bin_ticks(&prices, self.ticks_per_candle, origin)))
    }
}
