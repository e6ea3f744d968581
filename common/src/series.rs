//! Candle series and the multi-timeframe family derived from one base series

use crate::candle::Candle;
use crate::timeframe::Timeframe;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Candles at one uniform timeframe, strictly increasing in timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Resolution of every candle in the series
    pub timeframe: Timeframe,
    candles: Vec<Candle>,
}

impl Series {
    /// Wrap candles that are already ordered by timestamp
    #[must_use]
    pub const fn new(timeframe: Timeframe, candles: Vec<Candle>) -> Self {
        Self { timeframe, candles }
    }

    /// Number of candles
    #[must_use]
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Check if the series holds no candles
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// First candle
    #[must_use]
    pub fn first(&self) -> Option<&Candle> {
        self.candles.first()
    }

    /// Last candle
    #[must_use]
    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// Candles as a slice
    #[must_use]
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Mutable access for in-place passes
    pub fn candles_mut(&mut self) -> &mut [Candle] {
        &mut self.candles
    }

    /// Iterate candles in time order
    pub fn iter(&self) -> std::slice::Iter<'_, Candle> {
        self.candles.iter()
    }

    /// Consume the series and return its candles
    #[must_use]
    pub fn into_candles(self) -> Vec<Candle> {
        self.candles
    }

    /// Index of the first candle breaking `low <= open, close <= high`
    #[must_use]
    pub fn find_inconsistent(&self) -> Option<usize> {
        self.candles.iter().position(|candle| !candle.is_consistent())
    }

    /// Index of the first candle whose open differs from the previous close
    /// by more than `tolerance`
    #[must_use]
    pub fn find_discontinuity(&self, tolerance: f64) -> Option<usize> {
        self.candles
            .windows(2)
            .position(|pair| (pair[1].open - pair[0].close).abs() > tolerance)
            .map(|index| index + 1)
    }

    /// Lowest low and highest high
    #[must_use]
    pub fn price_range(&self) -> Option<(f64, f64)> {
        let first = self.candles.first()?;
        Some(self.candles.iter().fold((first.low, first.high), |(low, high), candle| {
            (low.min(candle.low), high.max(candle.high))
        }))
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Candle;
    type IntoIter = std::slice::Iter<'a, Candle>;

    fn into_iter(self) -> Self::IntoIter {
        self.candles.iter()
    }
}

/// Series at every ladder timeframe, all derived from the same base series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesFamily {
    series: BTreeMap<Timeframe, Series>,
    /// Multiplier applied after min-max normalization
    pub price_scale: u32,
}

impl SeriesFamily {
    /// Create an empty family
    #[must_use]
    pub const fn new(price_scale: u32) -> Self {
        Self {
            series: BTreeMap::new(),
            price_scale,
        }
    }

    /// Add or replace the series for its timeframe
    pub fn insert(&mut self, series: Series) -> Option<Series> {
        self.series.insert(series.timeframe, series)
    }

    /// Series for `timeframe`
    #[must_use]
    pub fn get(&self, timeframe: Timeframe) -> Option<&Series> {
        self.series.get(&timeframe)
    }

    /// The base (1 minute) series
    #[must_use]
    pub fn base(&self) -> Option<&Series> {
        self.get(Timeframe::BASE)
    }

    /// Iterate in ladder order, finest first
    pub fn iter(&self) -> impl Iterator<Item = (Timeframe, &Series)> {
        self.series.iter().map(|(timeframe, series)| (*timeframe, series))
    }

    /// Timeframes present, finest first
    pub fn timeframes(&self) -> impl Iterator<Item = Timeframe> + '_ {
        self.series.keys().copied()
    }

    /// Number of timeframes present
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Check if the family holds no series
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Keep only the listed timeframes
    pub fn retain(&mut self, keep: &[Timeframe]) {
        self.series.retain(|timeframe, _| keep.contains(timeframe));
    }
}
