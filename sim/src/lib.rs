//! Synthetic candle generation for chart guessing games
//!
//! Builds a 1 minute OHLC series from a random walk, splices in bursts of
//! higher volatility, connects every open to the previous close, rescales
//! prices into a random band and resamples the result up the timeframe
//! ladder:
//! - `steps`: random increments from normal, Laplace or logistic draws
//! - `walk`: cumulative price path binned into base candles
//! - `volatility`: range selection and in-place sub-path splicing
//! - `repair`: OHLC invariant correction and candle connection
//! - `normalize`: min-max rescaling with a random multiplier
//! - `resample`: right-closed, right-labeled aggregation up the ladder

#![deny(warnings)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]
#![deny(dead_code)]
#![deny(unused)]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod repair;
pub mod resample;
pub mod steps;
pub mod volatility;
pub mod walk;

pub use common::{Candle, LADDER, Series, SeriesFamily, Timeframe};
pub use config::{DistributionChoice, GenerationParameters, PriceScale, SubPathAnchor, VolatilityInjection};
pub use error::{Result, Stage, SynthError};
pub use pipeline::{generate, random_start_date};
pub use steps::StepDistribution;
