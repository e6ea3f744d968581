//! Common types for the chartsynth candle generator

#![deny(warnings)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]
#![deny(dead_code)]
#![deny(unused)]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod candle;
pub mod series;
pub mod timeframe;

pub use candle::Candle;
pub use series::{Series, SeriesFamily};
pub use timeframe::{LADDER, ParseTimeframeError, Timeframe};
