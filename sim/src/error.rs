//! Error types for series generation

use common::Timeframe;
use std::fmt;
use thiserror::Error;

/// Pipeline stage that detected an invariant violation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Verification pass after connecting opens to previous closes
    Connection,
    /// Final check of the finished family
    Family,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection => f.write_str("connection"),
            Self::Family => f.write_str("family"),
        }
    }
}

/// Generation error types
#[derive(Debug, Error)]
pub enum SynthError {
    /// Invalid generation parameters, or parameters whose walk leaves the
    /// finite range of `f64`
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Every price in the series is the same value, so it cannot be normalized
    #[error("Degenerate series: min {min} equals max {max}")]
    DegenerateSeries {
        /// Lowest price seen
        min: f64,
        /// Highest price seen
        max: f64,
    },

    /// A candle still breaks the OHLC ordering after correction
    #[error("Invariant violation in {timeframe} series at index {index} after {stage}")]
    InvariantViolation {
        /// Series the candle belongs to
        timeframe: Timeframe,
        /// Position of the offending candle
        index: usize,
        /// Stage that detected it
        stage: Stage,
    },
}

/// Result alias for generation operations
pub type Result<T> = std::result::Result<T, SynthError>;
