//! Generation parameters

use crate::error::{Result, SynthError};
use crate::steps::StepDistribution;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Base candles per day
pub const MINUTES_IN_1DAY: usize = 1440;

/// How the step distribution is chosen for each walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionChoice {
    /// Draw uniformly among all distributions every time a walk is built
    #[default]
    Random,
    /// Always use normal steps
    Normal,
    /// Always use Laplace steps
    Laplace,
    /// Always use logistic steps
    Logistic,
}

impl DistributionChoice {
    /// Resolve the distribution for one walk
    pub fn pick<R: Rng + ?Sized>(self, rng: &mut R) -> StepDistribution {
        match self {
            Self::Random => StepDistribution::ALL[rng.gen_range(0..StepDistribution::ALL.len())],
            Self::Normal => StepDistribution::Normal,
            Self::Laplace => StepDistribution::Laplace,
            Self::Logistic => StepDistribution::Logistic,
        }
    }
}

impl FromStr for DistributionChoice {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "normal" => Ok(Self::Normal),
            "laplace" => Ok(Self::Laplace),
            "logistic" => Ok(Self::Logistic),
            other => Err(SynthError::Configuration(format!("unknown distribution: {other}"))),
        }
    }
}

/// Price each regenerated volatile sub-path starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubPathAnchor {
    /// The run's starting price, so a late range restarts near it
    #[default]
    StartPrice,
    /// The close of the candle right before the range
    PreviousClose,
}

/// Volatility injection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolatilityInjection {
    /// Splice volatile ranges into the base series
    pub enabled: bool,

    /// Shortest volatile range in base candles
    pub period_min: usize,

    /// Longest volatile range in base candles (inclusive)
    pub period_max: usize,

    /// Denominator of the per-index start probability
    pub probability_scale: u32,

    /// Lower bound of the volatility multiplier for a range
    pub boost_min: f64,

    /// Upper bound of the volatility multiplier for a range
    pub boost_max: f64,

    /// Where each sub-path starts
    pub anchor: SubPathAnchor,
}

impl Default for VolatilityInjection {
    fn default() -> Self {
        Self {
            enabled: true,
            period_min: 60,
            period_max: 1440,
            probability_scale: 100_000,
            boost_min: 1.01,
            boost_max: 1.02,
            anchor: SubPathAnchor::StartPrice,
        }
    }
}

/// Half-open range the normalizer multiplier is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceScale {
    /// Smallest multiplier
    pub min: u32,
    /// One past the largest multiplier
    pub max: u32,
}

impl Default for PriceScale {
    fn default() -> Self {
        Self { min: 9, max: 999 }
    }
}

/// Immutable configuration of one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParameters {
    /// Length of the base series in days
    pub total_days: u32,

    /// First open of the series and anchor of the walk
    pub start_price: f64,

    /// Scale of the step distribution
    pub volatility: f64,

    /// Step distribution selection
    pub distribution: DistributionChoice,

    /// Seed of the run's random source
    pub random_seed: u64,

    /// Calendar date of the series origin (00:00 UTC)
    pub start_date: NaiveDate,

    /// Walk ticks binned into each base candle
    pub ticks_per_candle: u32,

    /// Volatile range splicing
    pub injection: VolatilityInjection,

    /// Normalizer multiplier range
    pub price_scale: PriceScale,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            total_days: 120,
            start_price: 100_000.0,
            volatility: 1.5,
            distribution: DistributionChoice::Random,
            random_seed: 42,
            start_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default(),
            ticks_per_candle: 60,
            injection: VolatilityInjection::default(),
            price_scale: PriceScale::default(),
        }
    }
}

impl GenerationParameters {
    /// Number of base candles
    #[must_use]
    pub fn base_candles(&self) -> usize {
        self.total_days as usize * MINUTES_IN_1DAY
    }

    /// Timestamp the first base candle opens at
    ///
    /// # Errors
    /// Returns a configuration error when the start date has no midnight.
    pub fn origin(&self) -> Result<DateTime<Utc>> {
        self.start_date
            .and_hms_opt(0, 0, 0)
            .map(|midnight| Utc.from_utc_datetime(&midnight))
            .ok_or_else(|| SynthError::Configuration(format!("invalid start date {}", self.start_date)))
    }

    /// Check every parameter before generation begins
    ///
    /// # Errors
    /// Returns the first parameter found out of range.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(SynthError::Configuration(msg));

        if self.total_days == 0 {
            return invalid("total_days must be positive".to_string());
        }
        if !self.start_price.is_finite() || self.start_price <= 0.0 {
            return invalid(format!("start_price must be positive and finite, got {}", self.start_price));
        }
        if !self.volatility.is_finite() || self.volatility < 0.0 {
            return invalid(format!("volatility must be finite and non-negative, got {}", self.volatility));
        }
        if self.ticks_per_candle == 0 {
            return invalid("ticks_per_candle must be positive".to_string());
        }
        if self.base_candles().checked_mul(self.ticks_per_candle as usize).is_none() {
            return invalid(format!(
                "{} days at {} ticks per candle overflows the tick buffer",
                self.total_days, self.ticks_per_candle
            ));
        }

        let injection = &self.injection;
        if injection.period_min == 0 || injection.period_min > injection.period_max {
            return invalid(format!(
                "volatile period range {}..={} is empty",
                injection.period_min, injection.period_max
            ));
        }
        if injection.probability_scale < 2 {
            return invalid("probability_scale must be at least 2".to_string());
        }
        if !injection.boost_min.is_finite()
            || !injection.boost_max.is_finite()
            || injection.boost_min < 1.0
            || injection.boost_min > injection.boost_max
        {
            return invalid(format!(
                "volatility boost {}..{} must be finite, at least 1 and ordered",
                injection.boost_min, injection.boost_max
            ));
        }

        if self.price_scale.min == 0 || self.price_scale.min >= self.price_scale.max {
            return invalid(format!(
                "price scale {}..{} must be a non-empty range above zero",
                self.price_scale.min, self.price_scale.max
            ));
        }

        self.origin().map(|_| ())
    }
}
