//! End-to-end generation of a series family

use crate::config::GenerationParameters;
use crate::error::{Result, Stage, SynthError};
use crate::normalize::normalize;
use crate::repair::{connect, correct};
use crate::resample::resample_ladder;
use crate::volatility::VolatilityInjector;
use crate::walk::WalkBuilder;
use chrono::{Duration, NaiveDate};
use common::{Series, SeriesFamily, Timeframe};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

/// Generate a complete series family.
///
/// Every random draw comes from one `StdRng` seeded with
/// `params.random_seed`, so equal parameters give identical output.
///
/// # Errors
/// - [`SynthError::Configuration`] for invalid parameters
/// - [`SynthError::DegenerateSeries`] when the base series is flat
/// - [`SynthError::InvariantViolation`] if a repaired or resampled series
///   still breaks the OHLC ordering
pub fn generate(params: &GenerationParameters) -> Result<SeriesFamily> {
    params.validate()?;

    let origin = params.origin()?;
    let mut rng = StdRng::seed_from_u64(params.random_seed);
    let builder = WalkBuilder::new(params.distribution, params.ticks_per_candle as usize);

    info!(
        days = params.total_days,
        seed = params.random_seed,
        start = %origin,
        "Generating OHLC data"
    );

    let (distribution, candles) =
        builder.build(&mut rng, params.start_price, params.volatility, origin, params.base_candles())?;
    debug!(%distribution, candles = candles.len(), "Built base walk");
    let base = Series::new(Timeframe::BASE, candles);

    let injector = VolatilityInjector::new(params.injection.clone(), builder);
    let (base, _) = injector.inject(&mut rng, base, params.start_price, params.volatility)?;

    let mut base = connect(base, params.start_price);
    let repaired = correct(base.candles_mut());
    debug!(repaired, "Corrected connected candles");
    if correct(base.candles_mut()) > 0 {
        return Err(violation(&base, Stage::Connection));
    }

    let (base, multiplier) = normalize(&mut rng, base, params.price_scale)?;
    let family = resample_ladder(base, origin, multiplier)?;

    if let Some((_, series)) = family.iter().find(|(_, series)| series.find_inconsistent().is_some()) {
        return Err(violation(series, Stage::Family));
    }

    Ok(family)
}

fn violation(series: &Series, stage: Stage) -> SynthError {
    SynthError::InvariantViolation {
        timeframe: series.timeframe,
        index: series.find_inconsistent().unwrap_or(0),
        stage,
    }
}

/// Uniformly random date in `earliest..=latest`.
///
/// The bounds are swapped when given in reverse.
pub fn random_start_date<R: Rng + ?Sized>(rng: &mut R, earliest: NaiveDate, latest: NaiveDate) -> NaiveDate {
    let (low, high) = if earliest <= latest { (earliest, latest) } else { (latest, earliest) };
    let span = (high - low).num_days();
    low + Duration::days(rng.gen_range(0..=span))
}
