//! Random price increments
//!
//! Normal steps come from `rand_distr` and Laplace steps from `statrs`.
//! Neither crate ships a logistic distribution, so [`Logistic`] inverts its
//! CDF on a uniform draw from the open interval `(0, 1)`.

use crate::error::{Result, SynthError};
use rand::Rng;
use rand::distributions::Open01;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use statrs::distribution::Laplace;
use std::fmt;

/// Centered distribution the walk increments are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepDistribution {
    /// Gaussian steps
    Normal,
    /// Double-exponential steps with heavier tails
    Laplace,
    /// Logistic steps
    Logistic,
}

impl StepDistribution {
    /// Every distribution, in selection order
    pub const ALL: [Self; 3] = [Self::Normal, Self::Laplace, Self::Logistic];
}

impl fmt::Display for StepDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => f.write_str("normal"),
            Self::Laplace => f.write_str("laplace"),
            Self::Logistic => f.write_str("logistic"),
        }
    }
}

/// Logistic distribution `Logistic(location, scale)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Logistic {
    location: f64,
    scale: f64,
}

impl Logistic {
    /// Construct, rejecting negative or non-finite parameters
    ///
    /// # Errors
    /// Returns a configuration error for an invalid location or scale.
    pub fn new(location: f64, scale: f64) -> Result<Self> {
        check_parameters("logistic", location, scale)?;
        Ok(Self { location, scale })
    }
}

impl Distribution<f64> for Logistic {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = Open01.sample(rng);
        self.scale.mul_add((u / (1.0 - u)).ln(), self.location)
    }
}

fn check_parameters(name: &str, location: f64, scale: f64) -> Result<()> {
    if location.is_finite() && scale.is_finite() && scale >= 0.0 {
        Ok(())
    } else {
        Err(SynthError::Configuration(format!(
            "{name} distribution needs finite location and non-negative scale, got ({location}, {scale})"
        )))
    }
}

/// Draw `count` centered increments with the given scale.
///
/// The first increment is always zero so the walk starts exactly at its
/// anchor price. A zero scale gives all-zero steps without drawing.
///
/// # Errors
/// Returns a configuration error when the distribution cannot be built for
/// `scale` or a draw is not finite.
pub fn draw_steps<R: Rng + ?Sized>(
    rng: &mut R,
    distribution: StepDistribution,
    count: usize,
    scale: f64,
) -> Result<Vec<f64>> {
    if scale == 0.0 {
        return Ok(vec![0.0; count]);
    }

    let mut steps = match distribution {
        StepDistribution::Normal => {
            let normal = Normal::new(0.0, scale).map_err(|e| {
                SynthError::Configuration(format!("normal distribution with scale {scale}: {e}"))
            })?;
            sample_n(&normal, rng, count)
        }
        StepDistribution::Laplace => {
            let laplace = Laplace::new(0.0, scale).map_err(|e| {
                SynthError::Configuration(format!("laplace distribution with scale {scale}: {e}"))
            })?;
            sample_n(&laplace, rng, count)
        }
        StepDistribution::Logistic => sample_n(&Logistic::new(0.0, scale)?, rng, count),
    };

    if let Some(first) = steps.first_mut() {
        *first = 0.0;
    }

    if let Some(index) = steps.iter().position(|step| !step.is_finite()) {
        return Err(SynthError::Configuration(format!(
            "{distribution} step {index} is not finite at scale {scale}"
        )));
    }

    Ok(steps)
}

fn sample_n<D: Distribution<f64>, R: Rng + ?Sized>(dist: &D, rng: &mut R, count: usize) -> Vec<f64> {
    (0..count).map(|_| dist.sample(rng)).collect()
}
