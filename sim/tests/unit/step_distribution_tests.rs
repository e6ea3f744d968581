//! Shape of the step distributions

use approx::assert_abs_diff_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::Distribution;
use rstest::*;
use sim::StepDistribution;
use sim::steps::{Logistic, draw_steps};
use statrs::distribution::Laplace;
use statrs::statistics::{Data, OrderStatistics, Statistics};

#[fixture]
fn rng() -> StdRng {
    StdRng::seed_from_u64(2024)
}

// Interquartile range over standard deviation: normal 1.349,
// Laplace 2 ln 2 / sqrt 2 = 0.980, logistic 2 sqrt 3 ln 3 / pi = 1.211
#[rstest]
#[case(StepDistribution::Normal, 1.349)]
#[case(StepDistribution::Laplace, 0.980)]
#[case(StepDistribution::Logistic, 1.211)]
fn test_tail_weight(mut rng: StdRng, #[case] distribution: StepDistribution, #[case] expected: f64) {
    let steps = draw_steps(&mut rng, distribution, 400_000, 1.5).unwrap();
    let std_dev = (&steps[1..]).population_std_dev();
    let iqr = Data::new(steps[1..].to_vec()).interquartile_range();

    assert_abs_diff_eq!(iqr / std_dev, expected, epsilon = 0.03);
}

#[rstest]
fn test_location_shifts_samples(mut rng: StdRng) {
    let laplace = Laplace::new(5.0, 1.0).unwrap();
    let logistic = Logistic::new(-3.0, 0.5).unwrap();

    let mut laplace_draws = Data::new((0..50_000).map(|_| laplace.sample(&mut rng)).collect::<Vec<f64>>());
    let mut logistic_draws = Data::new((0..50_000).map(|_| logistic.sample(&mut rng)).collect::<Vec<f64>>());

    assert_abs_diff_eq!(laplace_draws.median(), 5.0, epsilon = 0.05);
    assert_abs_diff_eq!(logistic_draws.median(), -3.0, epsilon = 0.05);
}

#[rstest]
fn test_same_seed_same_steps() {
    for distribution in StepDistribution::ALL {
        let a = draw_steps(&mut StdRng::seed_from_u64(7), distribution, 1000, 1.0).unwrap();
        let b = draw_steps(&mut StdRng::seed_from_u64(7), distribution, 1000, 1.0).unwrap();
        assert_eq!(a, b);
    }
}
