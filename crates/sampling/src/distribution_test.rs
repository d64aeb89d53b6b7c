use approx::assert_relative_eq;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use crate::{
    sample_beta, sample_gaussian, sample_isotropic, sample_log_normal, sample_log_uniform,
    sample_rayleigh, sample_uniform, Distribution, Family, SamplingError,
};

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[test]
fn uniform_with_equal_bounds_returns_min() {
    let mut rng = ChaChaRng::seed_from_u64(1);
    for _ in 0..100 {
        assert_eq!(sample_uniform(&mut rng, 100.0, 100.0).unwrap(), 100.0);
    }
}

#[test]
fn uniform_stays_in_range() {
    let mut rng = ChaChaRng::seed_from_u64(2);
    for _ in 0..1_000 {
        let x = sample_uniform(&mut rng, -3.0, 5.0).unwrap();
        assert!((-3.0..5.0).contains(&x));
    }
}

#[test]
fn uniform_rejects_reversed_bounds() {
    let mut rng = ChaChaRng::seed_from_u64(3);
    assert_eq!(
        sample_uniform(&mut rng, 2.0, 1.0),
        Err(SamplingError::InvalidRange { min: 2.0, max: 1.0 })
    );
}

#[test]
fn log_uniform_requires_positive_min() {
    let mut rng = ChaChaRng::seed_from_u64(4);
    assert_eq!(
        sample_log_uniform(&mut rng, 0.0, 10.0),
        Err(SamplingError::InvalidRange { min: 0.0, max: 10.0 })
    );
}

#[test]
fn log_uniform_is_uniform_in_decades() {
    let mut rng = ChaChaRng::seed_from_u64(5);
    let n = 20_000;
    let below_ten = (0..n)
        .map(|_| sample_log_uniform(&mut rng, 1.0, 100.0).unwrap())
        .filter(|x| *x < 10.0)
        .count();
    let fraction = below_ten as f64 / n as f64;
    assert!((fraction - 0.5).abs() < 0.02, "fraction below 10 was {fraction}");
}

#[test]
fn rayleigh_mean_matches_avg() {
    let mut rng = ChaChaRng::seed_from_u64(6);
    let draws: Vec<f64> = (0..100_000)
        .map(|_| sample_rayleigh(&mut rng, 10.0).unwrap())
        .collect();
    assert!(draws.iter().all(|x| *x >= 0.0 && x.is_finite()));
    assert_relative_eq!(mean(&draws), 10.0, max_relative = 0.05);
}

#[test]
fn isotropic_cosines_are_uniform() {
    let mut rng = ChaChaRng::seed_from_u64(7);
    let n = 10_000;
    let mut cosines: Vec<f64> = (0..n)
        .map(|_| sample_isotropic(&mut rng, 0.0, 180.0).unwrap().to_radians().cos())
        .collect();
    cosines.sort_by(|a, b| a.total_cmp(b));

    // Kolmogorov-Smirnov statistic against Uniform(-1, 1)
    let d = cosines
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let cdf = (c + 1.0) / 2.0;
            let above = (i + 1) as f64 / n as f64 - cdf;
            let below = cdf - i as f64 / n as f64;
            above.max(below)
        })
        .fold(0.0, f64::max);

    let critical = 1.95 / (n as f64).sqrt();
    assert!(d < critical, "KS statistic {d} exceeds {critical}");
}

#[test]
fn isotropic_respects_bounds() {
    let mut rng = ChaChaRng::seed_from_u64(8);
    for _ in 0..1_000 {
        let angle = sample_isotropic(&mut rng, 10.0, 30.0).unwrap();
        assert!((10.0 - 1e-9..=30.0 + 1e-9).contains(&angle));
    }
    assert!(sample_isotropic(&mut rng, 0.0, 190.0).is_err());
}

#[test]
fn zero_spread_returns_avg() {
    let mut rng = ChaChaRng::seed_from_u64(9);
    assert_eq!(sample_gaussian(&mut rng, 4.5, 0.0).unwrap(), 4.5);
    assert_eq!(sample_log_normal(&mut rng, 4.5, 0.0).unwrap(), 4.5);
    assert_eq!(sample_beta(&mut rng, 0.3, 0.0).unwrap(), 0.3);
}

#[test]
fn gaussian_centres_on_avg() {
    let mut rng = ChaChaRng::seed_from_u64(10);
    let draws: Vec<f64> = (0..20_000)
        .map(|_| sample_gaussian(&mut rng, 5.0, 2.0).unwrap())
        .collect();
    assert!((mean(&draws) - 5.0).abs() < 0.1);
}

#[test]
fn log_normal_median_is_avg() {
    let mut rng = ChaChaRng::seed_from_u64(11);
    let n = 20_000;
    let below = (0..n)
        .map(|_| sample_log_normal(&mut rng, 50.0, 20.0).unwrap())
        .filter(|x| *x < 50.0)
        .count();
    let fraction = below as f64 / n as f64;
    assert!((fraction - 0.5).abs() < 0.02, "fraction below median was {fraction}");
}

#[test]
fn beta_matches_requested_moments() {
    let mut rng = ChaChaRng::seed_from_u64(12);
    let draws: Vec<f64> = (0..20_000)
        .map(|_| sample_beta(&mut rng, 0.2, 0.1).unwrap())
        .collect();
    assert!(draws.iter().all(|x| (0.0..=1.0).contains(x)));
    assert!((mean(&draws) - 0.2).abs() < 0.01);

    let m = mean(&draws);
    let variance = draws.iter().map(|x| (x - m).powi(2)).sum::<f64>() / draws.len() as f64;
    assert!((variance.sqrt() - 0.1).abs() < 0.01);
}

#[test]
fn beta_rejects_impossible_moments() {
    let mut rng = ChaChaRng::seed_from_u64(13);
    assert!(matches!(
        sample_beta(&mut rng, 1.2, 0.1),
        Err(SamplingError::InvalidDistributionParameters(_))
    ));
    // stddev² = 0.25 is not below 0.5 * 0.5
    assert!(matches!(
        sample_beta(&mut rng, 0.5, 0.5),
        Err(SamplingError::InvalidDistributionParameters(_))
    ));
}

#[test]
fn moment_families_reject_negative_stddev() {
    for family in [Family::Gaussian, Family::LogNormal, Family::Beta] {
        let dist = Distribution::from_family(family, 0.5, -1.0);
        assert!(dist.validate().is_err(), "{family} accepted stddev -1");
    }
}

#[test]
fn rayleigh_and_log_normal_need_positive_avg() {
    assert!(Distribution::Rayleigh { avg: 0.0 }.validate().is_err());
    assert!(Distribution::LogNormal { avg: -2.0, stddev: 1.0 }.validate().is_err());
}

#[test]
fn from_family_maps_parameters() {
    let dist = Distribution::from_family(Family::Rayleigh, 3.0, 0.0);
    assert_eq!(dist, Distribution::Rayleigh { avg: 3.0 });
    assert_eq!(dist.family(), Family::Rayleigh);
    assert!(Family::Isotropic.is_range());
    assert!(!Family::Beta.is_range());
}

#[test]
fn seeded_draws_are_reproducible() {
    let dist = Distribution::LogUniform { min: 1.0, max: 1e6 };
    let draw = |seed| {
        let mut rng = ChaChaRng::seed_from_u64(seed);
        (0..10).map(|_| dist.sample(&mut rng).unwrap()).collect::<Vec<_>>()
    };
    assert_eq!(draw(99), draw(99));
    assert_ne!(draw(99), draw(100));
}
