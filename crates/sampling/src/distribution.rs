//! Parametric distributions over real numbers.

use std::f64::consts::FRAC_2_PI;
use std::fmt;

use rand::Rng;
use rand_distr::Distribution as _;
use serde::{Deserialize, Serialize};

use crate::error::SamplingError;

/// Distribution family as named in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    Uniform,
    LogUniform,
    LogNormal,
    Gaussian,
    Rayleigh,
    Beta,
    Isotropic,
}

impl Family {
    /// Range families take `(min, max)`; the rest take `(avg, stddev)`.
    pub fn is_range(&self) -> bool {
        matches!(self, Self::Uniform | Self::LogUniform | Self::Isotropic)
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A distribution with concrete parameters.
///
/// Isotropic bounds are polar angles in degrees; every other family is
/// unit-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Distribution {
    Uniform { min: f64, max: f64 },
    LogUniform { min: f64, max: f64 },
    /// `avg` is the median
    LogNormal { avg: f64, stddev: f64 },
    Gaussian { avg: f64, stddev: f64 },
    Rayleigh { avg: f64 },
    Beta { avg: f64, stddev: f64 },
    Isotropic { min: f64, max: f64 },
}

impl Distribution {
    /// Build from a family and its two parameters.
    ///
    /// `(a, b)` is `(min, max)` for range families and `(avg, stddev)`
    /// otherwise; Rayleigh ignores `b`.
    pub fn from_family(family: Family, a: f64, b: f64) -> Self {
        match family {
            Family::Uniform => Self::Uniform { min: a, max: b },
            Family::LogUniform => Self::LogUniform { min: a, max: b },
            Family::LogNormal => Self::LogNormal { avg: a, stddev: b },
            Family::Gaussian => Self::Gaussian { avg: a, stddev: b },
            Family::Rayleigh => Self::Rayleigh { avg: a },
            Family::Beta => Self::Beta { avg: a, stddev: b },
            Family::Isotropic => Self::Isotropic { min: a, max: b },
        }
    }

    pub fn family(&self) -> Family {
        match self {
            Self::Uniform { .. } => Family::Uniform,
            Self::LogUniform { .. } => Family::LogUniform,
            Self::LogNormal { .. } => Family::LogNormal,
            Self::Gaussian { .. } => Family::Gaussian,
            Self::Rayleigh { .. } => Family::Rayleigh,
            Self::Beta { .. } => Family::Beta,
            Self::Isotropic { .. } => Family::Isotropic,
        }
    }

    /// Check the parameters without drawing.
    pub fn validate(&self) -> Result<(), SamplingError> {
        match *self {
            Self::Uniform { min, max } => check_range(min, max),
            Self::LogUniform { min, max } => check_log_range(min, max),
            Self::LogNormal { avg, stddev } => {
                check_stddev(stddev)?;
                check_positive("LogNormal", avg)
            }
            Self::Gaussian { avg, stddev } => {
                check_finite("Gaussian", avg)?;
                check_stddev(stddev)
            }
            Self::Rayleigh { avg } => check_positive("Rayleigh", avg),
            Self::Beta { avg, stddev } => beta_shape(avg, stddev).map(|_| ()),
            Self::Isotropic { min, max } => check_polar_range(min, max),
        }
    }

    /// Draw one value.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64, SamplingError> {
        match *self {
            Self::Uniform { min, max } => sample_uniform(rng, min, max),
            Self::LogUniform { min, max } => sample_log_uniform(rng, min, max),
            Self::LogNormal { avg, stddev } => sample_log_normal(rng, avg, stddev),
            Self::Gaussian { avg, stddev } => sample_gaussian(rng, avg, stddev),
            Self::Rayleigh { avg } => sample_rayleigh(rng, avg),
            Self::Beta { avg, stddev } => sample_beta(rng, avg, stddev),
            Self::Isotropic { min, max } => sample_isotropic(rng, min, max),
        }
    }
}

/// Linear draw in [min, max). Equal bounds return `min` exactly.
///
/// # Arguments
/// * `rng` - Random number generator
/// * `min` - Lower bound
/// * `max` - Upper bound, not below `min`
///
/// # Returns
/// A sample from U(min, max), or `InvalidRange` for reversed or non-finite
/// bounds
pub fn sample_uniform<R: Rng + ?Sized>(
    rng: &mut R,
    min: f64,
    max: f64,
) -> Result<f64, SamplingError> {
    check_range(min, max)?;
    if min == max {
        return Ok(min);
    }
    let u: f64 = rng.random();
    Ok(min + u * (max - min))
}

/// Uniform in log space between `min` and `max`, both positive.
///
/// # Arguments
/// * `rng` - Random number generator
/// * `min` - Lower bound, positive
/// * `max` - Upper bound, not below `min`
///
/// # Returns
/// A sample whose logarithm is uniform between ln(min) and ln(max)
pub fn sample_log_uniform<R: Rng + ?Sized>(
    rng: &mut R,
    min: f64,
    max: f64,
) -> Result<f64, SamplingError> {
    check_log_range(min, max)?;
    if min == max {
        return Ok(min);
    }
    let (log_min, log_max) = (min.ln(), max.ln());
    let u: f64 = rng.random();
    Ok((log_min + u * (log_max - log_min)).exp())
}

/// Log-normal draw with median `avg`.
///
/// The log-space width is σ = √ln(1 + (stddev/avg)²), which makes `stddev`
/// the linear-space spread for small ratios.
///
/// # Arguments
/// * `rng` - Random number generator
/// * `avg` - Median of the distribution, positive
/// * `stddev` - Linear-space spread; zero returns `avg`
///
/// # Returns
/// A positive sample with median `avg`
pub fn sample_log_normal<R: Rng + ?Sized>(
    rng: &mut R,
    avg: f64,
    stddev: f64,
) -> Result<f64, SamplingError> {
    check_stddev(stddev)?;
    check_positive("LogNormal", avg)?;
    if stddev == 0.0 {
        return Ok(avg);
    }
    let sigma = (1.0 + (stddev / avg).powi(2)).ln().sqrt();
    let dist = rand_distr::LogNormal::new(avg.ln(), sigma)
        .map_err(|e| SamplingError::InvalidDistributionParameters(format!("LogNormal: {e}")))?;
    Ok(dist.sample(rng))
}

/// Normal draw centred on `avg`.
///
/// # Arguments
/// * `rng` - Random number generator
/// * `avg` - Mean of the distribution
/// * `stddev` - Standard deviation; zero returns `avg`
///
/// # Returns
/// A sample from the normal distribution N(avg, stddev²)
pub fn sample_gaussian<R: Rng + ?Sized>(
    rng: &mut R,
    avg: f64,
    stddev: f64,
) -> Result<f64, SamplingError> {
    check_finite("Gaussian", avg)?;
    check_stddev(stddev)?;
    if stddev == 0.0 {
        return Ok(avg);
    }
    let dist = rand_distr::Normal::new(avg, stddev)
        .map_err(|e| SamplingError::InvalidDistributionParameters(format!("Gaussian: {e}")))?;
    Ok(dist.sample(rng))
}

/// Rayleigh draw with mean `avg`.
///
/// # Arguments
/// * `rng` - Random number generator
/// * `avg` - Mean of the distribution, positive
///
/// # Returns
/// A non-negative sample with scale σ = avg·√(2/π)
pub fn sample_rayleigh<R: Rng + ?Sized>(rng: &mut R, avg: f64) -> Result<f64, SamplingError> {
    check_positive("Rayleigh", avg)?;
    let sigma = avg * FRAC_2_PI.sqrt();
    // U in (0, 1] keeps the log finite
    let u = 1.0 - rng.random::<f64>();
    Ok(sigma * (-2.0 * u.ln()).sqrt())
}

/// Beta draw on (0, 1) with mean `avg` and standard deviation `stddev`.
///
/// # Arguments
/// * `rng` - Random number generator
/// * `avg` - Mean, strictly between 0 and 1
/// * `stddev` - Standard deviation; its square must stay below avg(1 - avg)
///
/// # Returns
/// A sample in (0, 1), or `avg` itself for a zero spread
pub fn sample_beta<R: Rng + ?Sized>(
    rng: &mut R,
    avg: f64,
    stddev: f64,
) -> Result<f64, SamplingError> {
    let Some((alpha, beta)) = beta_shape(avg, stddev)? else {
        return Ok(avg);
    };
    let dist = rand_distr::Beta::new(alpha, beta)
        .map_err(|e| SamplingError::InvalidDistributionParameters(format!("Beta: {e}")))?;
    Ok(dist.sample(rng))
}

/// Polar angle in degrees for a direction uniform on the sphere, restricted
/// to the band between `min` and `max`.
///
/// The cosine of the result is uniform between cos(max) and cos(min).
///
/// # Arguments
/// * `rng` - Random number generator
/// * `min` - Smallest polar angle in degrees, at least 0
/// * `max` - Largest polar angle in degrees, at most 180
///
/// # Returns
/// A polar angle in degrees between `min` and `max`
pub fn sample_isotropic<R: Rng + ?Sized>(
    rng: &mut R,
    min: f64,
    max: f64,
) -> Result<f64, SamplingError> {
    check_polar_range(min, max)?;
    if min == max {
        return Ok(min);
    }
    let (cos_low, cos_high) = (max.to_radians().cos(), min.to_radians().cos());
    let u: f64 = rng.random();
    let cosine = (cos_low + u * (cos_high - cos_low)).clamp(-1.0, 1.0);
    Ok(cosine.acos().to_degrees())
}

/// Method-of-moments shape parameters, or `None` for a zero spread.
fn beta_shape(avg: f64, stddev: f64) -> Result<Option<(f64, f64)>, SamplingError> {
    if !(avg > 0.0 && avg < 1.0) {
        return Err(SamplingError::InvalidDistributionParameters(format!(
            "Beta mean {avg} must lie strictly between 0 and 1"
        )));
    }
    check_stddev(stddev)?;
    if stddev == 0.0 {
        return Ok(None);
    }

    let variance_limit = avg * (1.0 - avg);
    let variance = stddev * stddev;
    if variance >= variance_limit {
        return Err(SamplingError::InvalidDistributionParameters(format!(
            "Beta variance {variance} must be below avg(1 - avg) = {variance_limit}"
        )));
    }

    let nu = variance_limit / variance - 1.0;
    Ok(Some((avg * nu, (1.0 - avg) * nu)))
}

fn check_range(min: f64, max: f64) -> Result<(), SamplingError> {
    if !min.is_finite() || !max.is_finite() || min > max {
        return Err(SamplingError::InvalidRange { min, max });
    }
    Ok(())
}

fn check_log_range(min: f64, max: f64) -> Result<(), SamplingError> {
    check_range(min, max)?;
    if min <= 0.0 {
        return Err(SamplingError::InvalidRange { min, max });
    }
    Ok(())
}

fn check_polar_range(min: f64, max: f64) -> Result<(), SamplingError> {
    check_range(min, max)?;
    if min < 0.0 || max > 180.0 {
        return Err(SamplingError::InvalidRange { min, max });
    }
    Ok(())
}

fn check_finite(family: &str, value: f64) -> Result<(), SamplingError> {
    if !value.is_finite() {
        return Err(SamplingError::InvalidDistributionParameters(format!(
            "{family} mean {value} is not finite"
        )));
    }
    Ok(())
}

fn check_positive(family: &str, avg: f64) -> Result<(), SamplingError> {
    check_finite(family, avg)?;
    if avg <= 0.0 {
        return Err(SamplingError::InvalidDistributionParameters(format!(
            "{family} mean {avg} must be positive"
        )));
    }
    Ok(())
}

fn check_stddev(stddev: f64) -> Result<(), SamplingError> {
    if !stddev.is_finite() || stddev < 0.0 {
        return Err(SamplingError::InvalidDistributionParameters(format!(
            "standard deviation {stddev} must be finite and non-negative"
        )));
    }
    Ok(())
}
