//! Kepler's equation for elliptic, parabolic and hyperbolic orbits.

use std::f64::consts::PI;

use units::normalize_radians;

use crate::error::OrbitError;
use crate::PARABOLIC_TOLERANCE;

const MAX_ITERATIONS: usize = 50;
const CONVERGENCE: f64 = 1e-12;

/// Solve Kepler's equation `M = E - e sin(E)` for the eccentric anomaly.
///
/// The mean anomaly is first wrapped into (-π, π]; the returned eccentric
/// anomaly lies in the same branch.
///
/// # Arguments
/// * `mean_anomaly` - Mean anomaly (radians)
/// * `eccentricity` - Eccentricity, 0 ≤ e < 1
pub fn solve_keplers_equation(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let mut m = normalize_radians(mean_anomaly);
    if m > PI {
        m -= 2.0 * PI;
    }

    // Highly eccentric orbits converge poorly from E₀ = M near periapsis
    let mut ecc_anomaly = if eccentricity < 0.8 { m } else { PI.copysign(m) };

    // Newton-Raphson: f(E) = E - e sin(E) - M, f'(E) = 1 - e cos(E)
    for _ in 0..MAX_ITERATIONS {
        let f = ecc_anomaly - eccentricity * ecc_anomaly.sin() - m;
        let f_prime = 1.0 - eccentricity * ecc_anomaly.cos();

        let delta = f / f_prime;
        ecc_anomaly -= delta;

        if delta.abs() < CONVERGENCE {
            break;
        }
    }

    ecc_anomaly
}

/// Solve the hyperbolic Kepler equation `M = e sinh(H) - H`.
///
/// The hyperbolic mean anomaly is not periodic, so it is used as given.
pub fn solve_hyperbolic_kepler(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let m = mean_anomaly;
    let mut h = if m == 0.0 {
        0.0
    } else {
        m.signum() * (2.0 * m.abs() / eccentricity + 1.8).ln()
    };

    for _ in 0..MAX_ITERATIONS * 2 {
        let f = eccentricity * h.sinh() - h - m;
        let f_prime = eccentricity * h.cosh() - 1.0;

        let delta = f / f_prime;
        h -= delta;

        if delta.abs() < CONVERGENCE * (1.0 + h.abs()) {
            break;
        }
    }

    h
}

/// True anomaly from eccentric anomaly (elliptic orbits).
pub fn eccentric_anomaly_to_true(ecc_anomaly: f64, eccentricity: f64) -> f64 {
    let half = ecc_anomaly / 2.0;
    2.0 * ((1.0 + eccentricity).sqrt() * half.sin()).atan2((1.0 - eccentricity).sqrt() * half.cos())
}

/// True anomaly from hyperbolic anomaly (hyperbolic orbits).
pub fn hyperbolic_anomaly_to_true(hyp_anomaly: f64, eccentricity: f64) -> f64 {
    let half = hyp_anomaly / 2.0;
    2.0 * ((eccentricity + 1.0).sqrt() * half.sinh())
        .atan2((eccentricity - 1.0).sqrt() * half.cosh())
}

/// Mean anomaly for a given true anomaly.
///
/// Parabolic orbits use Barker's form `D + D³/3`. Fails for open-orbit true
/// anomalies at or past the asymptote.
pub fn true_anomaly_to_mean(true_anomaly: f64, eccentricity: f64) -> Result<f64, OrbitError> {
    let half = true_anomaly / 2.0;
    if (eccentricity - 1.0).abs() < PARABOLIC_TOLERANCE {
        if true_anomaly.abs() >= PI {
            return Err(OrbitError::InvalidOrbitShape(format!(
                "true anomaly {true_anomaly} lies beyond the asymptote of a parabola"
            )));
        }
        let d = half.tan();
        return Ok(d + d.powi(3) / 3.0);
    }

    if eccentricity < 1.0 {
        let ecc_anomaly = 2.0
            * ((1.0 - eccentricity).sqrt() * half.sin())
                .atan2((1.0 + eccentricity).sqrt() * half.cos());
        Ok(ecc_anomaly - eccentricity * ecc_anomaly.sin())
    } else {
        let t = ((eccentricity - 1.0) / (eccentricity + 1.0)).sqrt() * half.tan();
        if t.abs() >= 1.0 {
            return Err(OrbitError::InvalidOrbitShape(format!(
                "true anomaly {true_anomaly} lies beyond the asymptote of an e = {eccentricity} hyperbola"
            )));
        }
        let hyp_anomaly = 2.0 * t.atanh();
        Ok(eccentricity * hyp_anomaly.sinh() - hyp_anomaly)
    }
}

/// Solve Barker's equation `M = D + D³/3` for `D = tan(ν/2)`.
///
/// The cubic has a single real root, taken in closed form.
pub fn solve_barker(mean_anomaly: f64) -> f64 {
    2.0 * ((1.5 * mean_anomaly).asinh() / 3.0).sinh()
}
