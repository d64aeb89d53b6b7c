//! Hyperbolic flyby orbits aimed at a target body.
//!
//! The trajectory is built relative to the target: a hyperbola with the
//! drawn periapsis distance and excess speed, randomly oriented, reaching
//! periapsis after the drawn warning time. If the body is still outside the
//! target's sphere of influence at the current time, the orbit is patched
//! into the target's parent frame at the moment it enters the sphere.

use std::f64::consts::TAU;

use celestial::{BodyTable, ValueContext};
use nalgebra::Rotation3;
use orbit::{orientation_from_angles, Orbit, OrbitError, OrbitalElements};
use population::{DistributionSpec, InterceptSpec};
use rand::Rng;
use tracing::debug;
use units::{Length, Time, Velocity};

use crate::error::{DrawError, InterceptError};

/// Drawn parameters of one flyby.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Approach {
    /// Periapsis distance from the target's centre
    pub periapsis: Length,
    /// Time from now until periapsis
    pub warning: Time,
    /// Hyperbolic excess speed
    pub excess_speed: Velocity,
}

/// Build the flyby orbit for `approach` with the given perifocal orientation.
///
/// Returns an orbit about the target when the sphere-of-influence entry lies
/// in the past (or the target is a root body), and an orbit about the
/// target's parent otherwise.
///
/// # Errors
/// `InterceptError::Body` when the target or its parent is not in `bodies`,
/// and `InterceptError::Orbit` for approach parameters that do not give a
/// hyperbola inside the target's sphere of influence.
pub fn intercept_orbit(
    target: &str,
    approach: Approach,
    orientation: &Rotation3<f64>,
    bodies: &BodyTable,
) -> Result<Orbit, InterceptError> {
    let body = bodies.body(target)?;
    let mu = body.gravitational_parameter;
    let soi = body.sphere_of_influence.to_meters();
    let q = approach.periapsis.to_meters();
    let v_inf = approach.excess_speed.to_meters_per_sec();
    let dt = approach.warning.to_seconds();

    if !(v_inf.is_finite() && v_inf > 0.0) {
        return Err(shape(format!("excess speed {v_inf} m/s must be positive")));
    }
    if !(q.is_finite() && q > 0.0) {
        return Err(shape(format!("approach distance {q} m must be positive")));
    }
    if q >= soi {
        return Err(shape(format!(
            "approach distance {q} m lies outside the {soi} m sphere of influence of `{target}`"
        )));
    }
    if !(dt.is_finite() && dt >= 0.0) {
        return Err(shape(format!("warning time {dt} s must be non-negative")));
    }

    let periapsis_time = bodies.ut() + approach.warning;
    let relative = OrbitalElements::from_periapsis(
        approach.periapsis,
        1.0 + q * v_inf * v_inf / mu,
        periapsis_time,
    )?
    .with_orientation(orientation);

    let Some(parent) = body.parent.as_deref() else {
        return Ok(Orbit::new(target, relative));
    };
    if soi.is_infinite() {
        return Ok(Orbit::new(target, relative));
    }

    let entry = soi_entry_time(&relative, soi, mu);
    if entry <= bodies.ut() {
        return Ok(Orbit::new(target, relative));
    }

    let local = relative.state_at(entry, mu)?;
    let target_state = bodies.state_of(target, entry)?;
    let parent_mu = bodies.gravitational_parameter(parent)?;
    let patched = (target_state + local).to_elements(parent_mu, entry)?;

    Ok(Orbit::new(parent, patched))
}

fn shape(reason: String) -> InterceptError {
    OrbitError::InvalidOrbitShape(reason).into()
}

/// Time at which the inbound leg crosses radius `soi`.
fn soi_entry_time(relative: &OrbitalElements, soi: f64, mu: f64) -> Time {
    let a = relative.semi_major_axis.to_meters().abs();
    let e = relative.eccentricity;
    // r = |a| (e cosh F - 1) on the inbound branch, F < 0
    let hyperbolic_anomaly = -((soi / a + 1.0) / e).acosh();
    let mean_anomaly = e * hyperbolic_anomaly.sinh() - hyperbolic_anomaly;
    relative.epoch + Time::from_seconds(mean_anomaly / relative.mean_motion(mu))
}

/// Uniformly random orientation: isotropic pole, uniform node and argument.
pub fn random_orientation<R: Rng + ?Sized>(rng: &mut R) -> Rotation3<f64> {
    let inclination = (1.0 - 2.0 * rng.random::<f64>()).acos();
    let node = rng.random::<f64>() * TAU;
    let argument = rng.random::<f64>() * TAU;
    orientation_from_angles(node, inclination, argument)
}

/// Draw approach parameters and build the flyby orbit.
pub(crate) fn draw_intercept<R: Rng + ?Sized>(
    population: &str,
    spec: &InterceptSpec,
    bodies: &BodyTable,
    rng: &mut R,
) -> Result<Orbit, DrawError> {
    let mut draw = |element: &'static str, dist: &DistributionSpec, context: ValueContext| {
        dist.sample(rng, bodies, context)
            .map_err(|source| DrawError::Element {
                population: population.to_string(),
                element,
                source,
            })
    };

    let approach = Approach {
        periapsis: Length::from_meters(draw("approach", &spec.approach, ValueContext::Length)?),
        warning: Time::from_seconds(draw("warning time", &spec.warn_time, ValueContext::Time)?),
        excess_speed: Velocity::from_meters_per_sec(draw(
            "speed",
            &spec.speed,
            ValueContext::Speed,
        )?),
    };
    let orientation = random_orientation(rng);

    let orbit = intercept_orbit(&spec.target, approach, &orientation, bodies).map_err(|e| match e {
        InterceptError::Body(source) => DrawError::Body {
            population: population.to_string(),
            source,
        },
        InterceptError::Orbit(e) => DrawError::invalid_orbit(population, e),
    })?;

    debug!(
        population,
        target = %spec.target,
        frame = %orbit.central_body,
        periapsis_m = approach.periapsis.to_meters(),
        warning_s = approach.warning.to_seconds(),
        speed_ms = approach.excess_speed.to_meters_per_sec(),
        "Assembled intercept"
    );
    Ok(orbit)
}
