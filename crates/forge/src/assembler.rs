//! Element-by-element orbit assembly for orbital populations.

use celestial::{BodyTable, ValueContext};
use orbit::{is_parabolic, Orbit, OrbitError, OrbitalElements, ReferencePlane};
use population::{DistributionSpec, EpochType, OrbitSpec, PhaseType, SizeType};
use rand::Rng;
use tracing::debug;
use units::{Length, Time};

use crate::error::DrawError;

/// Semimajor axis from the drawn size and eccentricity.
///
/// Hyperbolic orbits (e > 1) are only reachable through periapsis sizing and
/// come out with a negative semimajor axis. A parabola keeps its periapsis
/// distance in the semimajor-axis slot.
///
/// # Errors
/// `InvalidOrbitShape` for a non-positive size, a negative eccentricity, or
/// semimajor-axis and apoapsis sizing of an open orbit.
pub fn semi_major_axis(
    kind: SizeType,
    size: Length,
    eccentricity: f64,
) -> Result<Length, OrbitError> {
    let e = eccentricity;
    if !e.is_finite() || e < 0.0 {
        return Err(shape(format!("eccentricity {e} must be finite and non-negative")));
    }
    if !size.is_finite() || size.to_meters() <= 0.0 {
        return Err(shape(format!("{kind:?} {} m must be positive", size.to_meters())));
    }

    let closed = e < 1.0 && !is_parabolic(e);
    match kind {
        SizeType::SemimajorAxis if !closed => Err(shape(format!(
            "semimajor-axis sizing needs a closed orbit, got e = {e}"
        ))),
        SizeType::SemimajorAxis => Ok(size),
        SizeType::Periapsis if is_parabolic(e) => Ok(size),
        SizeType::Periapsis => Ok(size / (1.0 - e)),
        SizeType::Apoapsis if !closed => Err(shape(format!(
            "apoapsis sizing needs a closed orbit, got e = {e}"
        ))),
        SizeType::Apoapsis => Ok(size / (1.0 + e)),
    }
}

fn shape(reason: String) -> OrbitError {
    OrbitError::InvalidOrbitShape(reason)
}

/// Draws one orbit about `central_body` for the population `population`.
///
/// Elements are drawn in the population's reference plane and rotated into
/// the central body's base frame before returning.
pub(crate) fn draw_orbit<R: Rng + ?Sized>(
    population: &str,
    central_body: &str,
    spec: &OrbitSpec,
    plane: &ReferencePlane,
    bodies: &BodyTable,
    rng: &mut R,
) -> Result<Orbit, DrawError> {
    let mu = bodies
        .gravitational_parameter(central_body)
        .map_err(|source| DrawError::Body {
            population: population.to_string(),
            source,
        })?;

    let mut draw = |element: &'static str, dist: &DistributionSpec, context: ValueContext| {
        dist.sample(rng, bodies, context)
            .map_err(|source| DrawError::Element {
                population: population.to_string(),
                element,
                source,
            })
    };

    // Eccentricity first: the size conversion depends on it
    let mut eccentricity = draw("eccentricity", &spec.eccentricity, ValueContext::Ratio)?;
    if is_parabolic(eccentricity) {
        eccentricity = 1.0;
    }
    let size = draw("size", &spec.size.distribution, ValueContext::Length)?;
    let a = semi_major_axis(spec.size.kind, Length::from_meters(size), eccentricity)
        .map_err(|e| DrawError::invalid_orbit(population, e))?;

    let inclination = draw("inclination", &spec.inclination, ValueContext::Angle)?;
    let argument = draw(
        "argument of periapsis",
        &spec.argument_of_periapsis,
        ValueContext::Angle,
    )?;
    let node = draw("ascending node", &spec.ascending_node, ValueContext::Angle)?;
    let phase = draw("phase", &spec.phase.distribution, ValueContext::Angle)?;

    let mean_anomaly = match spec.phase.kind {
        PhaseType::MeanAnomaly => phase,
        PhaseType::MeanLongitude => phase - node - argument,
    };

    let epoch = match spec.phase.epoch {
        EpochType::GameStart => Time::zero(),
        EpochType::Now => bodies.ut(),
    };

    let local = OrbitalElements {
        semi_major_axis: a,
        eccentricity,
        inclination: inclination.to_radians(),
        longitude_of_ascending_node: node.to_radians(),
        argument_of_periapsis: argument.to_radians(),
        mean_anomaly: mean_anomaly.to_radians(),
        epoch,
    }
    .propagated_to(bodies.ut(), mu);

    let elements = plane.rotate_elements(&local);
    elements
        .validate()
        .map_err(|e| DrawError::invalid_orbit(population, e))?;

    debug!(
        population,
        central_body,
        sma_m = elements.semi_major_axis.to_meters(),
        ecc = elements.eccentricity,
        inc_deg = elements.inclination.to_degrees(),
        "Assembled orbit"
    );

    Ok(Orbit::new(central_body, elements))
}
