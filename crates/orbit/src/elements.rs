//! Keplerian orbital elements and orbits about a named central body.
//!
//! # Conventions
//!
//! - Semimajor axis is negative for hyperbolic orbits, so `a(1 - e)` is the
//!   periapsis radius for every non-parabolic conic.
//! - A parabola (e = 1) has no finite semimajor axis. Its size field holds
//!   the periapsis distance q instead, and its mean anomaly is Barker's
//!   `D + D³/3` with `D = tan(ν/2)`.
//! - Angles are radians. Inclination lies in [0, π]; the other angles are
//!   normalised to [0, 2π).
//! - The mean anomaly is the value at `epoch`. Bound orbits wrap it into
//!   [0, 2π); hyperbolic mean anomalies are left unwrapped (negative before
//!   periapsis passage).

use nalgebra::Rotation3;
use serde::{Deserialize, Serialize};
use units::{normalize_radians, Length, Time};

use crate::error::OrbitError;
use crate::kepler::{
    eccentric_anomaly_to_true, hyperbolic_anomaly_to_true, solve_barker, solve_hyperbolic_kepler,
    solve_keplers_equation,
};
use crate::reference_plane::{orientation_from_angles, orientation_to_angles};
use crate::state::StateVector;
use crate::PARABOLIC_TOLERANCE;

/// Keplerian orbital elements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrbitalElements {
    /// Semimajor axis (negative for hyperbolic orbits, periapsis distance
    /// for parabolic ones)
    pub semi_major_axis: Length,

    /// Eccentricity (0 ≤ e < 1 bound, 1 parabolic, e > 1 hyperbolic)
    pub eccentricity: f64,

    /// Inclination (radians)
    pub inclination: f64,

    /// Longitude of ascending node (radians)
    pub longitude_of_ascending_node: f64,

    /// Argument of periapsis (radians)
    pub argument_of_periapsis: f64,

    /// Mean anomaly at `epoch` (radians)
    pub mean_anomaly: f64,

    /// Epoch at which `mean_anomaly` applies
    pub epoch: Time,
}

impl OrbitalElements {
    /// Circular equatorial orbit with the body at periapsis direction +x at `epoch`.
    pub fn circular(radius: Length, epoch: Time) -> Self {
        Self {
            semi_major_axis: radius,
            eccentricity: 0.0,
            inclination: 0.0,
            longitude_of_ascending_node: 0.0,
            argument_of_periapsis: 0.0,
            mean_anomaly: 0.0,
            epoch,
        }
    }

    /// Unoriented conic with its periapsis at `epoch`.
    ///
    /// Eccentricities within [`PARABOLIC_TOLERANCE`] of 1 give an exact
    /// parabola.
    ///
    /// # Examples
    /// ```
    /// use orbit::OrbitalElements;
    /// use units::{Length, Time};
    ///
    /// let comet = OrbitalElements::from_periapsis(Length::from_km(500.0), 1.0, Time::zero()).unwrap();
    /// assert_eq!(comet.periapsis(), Length::from_km(500.0));
    /// assert!(comet.is_parabolic());
    /// ```
    pub fn from_periapsis(
        periapsis: Length,
        eccentricity: f64,
        epoch: Time,
    ) -> Result<Self, OrbitError> {
        let (semi_major_axis, eccentricity) = if is_parabolic(eccentricity) {
            (periapsis, 1.0)
        } else {
            (periapsis / (1.0 - eccentricity), eccentricity)
        };
        let elements = Self {
            semi_major_axis,
            eccentricity,
            inclination: 0.0,
            longitude_of_ascending_node: 0.0,
            argument_of_periapsis: 0.0,
            mean_anomaly: 0.0,
            epoch,
        };
        elements.validate()?;
        Ok(elements)
    }

    /// Whether the orbit is closed (e < 1).
    pub fn is_bound(&self) -> bool {
        self.eccentricity < 1.0 && !self.is_parabolic()
    }

    pub fn is_parabolic(&self) -> bool {
        is_parabolic(self.eccentricity)
    }

    /// Periapsis radius, a(1 - e), or q for a parabola.
    pub fn periapsis(&self) -> Length {
        if self.is_parabolic() {
            self.semi_major_axis
        } else {
            self.semi_major_axis * (1.0 - self.eccentricity)
        }
    }

    /// Apoapsis radius, a(1 + e). Open orbits have none.
    pub fn apoapsis(&self) -> Option<Length> {
        self.is_bound()
            .then(|| self.semi_major_axis * (1.0 + self.eccentricity))
    }

    /// Mean motion n = √(μ/|a|³) in radians per second, or √(μ/2q³) for a
    /// parabola.
    ///
    /// # Arguments
    /// * `mu` - Gravitational parameter of the central body (m³/s²)
    pub fn mean_motion(&self, mu: f64) -> f64 {
        if self.is_parabolic() {
            (mu / (2.0 * self.semi_major_axis.powi(3))).sqrt()
        } else {
            (mu / self.semi_major_axis.abs().powi(3)).sqrt()
        }
    }

    /// Orbital period T = 2π/n. Open orbits have none.
    pub fn period(&self, mu: f64) -> Option<Time> {
        self.is_bound()
            .then(|| Time::from_seconds(std::f64::consts::TAU / self.mean_motion(mu)))
    }

    /// Mean anomaly at time `t`, propagated with the mean motion.
    pub fn mean_anomaly_at(&self, t: Time, mu: f64) -> f64 {
        let m = self.mean_anomaly + self.mean_motion(mu) * (t - self.epoch).to_seconds();
        if self.is_bound() {
            normalize_radians(m)
        } else {
            m
        }
    }

    /// Same orbit with its epoch moved to `t`.
    pub fn propagated_to(&self, t: Time, mu: f64) -> Self {
        Self {
            mean_anomaly: self.mean_anomaly_at(t, mu),
            epoch: t,
            ..*self
        }
    }

    /// Mean longitude L = Ω + ω + M at epoch, wrapped to [0, 2π).
    pub fn mean_longitude(&self) -> f64 {
        normalize_radians(
            self.longitude_of_ascending_node + self.argument_of_periapsis + self.mean_anomaly,
        )
    }

    /// Rotation from the perifocal frame (x toward periapsis, z along the
    /// angular momentum) into the frame the elements are expressed in.
    pub fn orientation(&self) -> Rotation3<f64> {
        orientation_from_angles(
            self.longitude_of_ascending_node,
            self.inclination,
            self.argument_of_periapsis,
        )
    }

    /// Same shape and phase with a new perifocal orientation.
    pub fn with_orientation(&self, orientation: &Rotation3<f64>) -> Self {
        let (lan, inc, argp) = orientation_to_angles(orientation);
        Self {
            inclination: inc,
            longitude_of_ascending_node: lan,
            argument_of_periapsis: argp,
            ..*self
        }
    }

    /// Reject element sets that cannot be turned into a trajectory.
    pub fn validate(&self) -> Result<(), OrbitError> {
        let e = self.eccentricity;
        let a = self.semi_major_axis.to_meters();

        if !e.is_finite() || e < 0.0 {
            return Err(OrbitError::InvalidOrbitShape(format!(
                "eccentricity {e} must be finite and non-negative"
            )));
        }
        if is_parabolic(e) {
            if !(a.is_finite() && a > 0.0) {
                return Err(OrbitError::InvalidOrbitShape(format!(
                    "periapsis distance {a} m of a parabolic orbit must be finite and positive"
                )));
            }
            return Ok(());
        }
        if !a.is_finite() || a == 0.0 {
            return Err(OrbitError::InvalidOrbitShape(format!(
                "semimajor axis {a} m must be finite and non-zero"
            )));
        }
        if (e < 1.0) != (a > 0.0) {
            return Err(OrbitError::InvalidOrbitShape(format!(
                "semimajor axis {a} m has the wrong sign for eccentricity {e}"
            )));
        }
        Ok(())
    }

    /// Position and velocity at time `t`.
    ///
    /// # Arguments
    /// * `t` - Time at which to evaluate the orbit
    /// * `mu` - Gravitational parameter of the central body (m³/s²)
    ///
    /// # Examples
    /// ```
    /// use orbit::OrbitalElements;
    /// use units::{Length, Time};
    ///
    /// let elements = OrbitalElements::circular(Length::from_km(700.0), Time::zero());
    /// let state = elements.state_at(Time::zero(), 3.5316e12).unwrap();
    ///
    /// assert!((state.radius() - 700_000.0).abs() < 1e-6);
    /// ```
    pub fn state_at(&self, t: Time, mu: f64) -> Result<StateVector, OrbitError> {
        self.validate()?;

        let a = self.semi_major_axis.to_meters();
        let e = self.eccentricity;
        let m = self.mean_anomaly_at(t, mu);

        // Semi-latus rectum p is positive on every branch
        let (true_anomaly, radius, p) = if self.is_parabolic() {
            let d = solve_barker(m);
            (2.0 * d.atan(), a * (1.0 + d * d), 2.0 * a)
        } else if e < 1.0 {
            let ecc_anomaly = solve_keplers_equation(m, e);
            (
                eccentric_anomaly_to_true(ecc_anomaly, e),
                a * (1.0 - e * ecc_anomaly.cos()),
                a * (1.0 - e * e),
            )
        } else {
            let hyp_anomaly = solve_hyperbolic_kepler(m, e);
            (
                hyperbolic_anomaly_to_true(hyp_anomaly, e),
                a * (1.0 - e * hyp_anomaly.cosh()),
                a * (1.0 - e * e),
            )
        };

        let v_factor = (mu / p).sqrt();

        let (sin_nu, cos_nu) = true_anomaly.sin_cos();
        let position = nalgebra::Vector3::new(radius * cos_nu, radius * sin_nu, 0.0);
        let velocity = nalgebra::Vector3::new(-v_factor * sin_nu, v_factor * (e + cos_nu), 0.0);

        let rotation = self.orientation();
        Ok(StateVector {
            position: rotation * position,
            velocity: rotation * velocity,
        })
    }
}

/// Whether `eccentricity` is within [`PARABOLIC_TOLERANCE`] of 1.
pub fn is_parabolic(eccentricity: f64) -> bool {
    (eccentricity - 1.0).abs() < PARABOLIC_TOLERANCE
}

/// An orbit about a named central body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Orbit {
    /// Name of the body being orbited
    pub central_body: String,

    /// Elements in the central body's base frame
    pub elements: OrbitalElements,
}

impl Orbit {
    pub fn new(central_body: impl Into<String>, elements: OrbitalElements) -> Self {
        Self {
            central_body: central_body.into(),
            elements,
        }
    }

    /// Position and velocity relative to the central body at time `t`.
    pub fn state_at(&self, t: Time, mu: f64) -> Result<StateVector, OrbitError> {
        self.elements.state_at(t, mu)
    }
}
