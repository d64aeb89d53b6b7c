use std::ops::{Add, Sub};

use nalgebra::{Matrix3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};
use units::{Length, Time};

use crate::elements::{is_parabolic, OrbitalElements};
use crate::error::OrbitError;
use crate::kepler::true_anomaly_to_mean;
use crate::reference_plane::orientation_to_angles;

/// Below this, a vector is treated as zero when choosing frame axes.
const AXIS_TOLERANCE: f64 = 1e-10;

/// Cartesian position (m) and velocity (m/s) relative to a central body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

impl StateVector {
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        Self { position, velocity }
    }

    pub fn radius(&self) -> f64 {
        self.position.magnitude()
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    /// Specific angular momentum vector h = r × v.
    pub fn angular_momentum(&self) -> Vector3<f64> {
        self.position.cross(&self.velocity)
    }

    /// Specific orbital energy ε = v²/2 - μ/r.
    pub fn specific_energy(&self, mu: f64) -> f64 {
        0.5 * self.velocity.magnitude_squared() - mu / self.radius()
    }

    /// Apply a rotation to both vectors.
    pub fn rotated(&self, rotation: &Rotation3<f64>) -> Self {
        Self {
            position: rotation * self.position,
            velocity: rotation * self.velocity,
        }
    }

    /// Keplerian elements of this state, with `epoch` as the element epoch.
    ///
    /// The perifocal frame is built from the angular momentum and the
    /// eccentricity vector. Circular orbits measure the anomaly from the
    /// ascending node, or from +x when also equatorial.
    ///
    /// Eccentricities within the parabolic tolerance of 1 snap to an exact
    /// parabola carrying its periapsis distance `h²/2μ`.
    ///
    /// # Errors
    /// Radial trajectories (no angular momentum) fail with
    /// `InvalidOrbitShape`.
    pub fn to_elements(&self, mu: f64, epoch: Time) -> Result<OrbitalElements, OrbitError> {
        let r = self.position;
        let v = self.velocity;
        let r_mag = r.magnitude();

        if r_mag < AXIS_TOLERANCE {
            return Err(OrbitError::InvalidOrbitShape(
                "position coincides with the central body".to_string(),
            ));
        }

        let h = r.cross(&v);
        let h_mag = h.magnitude();
        if h_mag < AXIS_TOLERANCE * r_mag.max(1.0) {
            return Err(OrbitError::InvalidOrbitShape(
                "radial trajectory has no orbital plane".to_string(),
            ));
        }

        // Eccentricity vector: e = ((v² - μ/r) r - (r·v) v) / μ
        let e_vec = ((v.magnitude_squared() - mu / r_mag) * r - r.dot(&v) * v) / mu;
        let mut e = e_vec.magnitude();

        let energy = self.specific_energy(mu);
        let size = if is_parabolic(e) || energy.abs() < f64::EPSILON * mu / r_mag {
            e = 1.0;
            h_mag * h_mag / (2.0 * mu)
        } else {
            -mu / (2.0 * energy)
        };

        let z_axis = h / h_mag;
        let node = Vector3::z().cross(&h);
        let x_axis = if e > 1e-9 {
            e_vec / e
        } else if node.magnitude() > AXIS_TOLERANCE * h_mag {
            node.normalize()
        } else {
            // Circular equatorial; keep x in the plane
            (Vector3::x() - Vector3::x().dot(&z_axis) * z_axis).normalize()
        };
        let y_axis = z_axis.cross(&x_axis);

        let orientation =
            Rotation3::from_matrix_unchecked(Matrix3::from_columns(&[x_axis, y_axis, z_axis]));
        let (lan, inc, argp) = orientation_to_angles(&orientation);

        let perifocal = orientation.inverse() * r;
        let true_anomaly = perifocal.y.atan2(perifocal.x);

        let mut elements = OrbitalElements {
            semi_major_axis: Length::from_meters(size),
            eccentricity: e,
            inclination: inc,
            longitude_of_ascending_node: lan,
            argument_of_periapsis: argp,
            mean_anomaly: true_anomaly_to_mean(true_anomaly, e)?,
            epoch,
        };
        if elements.is_bound() {
            elements.mean_anomaly = units::normalize_radians(elements.mean_anomaly);
        }
        Ok(elements)
    }
}

impl Add for StateVector {
    type Output = StateVector;

    fn add(self, rhs: StateVector) -> StateVector {
        StateVector {
            position: self.position + rhs.position,
            velocity: self.velocity + rhs.velocity,
        }
    }
}

impl Sub for StateVector {
    type Output = StateVector;

    fn sub(self, rhs: StateVector) -> StateVector {
        StateVector {
            position: self.position - rhs.position,
            velocity: self.velocity - rhs.velocity,
        }
    }
}
