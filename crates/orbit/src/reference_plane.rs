//! Reference planes: proper rotations from a local frame into the base frame.

use std::f64::consts::PI;

use nalgebra::{Rotation3, Unit, Vector3};
use serde::{Deserialize, Serialize};
use units::normalize_radians;

use crate::elements::OrbitalElements;
use crate::error::OrbitError;
use crate::state::StateVector;

/// Vectors shorter than this cannot define a reference direction.
pub const DEGENERATE_TOLERANCE: f64 = 1e-8;

/// Rotation `Rz(Ω) · Rx(i) · Rz(ω)`.
///
/// Applied to a vector, ω acts first, then i, then Ω. This is the same
/// composition that orients a perifocal frame, so a plane defined by the
/// angles of a body's orbit reproduces that orbit's plane.
pub fn orientation_from_angles(lan: f64, inclination: f64, arg: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), lan)
        * Rotation3::from_axis_angle(&Vector3::x_axis(), inclination)
        * Rotation3::from_axis_angle(&Vector3::z_axis(), arg)
}

/// Recover (Ω, i, ω) from a rotation built by [`orientation_from_angles`].
///
/// Equatorial rotations (i = 0 or π) fold the whole in-plane angle into ω
/// and report Ω = 0.
pub fn orientation_to_angles(rotation: &Rotation3<f64>) -> (f64, f64, f64) {
    let m = rotation.matrix();
    let inclination = m[(2, 2)].clamp(-1.0, 1.0).acos();

    if inclination.sin() > 1e-9 {
        let lan = m[(0, 2)].atan2(-m[(1, 2)]);
        let arg = m[(2, 0)].atan2(m[(2, 1)]);
        (normalize_radians(lan), inclination, normalize_radians(arg))
    } else if m[(2, 2)] > 0.0 {
        (0.0, 0.0, normalize_radians(m[(1, 0)].atan2(m[(0, 0)])))
    } else {
        (0.0, PI, normalize_radians((-m[(1, 0)]).atan2(m[(0, 0)])))
    }
}

/// A fixed rotation from a named local frame into the simulation's base frame.
///
/// # Examples
/// ```
/// use nalgebra::Vector3;
/// use orbit::ReferencePlane;
///
/// // A plane tilted 90° about the x axis: local +z points along base -y
/// let plane = ReferencePlane::from_angles(0.0, std::f64::consts::FRAC_PI_2, 0.0);
/// let pole = plane.to_base_frame(&Vector3::z());
///
/// assert!((pole - Vector3::new(0.0, -1.0, 0.0)).norm() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferencePlane {
    rotation: Rotation3<f64>,
}

impl Default for ReferencePlane {
    fn default() -> Self {
        Self::identity()
    }
}

impl ReferencePlane {
    /// The base frame itself.
    pub fn identity() -> Self {
        Self {
            rotation: Rotation3::identity(),
        }
    }

    /// Plane from ascending node, inclination and argument (radians).
    pub fn from_angles(lan: f64, inclination: f64, arg: f64) -> Self {
        Self {
            rotation: orientation_from_angles(lan, inclination, arg),
        }
    }

    /// Plane whose pole is `normal` and whose +x axis lies along the part of
    /// `reference` perpendicular to the pole.
    ///
    /// # Errors
    /// `DegenerateReferenceFrame` if `normal`, or `reference` after removing
    /// its component along `normal`, is shorter than 1e-8.
    pub fn from_vectors(
        normal: &Vector3<f64>,
        reference: &Vector3<f64>,
    ) -> Result<Self, OrbitError> {
        let normal_len = normal.magnitude();
        if normal_len < DEGENERATE_TOLERANCE {
            return Err(OrbitError::DegenerateReferenceFrame(format!(
                "normal vector {normal:?} has near-zero length"
            )));
        }
        let pole = normal / normal_len;

        let projected = reference - reference.dot(&pole) * pole;
        let projected_len = projected.magnitude();
        if projected_len < DEGENERATE_TOLERANCE {
            return Err(OrbitError::DegenerateReferenceFrame(format!(
                "reference direction {reference:?} is parallel to the normal"
            )));
        }
        let reference_dir = projected / projected_len;

        // Align base pole with the new pole; antiparallel poles have no unique
        // shortest rotation, so flip about x
        let align = Rotation3::rotation_between(&Vector3::z(), &pole)
            .unwrap_or_else(|| Rotation3::from_axis_angle(&Vector3::x_axis(), PI));

        let rotated_x = align * Vector3::x();
        let twist = rotated_x
            .cross(&reference_dir)
            .dot(&pole)
            .atan2(rotated_x.dot(&reference_dir));

        let pole_axis = Unit::new_unchecked(pole);
        Ok(Self {
            rotation: Rotation3::from_axis_angle(&pole_axis, twist) * align,
        })
    }

    pub fn rotation(&self) -> &Rotation3<f64> {
        &self.rotation
    }

    /// Express a local-frame vector in the base frame.
    pub fn to_base_frame(&self, local: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * local
    }

    /// Express a base-frame vector in the local frame.
    pub fn to_local_frame(&self, base: &Vector3<f64>) -> Vector3<f64> {
        self.rotation.inverse() * base
    }

    pub fn state_to_base_frame(&self, local: &StateVector) -> StateVector {
        local.rotated(&self.rotation)
    }

    /// Re-express elements given in the local frame in the base frame.
    ///
    /// Shape and phase (a, e, M, epoch) are unchanged; only Ω, i and ω move.
    pub fn rotate_elements(&self, local: &OrbitalElements) -> OrbitalElements {
        local.with_orientation(&(self.rotation * local.orientation()))
    }
}
