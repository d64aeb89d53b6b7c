//! Celestial bodies as seen by the sampling engine.

use orbit::OrbitalElements;
use serde::{Deserialize, Serialize};
use units::Length;

/// A read-only record of one named body in the host simulation.
///
/// Root bodies (the system's star) have no parent and no orbit. Every other
/// body orbits its parent; its elements are expressed in the parent's base
/// frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CelestialBody {
    /// Name as referenced by configuration (e.g. "Kerbin")
    pub name: String,

    /// Name of the body this one orbits, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Gravitational parameter μ = GM (m³/s²)
    pub gravitational_parameter: f64,

    /// Mean radius
    pub radius: Length,

    /// Sphere-of-influence radius (infinite for the root body)
    pub sphere_of_influence: Length,

    /// Orbit about the parent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbit: Option<OrbitalElements>,
}

impl CelestialBody {
    /// A root body with no parent.
    pub fn root(name: impl Into<String>, gravitational_parameter: f64, radius: Length) -> Self {
        Self {
            name: name.into(),
            parent: None,
            gravitational_parameter,
            radius,
            sphere_of_influence: Length::from_meters(f64::INFINITY),
            orbit: None,
        }
    }

    /// A body orbiting `parent`.
    pub fn orbiting(
        name: impl Into<String>,
        parent: impl Into<String>,
        gravitational_parameter: f64,
        radius: Length,
        sphere_of_influence: Length,
        orbit: OrbitalElements,
    ) -> Self {
        Self {
            name: name.into(),
            parent: Some(parent.into()),
            gravitational_parameter,
            radius,
            sphere_of_influence,
            orbit: Some(orbit),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
