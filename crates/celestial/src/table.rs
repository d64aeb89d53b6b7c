//! The body-property table supplied by the host simulation.

use std::collections::HashMap;
use std::path::Path;

use orbit::{OrbitalElements, StateVector};
use serde::Deserialize;
use units::{circular_orbital_velocity, normalize_degrees, normalize_radians, Length, Time};

use crate::body::CelestialBody;
use crate::error::ExpressionError;
use crate::property::{Property, PropertyKind};

/// Snapshot of the host's celestial bodies at universal time `ut`.
///
/// The table is read-only for the duration of a draw. Time-dependent
/// properties (`mna`, `mnl`) are evaluated at `ut`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodyTable {
    bodies: HashMap<String, CelestialBody>,
    ut: Time,
}

impl BodyTable {
    /// Empty table at universal time `ut`.
    pub fn new(ut: Time) -> Self {
        Self {
            bodies: HashMap::new(),
            ut,
        }
    }

    /// Build a table, checking that names are unique and parents exist.
    pub fn with_bodies(
        ut: Time,
        bodies: impl IntoIterator<Item = CelestialBody>,
    ) -> Result<Self, ExpressionError> {
        let mut table = Self::new(ut);
        for body in bodies {
            if table.bodies.contains_key(&body.name) {
                return Err(ExpressionError::InvalidTable(format!(
                    "body `{}` is defined twice",
                    body.name
                )));
            }
            table.insert(body);
        }

        for body in table.bodies.values() {
            match (&body.parent, &body.orbit) {
                (Some(parent), Some(_)) if !table.bodies.contains_key(parent) => {
                    return Err(ExpressionError::InvalidTable(format!(
                        "body `{}` orbits unknown parent `{}`",
                        body.name, parent
                    )));
                }
                (Some(_), None) | (None, Some(_)) => {
                    return Err(ExpressionError::InvalidTable(format!(
                        "body `{}` needs both a parent and an orbit, or neither",
                        body.name
                    )));
                }
                _ => {}
            }
        }

        Ok(table)
    }

    /// Parse a TOML body document.
    ///
    /// ```toml
    /// ut = 0.0
    ///
    /// [[bodies]]
    /// name = "Sun"
    /// mu = 1.1723328e18
    /// radius = 261600000.0
    ///
    /// [[bodies]]
    /// name = "Kerbin"
    /// parent = "Sun"
    /// mu = 3.5316e12
    /// radius = 600000.0
    /// soi = 84159286.0
    /// orbit = { sma = 13599840256.0, ecc = 0.0, inc = 0.0, lan = 0.0, ape = 0.0, mna0 = 180.0 }
    /// ```
    ///
    /// Orbit angles are in degrees; `epoch` defaults to 0.
    pub fn from_toml_str(text: &str) -> Result<Self, ExpressionError> {
        let document: BodyDocument =
            toml::from_str(text).map_err(|e| ExpressionError::InvalidTable(e.to_string()))?;
        Self::with_bodies(
            Time::from_seconds(document.ut),
            document.bodies.into_iter().map(BodyRecord::into_body),
        )
    }

    /// Read and parse a TOML body document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ExpressionError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ExpressionError::InvalidTable(format!("{}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    pub fn insert(&mut self, body: CelestialBody) -> Option<CelestialBody> {
        self.bodies.insert(body.name.clone(), body)
    }

    /// Current universal time.
    pub fn ut(&self) -> Time {
        self.ut
    }

    pub fn set_time(&mut self, ut: Time) {
        self.ut = ut;
    }

    /// Same bodies at a different universal time.
    pub fn at_time(&self, ut: Time) -> Self {
        Self {
            bodies: self.bodies.clone(),
            ut,
        }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bodies.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bodies.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&CelestialBody> {
        self.bodies.get(name)
    }

    /// Look up a body, failing with `UnknownBody`.
    pub fn body(&self, name: &str) -> Result<&CelestialBody, ExpressionError> {
        self.bodies
            .get(name)
            .ok_or_else(|| ExpressionError::UnknownBody(name.to_string()))
    }

    pub fn gravitational_parameter(&self, name: &str) -> Result<f64, ExpressionError> {
        Ok(self.body(name)?.gravitational_parameter)
    }

    /// The body's orbit and its parent's gravitational parameter.
    pub fn orbit_of(&self, name: &str) -> Result<(&OrbitalElements, f64), ExpressionError> {
        let body = self.body(name)?;
        match (&body.parent, &body.orbit) {
            (Some(parent), Some(orbit)) => Ok((orbit, self.gravitational_parameter(parent)?)),
            _ => Err(ExpressionError::UnknownProperty {
                property: "orbit".to_string(),
                reason: format!("`{name}` is a root body and has no orbit"),
            }),
        }
    }

    /// Position and velocity of a body relative to its parent at time `t`.
    pub fn state_of(&self, name: &str, t: Time) -> Result<StateVector, ExpressionError> {
        let (orbit, parent_mu) = self.orbit_of(name)?;
        orbit
            .state_at(t, parent_mu)
            .map_err(|e| ExpressionError::InvalidTable(format!("orbit of `{name}`: {e}")))
    }

    /// Value of `property` for body `name`, in meters, degrees, seconds or m/s.
    pub fn property(&self, name: &str, property: Property) -> Result<f64, ExpressionError> {
        let body = self.body(name)?;
        let value = match property {
            Property::Radius => body.radius.to_meters(),
            Property::SphereOfInfluence => body.sphere_of_influence.to_meters(),
            _ => self.orbital_property(name, property)?,
        };

        // Degree conversion can land exactly on 360
        Ok(match property.kind() {
            PropertyKind::Angle => normalize_degrees(value),
            _ => value,
        })
    }

    fn orbital_property(&self, name: &str, property: Property) -> Result<f64, ExpressionError> {
        let (orbit, parent_mu) = self.orbit_of(name).map_err(|_| undefined(property, name))?;
        let lan = orbit.longitude_of_ascending_node;
        let argp = orbit.argument_of_periapsis;

        let value = match property {
            Property::SemiMajorAxis if !orbit.is_parabolic() => orbit.semi_major_axis.to_meters(),
            Property::Periapsis => orbit.periapsis().to_meters(),
            Property::Apoapsis => orbit
                .apoapsis()
                .map(|q| q.to_meters())
                .ok_or_else(|| undefined(property, name))?,
            Property::Eccentricity => orbit.eccentricity,
            Property::Inclination => orbit.inclination.to_degrees(),
            Property::ArgumentOfPeriapsis => argp.to_degrees(),
            Property::AscendingNode => lan.to_degrees(),
            Property::LongitudeOfPeriapsis => normalize_radians(lan + argp).to_degrees(),
            Property::MeanAnomalyAtEpoch => {
                normalize_radians(orbit.mean_anomaly_at(Time::zero(), parent_mu)).to_degrees()
            }
            Property::MeanLongitudeAtEpoch => {
                let m = orbit.mean_anomaly_at(Time::zero(), parent_mu);
                normalize_radians(lan + argp + m).to_degrees()
            }
            Property::MeanAnomaly => {
                normalize_radians(orbit.mean_anomaly_at(self.ut, parent_mu)).to_degrees()
            }
            Property::MeanLongitude => {
                let m = orbit.mean_anomaly_at(self.ut, parent_mu);
                normalize_radians(lan + argp + m).to_degrees()
            }
            Property::Period => orbit
                .period(parent_mu)
                .map(|t| t.to_seconds())
                .ok_or_else(|| undefined(property, name))?,
            Property::OrbitalSpeed if orbit.is_bound() => {
                circular_orbital_velocity(parent_mu, orbit.semi_major_axis.to_meters())
            }
            _ => return Err(undefined(property, name)),
        };
        Ok(value)
    }
}

fn undefined(property: Property, body: &str) -> ExpressionError {
    ExpressionError::UnknownProperty {
        property: property.code().to_string(),
        reason: format!("not defined for `{body}`"),
    }
}

#[derive(Debug, Deserialize)]
struct BodyDocument {
    #[serde(default)]
    ut: f64,
    #[serde(default)]
    bodies: Vec<BodyRecord>,
}

#[derive(Debug, Deserialize)]
struct BodyRecord {
    name: String,
    parent: Option<String>,
    mu: f64,
    radius: f64,
    soi: Option<f64>,
    orbit: Option<OrbitRecord>,
}

#[derive(Debug, Deserialize)]
struct OrbitRecord {
    sma: f64,
    #[serde(default)]
    ecc: f64,
    #[serde(default)]
    inc: f64,
    #[serde(default)]
    lan: f64,
    #[serde(default)]
    ape: f64,
    #[serde(default)]
    mna0: f64,
    #[serde(default)]
    epoch: f64,
}

impl BodyRecord {
    fn into_body(self) -> CelestialBody {
        let orbit = self.orbit.map(|o| OrbitalElements {
            semi_major_axis: Length::from_meters(o.sma),
            eccentricity: o.ecc,
            inclination: o.inc.to_radians(),
            longitude_of_ascending_node: normalize_radians(o.lan.to_radians()),
            argument_of_periapsis: normalize_radians(o.ape.to_radians()),
            mean_anomaly: normalize_radians(o.mna0.to_radians()),
            epoch: Time::from_seconds(o.epoch),
        });

        CelestialBody {
            name: self.name,
            parent: self.parent,
            gravitational_parameter: self.mu,
            radius: Length::from_meters(self.radius),
            sphere_of_influence: Length::from_meters(self.soi.unwrap_or(f64::INFINITY)),
            orbit,
        }
    }
}
