//! Scalar properties of a celestial body that expressions can reference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExpressionError;

/// Physical dimension of a property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyKind {
    /// Meters
    Length,
    /// Degrees
    Angle,
    /// Dimensionless
    Ratio,
    /// Seconds
    Time,
    /// Meters per second
    Speed,
}

/// What kind of value an expression is being resolved for.
///
/// Element specs declare their context so that, for example, a radius cannot
/// be used where an inclination is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueContext {
    Length,
    Angle,
    Ratio,
    Time,
    Speed,
    Any,
}

impl ValueContext {
    pub fn accepts(&self, kind: PropertyKind) -> bool {
        matches!(
            (self, kind),
            (Self::Any, _)
                | (Self::Length, PropertyKind::Length)
                | (Self::Angle, PropertyKind::Angle)
                | (Self::Ratio, PropertyKind::Ratio)
                | (Self::Time, PropertyKind::Time)
                | (Self::Speed, PropertyKind::Speed)
        )
    }
}

impl fmt::Display for ValueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Length => "length",
            Self::Angle => "angle",
            Self::Ratio => "dimensionless",
            Self::Time => "time",
            Self::Speed => "speed",
            Self::Any => "any",
        };
        f.write_str(name)
    }
}

/// A named body property, addressed in configuration by a short code.
///
/// | code   | property                                   |
/// |--------|--------------------------------------------|
/// | `rad`  | mean radius                                |
/// | `soi`  | sphere-of-influence radius                 |
/// | `sma`  | semimajor axis                             |
/// | `per`  | periapsis radius                           |
/// | `apo`  | apoapsis radius                            |
/// | `ecc`  | eccentricity                               |
/// | `inc`  | inclination                                |
/// | `ape`  | argument of periapsis                      |
/// | `lan`  | longitude of ascending node                |
/// | `lpe`  | longitude of periapsis                     |
/// | `mna0` | mean anomaly at epoch zero                 |
/// | `mnl0` | mean longitude at epoch zero               |
/// | `mna`  | mean anomaly at the table's current time   |
/// | `mnl`  | mean longitude at the table's current time |
/// | `prd`  | sidereal orbital period                    |
/// | `spd`  | mean orbital speed                         |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Property {
    Radius,
    SphereOfInfluence,
    SemiMajorAxis,
    Periapsis,
    Apoapsis,
    Eccentricity,
    Inclination,
    ArgumentOfPeriapsis,
    AscendingNode,
    LongitudeOfPeriapsis,
    MeanAnomalyAtEpoch,
    MeanLongitudeAtEpoch,
    MeanAnomaly,
    MeanLongitude,
    Period,
    OrbitalSpeed,
}

impl Property {
    pub const ALL: [Property; 16] = [
        Self::Radius,
        Self::SphereOfInfluence,
        Self::SemiMajorAxis,
        Self::Periapsis,
        Self::Apoapsis,
        Self::Eccentricity,
        Self::Inclination,
        Self::ArgumentOfPeriapsis,
        Self::AscendingNode,
        Self::LongitudeOfPeriapsis,
        Self::MeanAnomalyAtEpoch,
        Self::MeanLongitudeAtEpoch,
        Self::MeanAnomaly,
        Self::MeanLongitude,
        Self::Period,
        Self::OrbitalSpeed,
    ];

    /// Configuration code for this property
    pub fn code(&self) -> &'static str {
        match self {
            Self::Radius => "rad",
            Self::SphereOfInfluence => "soi",
            Self::SemiMajorAxis => "sma",
            Self::Periapsis => "per",
            Self::Apoapsis => "apo",
            Self::Eccentricity => "ecc",
            Self::Inclination => "inc",
            Self::ArgumentOfPeriapsis => "ape",
            Self::AscendingNode => "lan",
            Self::LongitudeOfPeriapsis => "lpe",
            Self::MeanAnomalyAtEpoch => "mna0",
            Self::MeanLongitudeAtEpoch => "mnl0",
            Self::MeanAnomaly => "mna",
            Self::MeanLongitude => "mnl",
            Self::Period => "prd",
            Self::OrbitalSpeed => "spd",
        }
    }

    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Radius
            | Self::SphereOfInfluence
            | Self::SemiMajorAxis
            | Self::Periapsis
            | Self::Apoapsis => PropertyKind::Length,
            Self::Eccentricity => PropertyKind::Ratio,
            Self::Inclination
            | Self::ArgumentOfPeriapsis
            | Self::AscendingNode
            | Self::LongitudeOfPeriapsis
            | Self::MeanAnomalyAtEpoch
            | Self::MeanLongitudeAtEpoch
            | Self::MeanAnomaly
            | Self::MeanLongitude => PropertyKind::Angle,
            Self::Period => PropertyKind::Time,
            Self::OrbitalSpeed => PropertyKind::Speed,
        }
    }

    /// Whether the value depends on the body's orbit (root bodies have none).
    pub fn is_orbital(&self) -> bool {
        !matches!(self, Self::Radius | Self::SphereOfInfluence)
    }
}

impl FromStr for Property {
    type Err = ExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.code() == code)
            .ok_or_else(|| ExpressionError::UnknownProperty {
                property: s.trim().to_string(),
                reason: "not a recognised property code".to_string(),
            })
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
