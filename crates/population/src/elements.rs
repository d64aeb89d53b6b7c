//! Per-element specs for orbital populations.

use serde::{Deserialize, Serialize};

use crate::distribution::DistributionSpec;

/// Which radius the size element fixes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeType {
    /// a directly
    #[default]
    SemimajorAxis,
    /// q, with a = q / (1 - e)
    Periapsis,
    /// Q, with a = Q / (1 + e)
    Apoapsis,
}

/// How the drawn phase angle is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseType {
    #[default]
    MeanAnomaly,
    /// L = Ω + ω + M
    MeanLongitude,
}

/// The moment at which the drawn phase applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpochType {
    /// t = 0; the phase is propagated to the current time
    #[default]
    GameStart,
    /// The body table's current time
    Now,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizeSpec {
    #[serde(rename = "type", default)]
    pub kind: SizeType,
    /// Meters
    pub distribution: DistributionSpec,
}

impl SizeSpec {
    pub fn new(kind: SizeType, distribution: DistributionSpec) -> Self {
        Self { kind, distribution }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhaseSpec {
    #[serde(rename = "type", default)]
    pub kind: PhaseType,
    #[serde(default)]
    pub epoch: EpochType,
    /// Degrees
    #[serde(default = "full_turn")]
    pub distribution: DistributionSpec,
}

impl Default for PhaseSpec {
    fn default() -> Self {
        Self {
            kind: PhaseType::MeanAnomaly,
            epoch: EpochType::GameStart,
            distribution: full_turn(),
        }
    }
}

/// Element distributions for an orbital population.
///
/// Only the size is required. Missing elements give circular, equatorial
/// orbits with random orientation and phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrbitSpec {
    pub size: SizeSpec,

    #[serde(default = "zero")]
    pub eccentricity: DistributionSpec,

    /// Degrees
    #[serde(default = "zero")]
    pub inclination: DistributionSpec,

    /// Degrees
    #[serde(default = "full_turn")]
    pub argument_of_periapsis: DistributionSpec,

    /// Degrees
    #[serde(default = "full_turn")]
    pub ascending_node: DistributionSpec,

    #[serde(default)]
    pub phase: PhaseSpec,
}

impl OrbitSpec {
    /// Defaults for every element except the size.
    pub fn with_size(size: SizeSpec) -> Self {
        Self {
            size,
            eccentricity: zero(),
            inclination: zero(),
            argument_of_periapsis: full_turn(),
            ascending_node: full_turn(),
            phase: PhaseSpec::default(),
        }
    }
}

fn zero() -> DistributionSpec {
    DistributionSpec::constant(0.0)
}

fn full_turn() -> DistributionSpec {
    DistributionSpec::uniform(0.0, 360.0)
}
