//! Spawnable populations.

use serde::{Deserialize, Serialize};

use crate::classification::{Detectability, Weights};
use crate::distribution::DistributionSpec;
use crate::elements::OrbitSpec;

/// Parameters for bodies on a collision or close-approach course with a
/// target body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterceptSpec {
    /// Body to approach
    pub target: String,

    /// Periapsis distance from the target's centre (m)
    pub approach: DistributionSpec,

    /// Time from now until closest approach (s)
    pub warn_time: DistributionSpec,

    /// Hyperbolic excess speed relative to the target (m/s)
    pub speed: DistributionSpec,
}

/// How a population's orbits are produced.
#[derive(Debug, Clone, PartialEq)]
pub enum PopulationKind {
    /// Orbits drawn element by element about `central_body`
    Orbital {
        central_body: String,
        elements: OrbitSpec,
    },

    /// Hyperbolic flybys of a target body
    Intercept(InterceptSpec),
}

/// A named family of spawnable bodies.
///
/// Exactly one of `orbit` (with `central_body`) or `intercept` is given in
/// configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PopulationRepr", into = "PopulationRepr")]
pub struct Population {
    pub name: String,
    pub title: String,

    /// Relative spawn weight; zero disables the population
    pub spawn_rate: f64,

    pub kind: PopulationKind,

    /// Classification name → weight
    pub asteroid_types: Weights,

    /// Size category → weight; empty defers to the classification
    pub sizes: Weights,

    pub detectability: Option<Detectability>,

    /// Named reference plane the orbit is drawn in
    pub reference_plane: Option<String>,
}

impl Population {
    pub fn orbital(
        name: impl Into<String>,
        central_body: impl Into<String>,
        spawn_rate: f64,
        elements: OrbitSpec,
    ) -> Self {
        let name = name.into();
        Self {
            title: name.clone(),
            name,
            spawn_rate,
            kind: PopulationKind::Orbital {
                central_body: central_body.into(),
                elements,
            },
            asteroid_types: Weights::default(),
            sizes: Weights::default(),
            detectability: None,
            reference_plane: None,
        }
    }

    pub fn intercept(name: impl Into<String>, spawn_rate: f64, spec: InterceptSpec) -> Self {
        let name = name.into();
        Self {
            title: name.clone(),
            name,
            spawn_rate,
            kind: PopulationKind::Intercept(spec),
            asteroid_types: Weights::default(),
            sizes: Weights::default(),
            detectability: None,
            reference_plane: None,
        }
    }

    pub fn with_asteroid_types(mut self, weights: Weights) -> Self {
        self.asteroid_types = weights;
        self
    }

    pub fn with_sizes(mut self, weights: Weights) -> Self {
        self.sizes = weights;
        self
    }

    pub fn with_reference_plane(mut self, plane: impl Into<String>) -> Self {
        self.reference_plane = Some(plane.into());
        self
    }

    pub fn with_detectability(mut self, detectability: Detectability) -> Self {
        self.detectability = Some(detectability);
        self
    }

    /// Every body name the population refers to.
    pub fn referenced_bodies(&self) -> Vec<&str> {
        let mut bodies = Vec::new();
        match &self.kind {
            PopulationKind::Orbital {
                central_body,
                elements,
            } => {
                bodies.push(central_body.as_str());
                for spec in [
                    &elements.size.distribution,
                    &elements.eccentricity,
                    &elements.inclination,
                    &elements.argument_of_periapsis,
                    &elements.ascending_node,
                    &elements.phase.distribution,
                ] {
                    bodies.extend(spec.bodies());
                }
            }
            PopulationKind::Intercept(spec) => {
                bodies.push(spec.target.as_str());
                for dist in [&spec.approach, &spec.warn_time, &spec.speed] {
                    bodies.extend(dist.bodies());
                }
            }
        }
        bodies
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PopulationRepr {
    name: String,
    #[serde(default)]
    title: String,
    #[serde(default = "default_spawn_rate")]
    spawn_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    central_body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    orbit: Option<OrbitSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    intercept: Option<InterceptSpec>,
    #[serde(default)]
    asteroid_types: Weights,
    #[serde(default)]
    sizes: Weights,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    detectability: Option<Detectability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reference_plane: Option<String>,
}

fn default_spawn_rate() -> f64 {
    1.0
}

impl TryFrom<PopulationRepr> for Population {
    type Error = String;

    fn try_from(repr: PopulationRepr) -> Result<Self, Self::Error> {
        let kind = match (repr.orbit, repr.intercept, repr.central_body) {
            (Some(elements), None, Some(central_body)) => PopulationKind::Orbital {
                central_body,
                elements,
            },
            (Some(_), None, None) => {
                return Err(format!(
                    "population `{}` has an orbit but no `central_body`",
                    repr.name
                ))
            }
            (None, Some(spec), None) => PopulationKind::Intercept(spec),
            (None, Some(_), Some(_)) => {
                return Err(format!(
                    "population `{}` is an intercept; its central body is the target's",
                    repr.name
                ))
            }
            _ => {
                return Err(format!(
                    "population `{}` needs exactly one of `orbit` or `intercept`",
                    repr.name
                ))
            }
        };

        let title = if repr.title.is_empty() {
            repr.name.clone()
        } else {
            repr.title
        };

        Ok(Self {
            name: repr.name,
            title,
            spawn_rate: repr.spawn_rate,
            kind,
            asteroid_types: repr.asteroid_types,
            sizes: repr.sizes,
            detectability: repr.detectability,
            reference_plane: repr.reference_plane,
        })
    }
}

impl From<Population> for PopulationRepr {
    fn from(population: Population) -> Self {
        let (central_body, orbit, intercept) = match population.kind {
            PopulationKind::Orbital {
                central_body,
                elements,
            } => (Some(central_body), Some(elements), None),
            PopulationKind::Intercept(spec) => (None, None, Some(spec)),
        };
        Self {
            name: population.name,
            title: population.title,
            spawn_rate: population.spawn_rate,
            central_body,
            orbit,
            intercept,
            asteroid_types: population.asteroid_types,
            sizes: population.sizes,
            detectability: population.detectability,
            reference_plane: population.reference_plane,
        }
    }
}
