//! Validated, ready-to-draw form of a catalog configuration.

use std::collections::{HashMap, HashSet};

use celestial::{BodyTable, ValueContext};
use orbit::ReferencePlane;
use population::{
    CatalogConfig, Classification, DistributionSpec, Population, PopulationKind, SizeType,
};
use sampling::{SamplingError, WeightedTable};
use tracing::warn;

use crate::error::ConfigurationError;

/// A population with its weight tables built and its plane resolved.
#[derive(Debug, Clone)]
pub(crate) struct PreparedPopulation {
    pub definition: Population,
    pub plane: ReferencePlane,
    pub asteroid_types: WeightedTable<String>,
    pub sizes: WeightedTable<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct PreparedClassification {
    pub definition: Classification,
    pub sizes: WeightedTable<String>,
}

/// Immutable, fully checked catalog. Swapped as a whole on reload.
#[derive(Debug, Clone)]
pub(crate) struct Catalog {
    pub populations: Vec<PreparedPopulation>,
    /// Population index weighted by spawn rate
    pub spawn_table: WeightedTable<usize>,
    pub classifications: HashMap<String, PreparedClassification>,
    pub planes: HashMap<String, ReferencePlane>,
}

impl Catalog {
    /// Check every cross-reference and every element spec against `bodies`.
    pub fn build(config: CatalogConfig, bodies: &BodyTable) -> Result<Self, ConfigurationError> {
        let planes = build_planes(&config)?;
        let default_plane = match &config.default_plane {
            Some(name) => Some(
                *planes
                    .get(name)
                    .ok_or_else(|| ConfigurationError::UnknownReferencePlane(name.clone()))?,
            ),
            None => None,
        };

        let classifications = build_classifications(config.classifications)?;

        let mut seen = HashSet::new();
        let mut populations = Vec::with_capacity(config.populations.len());
        for definition in config.populations {
            if !seen.insert(definition.name.clone()) {
                return Err(ConfigurationError::DuplicateName {
                    kind: "population",
                    name: definition.name,
                });
            }
            populations.push(prepare_population(
                definition,
                bodies,
                &planes,
                default_plane,
                &classifications,
            )?);
        }

        let spawn_table = WeightedTable::new(
            populations
                .iter()
                .enumerate()
                .map(|(index, p)| (index, p.definition.spawn_rate)),
        )
        .map_err(|source| {
            let owner = match &source {
                SamplingError::NegativeWeight { index, .. } => format!(
                    "population `{}` spawn rate",
                    populations[*index].definition.name
                ),
                _ => "spawn rates".to_string(),
            };
            ConfigurationError::InvalidWeights { owner, source }
        })?;

        Ok(Self {
            populations,
            spawn_table,
            classifications,
            planes,
        })
    }

    pub fn population(&self, name: &str) -> Option<&PreparedPopulation> {
        self.populations.iter().find(|p| p.definition.name == name)
    }
}

fn build_planes(config: &CatalogConfig) -> Result<HashMap<String, ReferencePlane>, ConfigurationError> {
    let mut planes = HashMap::new();
    for def in &config.reference_planes {
        let plane = def.to_reference_plane().map_err(|source| {
            ConfigurationError::DegenerateReferenceFrame {
                plane: def.name.clone(),
                source,
            }
        })?;
        if planes.insert(def.name.clone(), plane).is_some() {
            return Err(ConfigurationError::DuplicateName {
                kind: "reference plane",
                name: def.name.clone(),
            });
        }
    }
    Ok(planes)
}

fn build_classifications(
    definitions: Vec<Classification>,
) -> Result<HashMap<String, PreparedClassification>, ConfigurationError> {
    let mut classifications = HashMap::new();
    for definition in definitions {
        if !(definition.density.is_finite() && definition.density > 0.0) {
            return Err(ConfigurationError::Unsupported {
                owner: format!("classification `{}`", definition.name),
                reason: format!("density {} kg/m³ must be positive", definition.density),
            });
        }
        let sizes =
            definition
                .sizes
                .to_table()
                .map_err(|source| ConfigurationError::InvalidWeights {
                    owner: format!("classification `{}` sizes", definition.name),
                    source,
                })?;
        let name = definition.name.clone();
        if classifications
            .insert(name.clone(), PreparedClassification { definition, sizes })
            .is_some()
        {
            return Err(ConfigurationError::DuplicateName {
                kind: "classification",
                name,
            });
        }
    }
    Ok(classifications)
}

fn prepare_population(
    definition: Population,
    bodies: &BodyTable,
    planes: &HashMap<String, ReferencePlane>,
    default_plane: Option<ReferencePlane>,
    classifications: &HashMap<String, PreparedClassification>,
) -> Result<PreparedPopulation, ConfigurationError> {
    let name = definition.name.clone();

    if definition.spawn_rate == 0.0 {
        warn!(population = %name, "Population has zero spawn rate and will never be drawn");
    }

    for body in definition.referenced_bodies() {
        if !bodies.contains(body) {
            return Err(ConfigurationError::UnknownBody {
                population: name,
                body: body.to_string(),
            });
        }
    }

    let plane = match (&definition.reference_plane, &definition.kind) {
        (Some(_), PopulationKind::Intercept(_)) => {
            return Err(ConfigurationError::Unsupported {
                owner: format!("population `{name}`"),
                reason: "intercept orbits are isotropic and take no reference plane".to_string(),
            });
        }
        (Some(plane), _) => *planes
            .get(plane)
            .ok_or_else(|| ConfigurationError::UnknownReferencePlane(plane.clone()))?,
        (None, _) => default_plane.unwrap_or_default(),
    };

    match &definition.kind {
        PopulationKind::Orbital { elements, .. } => {
            let checks: [(&'static str, &DistributionSpec, ValueContext); 6] = [
                ("size", &elements.size.distribution, ValueContext::Length),
                ("eccentricity", &elements.eccentricity, ValueContext::Ratio),
                ("inclination", &elements.inclination, ValueContext::Angle),
                (
                    "argument of periapsis",
                    &elements.argument_of_periapsis,
                    ValueContext::Angle,
                ),
                ("ascending node", &elements.ascending_node, ValueContext::Angle),
                ("phase", &elements.phase.distribution, ValueContext::Angle),
            ];
            check_elements(&name, &checks, bodies)?;

            // Closed-orbit sizing cannot take e >= 1
            if elements.size.kind != SizeType::Periapsis {
                if let Some(max_e) = elements.eccentricity.literal_upper_bound() {
                    if max_e >= 1.0 {
                        return Err(ConfigurationError::InvalidOrbitShape {
                            population: name,
                            reason: format!(
                                "{:?} sizing needs e < 1 but eccentricity reaches {max_e}",
                                elements.size.kind
                            ),
                        });
                    }
                }
            }
        }
        PopulationKind::Intercept(spec) => {
            let checks: [(&'static str, &DistributionSpec, ValueContext); 3] = [
                ("approach", &spec.approach, ValueContext::Length),
                ("warning time", &spec.warn_time, ValueContext::Time),
                ("speed", &spec.speed, ValueContext::Speed),
            ];
            check_elements(&name, &checks, bodies)?;
        }
    }

    for classification in definition.asteroid_types.labels() {
        if !classifications.contains_key(classification) {
            return Err(ConfigurationError::UnknownClassification {
                population: name,
                classification: classification.to_string(),
            });
        }
    }
    let asteroid_types = definition.asteroid_types.to_table().map_err(|source| {
        ConfigurationError::InvalidWeights {
            owner: format!("population `{name}` asteroid types"),
            source,
        }
    })?;
    let sizes =
        definition
            .sizes
            .to_table()
            .map_err(|source| ConfigurationError::InvalidWeights {
                owner: format!("population `{name}` sizes"),
                source,
            })?;

    // Every draw picks a type and then a size; both must be able to succeed
    if asteroid_types.total_weight() <= 0.0 {
        return Err(ConfigurationError::InvalidWeights {
            owner: format!("population `{name}` asteroid types"),
            source: SamplingError::NoValidChoice,
        });
    }
    for (label, weight) in asteroid_types.iter() {
        let Some(classification) = classifications.get(label) else {
            continue;
        };
        let size_table = if sizes.is_empty() {
            &classification.sizes
        } else {
            &sizes
        };
        if weight > 0.0 && size_table.total_weight() <= 0.0 {
            return Err(ConfigurationError::InvalidWeights {
                owner: format!("population `{name}` sizes for classification `{label}`"),
                source: SamplingError::NoValidChoice,
            });
        }
    }

    Ok(PreparedPopulation {
        definition,
        plane,
        asteroid_types,
        sizes,
    })
}

/// Resolve each element once so that bad references fail at load.
fn check_elements(
    population: &str,
    checks: &[(&'static str, &DistributionSpec, ValueContext)],
    bodies: &BodyTable,
) -> Result<(), ConfigurationError> {
    for (element, spec, context) in checks {
        spec.resolve(bodies, *context)
            .map_err(|source| ConfigurationError::Element {
                population: population.to_string(),
                element: *element,
                source,
            })?;
    }
    Ok(())
}
