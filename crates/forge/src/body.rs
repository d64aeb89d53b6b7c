use orbit::Orbit;
use population::Detectability;
use serde::{Deserialize, Serialize};
use units::Density;
use uuid::Uuid;

/// Everything the host needs to create one spawned body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawnBody {
    /// Identifier drawn from the caller's RNG, so seeded runs repeat it
    pub id: Uuid,

    pub population: String,
    pub population_title: String,

    /// Orbit in the central body's base frame
    pub orbit: Orbit,

    pub classification: String,
    pub classification_title: String,
    pub density: Density,
    pub experiments: Vec<String>,

    /// Size category label
    pub size: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detectability: Option<Detectability>,
}

impl DrawnBody {
    /// Whether the host's detection conditions currently hold.
    /// Bodies without a rule are always detectable.
    pub fn is_detectable(&self, predicate: impl FnMut(&str) -> bool) -> bool {
        self.detectability
            .as_ref()
            .map_or(true, |rule| rule.is_satisfied(predicate))
    }
}
