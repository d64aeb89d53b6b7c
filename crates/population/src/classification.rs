//! Physical classification of spawned bodies.

use std::collections::BTreeMap;

use sampling::{SamplingError, WeightedTable};
use serde::{Deserialize, Serialize};

/// Relative weights keyed by label.
///
/// Kept sorted by label so that a seeded draw picks the same entry on every
/// load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weights(pub BTreeMap<String, f64>);

impl Weights {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn to_table(&self) -> Result<WeightedTable<String>, SamplingError> {
        WeightedTable::new(self.0.iter().map(|(label, weight)| (label.clone(), *weight)))
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Weights {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, w)| (k.into(), w)).collect())
    }
}

/// An asteroid type: composition, science and size distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Classification {
    pub name: String,

    #[serde(default)]
    pub title: String,

    /// Bulk density (kg/m³)
    pub density: f64,

    /// Science experiment identifiers
    #[serde(default)]
    pub experiments: Vec<String>,

    /// Size-category weights, used when the population lists none
    #[serde(default)]
    pub sizes: Weights,
}

impl Classification {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.name
        } else {
            &self.title
        }
    }
}

/// Host-evaluated conditions that decide when a spawned body becomes visible.
///
/// The engine does not interpret the conditions; it carries them with the
/// drawn body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Detectability {
    #[serde(default)]
    pub conditions: Vec<String>,
}

impl Detectability {
    /// True when every condition passes. An empty rule is always satisfied.
    pub fn is_satisfied(&self, mut predicate: impl FnMut(&str) -> bool) -> bool {
        self.conditions.iter().all(|c| predicate(c))
    }
}
