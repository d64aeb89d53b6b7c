//! The full configuration set and its TOML loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classification::Classification;
use crate::error::ConfigError;
use crate::plane::ReferencePlaneDef;
use crate::population::Population;

/// Everything the engine is configured with, as parsed.
///
/// Parsing checks structure only; cross-references (body names, plane and
/// classification names) are checked when the engine is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    #[serde(default)]
    pub populations: Vec<Population>,

    #[serde(default)]
    pub reference_planes: Vec<ReferencePlaneDef>,

    #[serde(default)]
    pub classifications: Vec<Classification>,

    /// Plane applied to populations that name none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_plane: Option<String>,
}

impl CatalogConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        debug!(
            populations = config.populations.len(),
            classifications = config.classifications.len(),
            planes = config.reference_planes.len(),
            "Parsed catalog"
        );
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    pub fn population(&self, name: &str) -> Option<&Population> {
        self.populations.iter().find(|p| p.name == name)
    }

    pub fn classification(&self, name: &str) -> Option<&Classification> {
        self.classifications.iter().find(|c| c.name == name)
    }

    pub fn reference_plane(&self, name: &str) -> Option<&ReferencePlaneDef> {
        self.reference_planes.iter().find(|p| p.name == name)
    }
}
