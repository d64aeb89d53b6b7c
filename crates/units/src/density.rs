use serde::{Deserialize, Serialize};

/// Bulk density in kg/m³
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Density(f64);

impl Density {
    pub fn from_kg_per_m3(value: f64) -> Self {
        Self(value)
    }

    pub fn to_kg_per_m3(&self) -> f64 {
        self.0
    }
}
