//! Configuration model for spawned small-body populations.
//!
//! A [`CatalogConfig`] is the parsed, not-yet-validated form of the
//! configuration set: populations, classifications and named reference
//! planes. Values that refer to the host's bodies are kept symbolic as
//! [`celestial::Expression`]s and resolved on every draw.
//!
//! # Example
//!
//! ```toml
//! default_plane = "ecliptic"
//!
//! [[reference_planes]]
//! name = "ecliptic"
//! angles = { lan = 0, inc = 0, ape = 0 }
//!
//! [[classifications]]
//! name = "stony"
//! title = "Stony asteroid"
//! density = 2700
//! sizes = { A = 1, B = 2, C = 1 }
//!
//! [[populations]]
//! name = "outer_belt"
//! title = "Outer belt asteroid"
//! central_body = "Sun"
//! spawn_rate = 2.0
//! asteroid_types = { stony = 1 }
//!
//! [populations.orbit]
//! size = { type = "Periapsis", distribution = { type = "LogUniform", min = "Ratio(Dres.sma, 0.9)", max = "Resonance(Jool, 1:2)" } }
//! eccentricity = { type = "Rayleigh", avg = 0.1 }
//! inclination = { type = "Rayleigh", avg = 4 }
//! ```

mod catalog;
mod classification;
mod distribution;
mod elements;
mod error;
mod plane;
mod population;

#[cfg(test)]
mod catalog_test;
#[cfg(test)]
mod population_test;

pub use catalog::CatalogConfig;
pub use classification::{Classification, Detectability, Weights};
pub use distribution::{DistributionSpec, Parameters};
pub use elements::{EpochType, OrbitSpec, PhaseSpec, PhaseType, SizeSpec, SizeType};
pub use error::{ConfigError, DistributionError};
pub use plane::{PlaneOrientation, ReferencePlaneDef};
pub use population::{InterceptSpec, Population, PopulationKind};
