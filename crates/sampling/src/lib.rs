//! Random draws for procedural generation.
//!
//! [`Distribution`] covers the parametric families configuration can name;
//! [`WeightedTable`] is the categorical selector shared by population,
//! classification and size choices. Every sampler takes the caller's RNG, so
//! a seeded `ChaChaRng` reproduces a run exactly.

mod distribution;
mod error;
mod weighted;

#[cfg(test)]
mod distribution_test;

pub use distribution::{
    sample_beta, sample_gaussian, sample_isotropic, sample_log_normal, sample_log_uniform,
    sample_rayleigh, sample_uniform, Distribution, Family,
};
pub use error::SamplingError;
pub use weighted::WeightedTable;
