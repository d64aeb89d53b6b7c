use celestial::ExpressionError;
use sampling::{Family, SamplingError};
use thiserror::Error;

/// Failures building or drawing from a [`DistributionSpec`](crate::DistributionSpec).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistributionError {
    #[error("{family} requires `{parameter}`")]
    MissingParameter {
        family: Family,
        parameter: &'static str,
    },

    #[error("{family} does not take `{parameter}`")]
    UnexpectedParameter {
        family: Family,
        parameter: &'static str,
    },

    #[error(transparent)]
    Expression(#[from] ExpressionError),

    #[error(transparent)]
    Sampling(#[from] SamplingError),
}

/// Failures reading a catalog document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("failed to parse catalog: {0}")]
    Parse(String),
}
