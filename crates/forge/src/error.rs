use celestial::ExpressionError;
use orbit::OrbitError;
use population::{ConfigError, DistributionError};
use sampling::SamplingError;
use thiserror::Error;

/// A catalog that cannot be used. Raised before any draw.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error(transparent)]
    Load(#[from] ConfigError),

    #[error("duplicate {kind} `{name}`")]
    DuplicateName { kind: &'static str, name: String },

    #[error("population `{population}` references unknown body `{body}`")]
    UnknownBody { population: String, body: String },

    #[error("population `{population}`, {element}: {source}")]
    Element {
        population: String,
        element: &'static str,
        #[source]
        source: DistributionError,
    },

    #[error("population `{population}` lists unknown classification `{classification}`")]
    UnknownClassification {
        population: String,
        classification: String,
    },

    #[error("unknown reference plane `{0}`")]
    UnknownReferencePlane(String),

    #[error("reference plane `{plane}`: {source}")]
    DegenerateReferenceFrame {
        plane: String,
        #[source]
        source: OrbitError,
    },

    #[error("{owner}: {source}")]
    InvalidWeights {
        owner: String,
        #[source]
        source: SamplingError,
    },

    #[error("population `{population}`: {reason}")]
    InvalidOrbitShape { population: String, reason: String },

    #[error("{owner}: {reason}")]
    Unsupported { owner: String, reason: String },
}

/// A draw that could not produce a body. Nothing is returned in part.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DrawError {
    #[error("no population has a positive spawn rate")]
    NoPopulationsConfigured,

    #[error("unknown population `{0}`")]
    UnknownPopulation(String),

    #[error("population `{population}`: no valid {choice}")]
    NoValidChoice {
        population: String,
        choice: &'static str,
    },

    #[error("population `{population}`: invalid orbit shape: {reason}")]
    InvalidOrbitShape { population: String, reason: String },

    #[error("population `{population}`, {element}: {source}")]
    Element {
        population: String,
        element: &'static str,
        #[source]
        source: DistributionError,
    },

    #[error("population `{population}`: {source}")]
    Body {
        population: String,
        #[source]
        source: ExpressionError,
    },

    #[error("unknown reference plane `{0}`")]
    UnknownReferencePlane(String),
}

impl DrawError {
    /// Wraps an orbit failure without repeating its "invalid orbit shape"
    /// prefix.
    pub(crate) fn invalid_orbit(population: &str, error: OrbitError) -> Self {
        let reason = match error {
            OrbitError::InvalidOrbitShape(reason) => reason,
            other => other.to_string(),
        };
        DrawError::InvalidOrbitShape {
            population: population.to_string(),
            reason,
        }
    }
}

/// Why an intercept orbit could not be built for a drawn approach.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterceptError {
    /// The target or one of its parents could not be located.
    #[error(transparent)]
    Body(#[from] ExpressionError),

    #[error(transparent)]
    Orbit(#[from] OrbitError),
}
