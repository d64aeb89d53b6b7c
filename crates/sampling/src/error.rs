use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SamplingError {
    #[error("no entry has a positive weight")]
    NoValidChoice,

    #[error("weight {weight} at index {index} is negative or not finite")]
    NegativeWeight { index: usize, weight: f64 },

    #[error("invalid range [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },

    #[error("invalid distribution parameters: {0}")]
    InvalidDistributionParameters(String),
}
