use thiserror::Error;

/// Failures building or converting orbits.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrbitError {
    /// A reference frame vector was too short to define a direction.
    #[error("degenerate reference frame: {0}")]
    DegenerateReferenceFrame(String),

    /// The requested elements do not describe a usable conic.
    #[error("invalid orbit shape: {0}")]
    InvalidOrbitShape(String),
}
