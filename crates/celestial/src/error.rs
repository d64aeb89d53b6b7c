use thiserror::Error;

/// Failures parsing or resolving an [`Expression`](crate::Expression).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    #[error("unknown body `{0}`")]
    UnknownBody(String),

    #[error("unknown property `{property}`: {reason}")]
    UnknownProperty { property: String, reason: String },

    #[error("malformed expression `{text}`: {reason}")]
    MalformedExpression { text: String, reason: String },

    #[error("invalid resonance {p}:{q}")]
    InvalidResonance { p: u32, q: u32 },

    #[error("invalid body table: {0}")]
    InvalidTable(String),
}
