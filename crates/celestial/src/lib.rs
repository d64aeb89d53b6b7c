//! Celestial body properties and the expressions that reference them.
//!
//! Configuration refers to the host's bodies symbolically ("half of Kerbin's
//! semimajor axis", "the 2:3 resonance with Jool") so that it stays valid
//! across different solar-system layouts. The host supplies a [`BodyTable`]
//! snapshot; an [`Expression`] is resolved against it each time a value is
//! needed.

pub mod body;
pub mod error;
pub mod expression;
pub mod property;
pub mod table;

#[cfg(test)]
mod body_test;
#[cfg(test)]
mod expression_test;

pub use body::CelestialBody;
pub use error::ExpressionError;
pub use expression::Expression;
pub use property::{Property, PropertyKind, ValueContext};
pub use table::BodyTable;
