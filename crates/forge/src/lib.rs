//! Draws orbits and physical classifications for procedurally spawned
//! asteroids and comets.
//!
//! The host builds an [`Engine`] from a [`population::CatalogConfig`] and a
//! [`celestial::BodyTable`] snapshot of its solar system, then calls
//! [`Engine::draw_body`] whenever it decides a new body should appear. Each
//! draw picks a population by spawn rate, draws the orbital elements, rotates
//! them into the central body's frame and picks a classification and size.

mod assembler;
mod body;
mod catalog;
mod classify;
mod engine;
mod error;
mod intercept;


pub use assembler::semi_major_axis;
pub use body::DrawnBody;
pub use engine::Engine;
pub use error::{ConfigurationError, DrawError, InterceptError};
pub use intercept::{intercept_orbit, random_orientation, Approach};
