//! Keplerian orbit representations for spawned small bodies.
//!
//! Elements are three-dimensional and cover bound, parabolic and hyperbolic
//! orbits.
//! Lengths are in meters, times in seconds, angles in radians.
//!
//! # Frames
//!
//! Every orbit is expressed in its central body's *base frame*. A
//! [`ReferencePlane`] is a proper rotation from some named local frame (a
//! retrograde family's plane, an invariable plane, ...) into that base frame.

mod elements;
mod error;
mod kepler;
mod reference_plane;
mod state;


pub use elements::{is_parabolic, Orbit, OrbitalElements};
pub use error::OrbitError;
pub use kepler::{
    eccentric_anomaly_to_true, hyperbolic_anomaly_to_true, solve_barker, solve_hyperbolic_kepler,
    solve_keplers_equation, true_anomaly_to_mean,
};
pub use reference_plane::{orientation_from_angles, orientation_to_angles, ReferencePlane};
pub use state::StateVector;

/// Eccentricities within this distance of 1 are treated as parabolic.
pub const PARABOLIC_TOLERANCE: f64 = 1e-9;
