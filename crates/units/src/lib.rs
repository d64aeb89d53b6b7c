pub mod angle;
pub mod density;
pub mod length;
pub mod time;
pub mod velocity;

#[cfg(test)]
mod velocity_test;

pub use angle::{normalize_degrees, normalize_radians};
pub use density::Density;
pub use length::Length;
pub use time::Time;
pub use velocity::{circular_orbital_velocity, Velocity};
