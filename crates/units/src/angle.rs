//! Angle normalisation helpers.
//!
//! Configuration and body properties express angles in degrees; the orbit
//! math works in radians.

use std::f64::consts::TAU;

/// Wrap an angle in degrees into [0, 360).
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Wrap an angle in radians into [0, 2π).
pub fn normalize_radians(radians: f64) -> f64 {
    let wrapped = radians.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}
