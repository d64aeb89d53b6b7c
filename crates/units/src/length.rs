use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

pub const KM_TO_M: f64 = 1.0e3;
pub const GM_TO_M: f64 = 1.0e9;

/// A physical length quantity using f64 precision.
///
/// The `Length` struct represents length values with meters as the base unit,
/// matching the host simulation's native unit for orbital radii. Negative
/// values are allowed: a hyperbolic orbit has a negative semimajor axis.
///
/// # Examples
///
/// ```rust
/// use units::Length;
///
/// let kerbin_orbit = Length::from_km(13_599_840.256);
/// let soi = Length::from_km(84_159.286);
///
/// let orbit_in_gm = kerbin_orbit.to_gigameters();
/// assert!(orbit_in_gm > 13.0);
/// assert!(soi < kerbin_orbit);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Length(f64); // Base unit: meters

impl Length {
    /// Creates a zero length value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Length` from a value in meters.
    pub fn from_meters(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Length` from a value in kilometers.
    pub fn from_km(value: f64) -> Self {
        Self(value * KM_TO_M)
    }

    /// Returns the length in meters.
    pub fn to_meters(&self) -> f64 {
        self.0
    }

    /// Converts the length to kilometers.
    pub fn to_km(&self) -> f64 {
        self.0 / KM_TO_M
    }

    /// Converts the length to gigameters.
    pub fn to_gigameters(&self) -> f64 {
        self.0 / GM_TO_M
    }

    /// Magnitude of the length, dropping the sign of hyperbolic axes.
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Raise to integer power (returns dimensionless f64 for dimensional consistency)
    pub fn powi(&self, n: i32) -> f64 {
        self.0.powi(n)
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl Neg for Length {
    type Output = Length;

    fn neg(self) -> Length {
        Length(-self.0)
    }
}

impl Mul<f64> for Length {
    type Output = Length;

    fn mul(self, rhs: f64) -> Length {
        Length(self.0 * rhs)
    }
}

impl Div<f64> for Length {
    type Output = Length;

    fn div(self, rhs: f64) -> Length {
        Length(self.0 / rhs)
    }
}

/// Division of Length by Length returns a dimensionless ratio
impl Div for Length {
    type Output = f64;

    fn div(self, rhs: Self) -> f64 {
        self.0 / rhs.0
    }
}

/// Allow f64 * Length (commutative multiplication)
impl Mul<Length> for f64 {
    type Output = Length;

    fn mul(self, rhs: Length) -> Length {
        rhs * self
    }
}
