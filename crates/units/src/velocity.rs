use serde::{Deserialize, Serialize};

/// Circular orbital speed at `radius_m` around a body with gravitational
/// parameter `mu` (m³/s²), in m/s.
///
/// # Examples
/// ```
/// use units::velocity::circular_orbital_velocity;
///
/// // Low Earth orbit: ~7.7 km/s
/// let v = circular_orbital_velocity(3.986_004_418e14, 6.771e6);
/// assert!((v - 7_672.0).abs() < 10.0);
/// ```
pub fn circular_orbital_velocity(mu: f64, radius_m: f64) -> f64 {
    (mu / radius_m).sqrt()
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Velocity(f64); // Base unit: m/s

impl Velocity {
    pub fn from_meters_per_sec(value: f64) -> Self {
        Self(value)
    }

    pub fn to_meters_per_sec(&self) -> f64 {
        self.0
    }
}
