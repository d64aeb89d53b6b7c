mod tests {
    use approx::assert_relative_eq;

    use crate::velocity::{circular_orbital_velocity, Velocity};

    #[test]
    fn test_velocity_in_meters_per_second() {
        let v = Velocity::from_meters_per_sec(712.4);
        assert_relative_eq!(v.to_meters_per_sec(), 712.4);
        assert!(Velocity::default() < v);
    }

    #[test]
    fn test_circular_orbital_velocity() {
        // Kerbin around Kerbol: μ = 1.1723328e18, a = 13.6 Gm, v ≈ 9.28 km/s
        let kerbin_v = circular_orbital_velocity(1.172_332_8e18, 13_599_840_256.0);
        assert_relative_eq!(kerbin_v, 9_284.5, epsilon = 1.0);

        // Speed falls off as r^-1/2
        let inner = circular_orbital_velocity(1.0, 1.0);
        let outer = circular_orbital_velocity(1.0, 4.0);
        assert_relative_eq!(inner / outer, 2.0);
    }
}
