use orbit::OrbitalElements;
use units::{Length, Time};

use crate::body::CelestialBody;

#[test]
fn root_body_has_unbounded_soi() {
    let sun = CelestialBody::root("Sun", 1.172_332_8e18, Length::from_meters(261_600_000.0));
    assert!(sun.is_root());
    assert!(sun.orbit.is_none());
    assert!(sun.sphere_of_influence.to_meters().is_infinite());
}

#[test]
fn orbiting_body_records_its_parent() {
    let mun = CelestialBody::orbiting(
        "Mun",
        "Kerbin",
        6.5138e10,
        Length::from_meters(200_000.0),
        Length::from_meters(2_429_559.0),
        OrbitalElements::circular(Length::from_meters(12_000_000.0), Time::zero()),
    );
    assert!(!mun.is_root());
    assert_eq!(mun.parent.as_deref(), Some("Kerbin"));
}
