use sampling::SamplingError;

use crate::{
    Detectability, DistributionSpec, EpochType, OrbitSpec, PhaseType, Population,
    PopulationKind, SizeSpec, SizeType, Weights,
};

fn parse(text: &str) -> Result<Population, toml::de::Error> {
    toml::from_str(text)
}

#[test]
fn orbit_defaults_fill_missing_elements() {
    let population = parse(
        r#"
        name = "belt"
        central_body = "Sun"

        [orbit]
        size = { distribution = 1e10 }
        "#,
    )
    .unwrap();

    assert_eq!(population.title, "belt");
    assert_eq!(population.spawn_rate, 1.0);
    let PopulationKind::Orbital {
        central_body,
        elements,
    } = &population.kind
    else {
        panic!("expected an orbital population");
    };
    assert_eq!(central_body, "Sun");
    assert_eq!(
        elements,
        &OrbitSpec::with_size(SizeSpec::new(
            SizeType::SemimajorAxis,
            DistributionSpec::constant(1e10)
        ))
    );
    assert_eq!(elements.eccentricity, DistributionSpec::constant(0.0));
    assert_eq!(elements.ascending_node, DistributionSpec::uniform(0.0, 360.0));
    assert_eq!(elements.phase.kind, PhaseType::MeanAnomaly);
    assert_eq!(elements.phase.epoch, EpochType::GameStart);
}

#[test]
fn explicit_elements_parse() {
    let population = parse(
        r#"
        name = "trojans"
        title = "Jool trojan"
        central_body = "Sun"
        spawn_rate = 0.5
        reference_plane = "jool_plane"
        asteroid_types = { carbonaceous = 3, stony = 1 }
        sizes = { A = 1, E = 0.1 }
        detectability = { conditions = ["tracking_station_3"] }

        [orbit]
        size = { type = "SemimajorAxis", distribution = "Ratio(Jool.sma, 1)" }
        eccentricity = { type = "Rayleigh", avg = 0.05 }
        phase = { type = "MeanLongitude", epoch = "Now", distribution = { min = "Offset(Jool.mnl, 50)", max = "Offset(Jool.mnl, 70)" } }
        "#,
    )
    .unwrap();

    assert_eq!(population.title, "Jool trojan");
    assert_eq!(population.reference_plane.as_deref(), Some("jool_plane"));
    assert_eq!(
        population.asteroid_types.labels().collect::<Vec<_>>(),
        vec!["carbonaceous", "stony"]
    );
    assert_eq!(population.referenced_bodies(), vec!["Sun", "Jool", "Jool", "Jool", "Jool"]);

    let PopulationKind::Orbital { elements, .. } = &population.kind else {
        panic!("expected an orbital population");
    };
    assert_eq!(elements.phase.kind, PhaseType::MeanLongitude);
    assert_eq!(elements.phase.epoch, EpochType::Now);
}

#[test]
fn intercept_population_parses() {
    let population = parse(
        r#"
        name = "impactors"
        spawn_rate = 0.1

        [intercept]
        target = "Kerbin"
        approach = { type = "Uniform", min = 0, max = "Ratio(Kerbin.rad, 5)" }
        warn_time = { type = "Uniform", min = 864000, max = 2592000 }
        speed = { type = "LogNormal", avg = 8000, stddev = 2000 }
        "#,
    )
    .unwrap();

    let PopulationKind::Intercept(spec) = &population.kind else {
        panic!("expected an intercept population");
    };
    assert_eq!(spec.target, "Kerbin");
    assert_eq!(population.referenced_bodies(), vec!["Kerbin", "Kerbin"]);
}

#[test]
fn population_needs_exactly_one_kind() {
    assert!(parse(r#"name = "empty""#).is_err());
    assert!(parse(
        r#"
        name = "both"
        central_body = "Sun"
        orbit = { size = { distribution = 1 } }
        intercept = { target = "Kerbin", approach = 1, warn_time = 1, speed = 1 }
        "#
    )
    .is_err());
    assert!(parse(
        r#"
        name = "no_center"
        orbit = { size = { distribution = 1 } }
        "#
    )
    .is_err());
}

#[test]
fn size_element_is_required() {
    assert!(parse(
        r#"
        name = "sizeless"
        central_body = "Sun"
        orbit = { eccentricity = 0.1 }
        "#
    )
    .is_err());
}

#[test]
fn unknown_keys_are_rejected() {
    assert!(parse(
        r#"
        name = "typo"
        central_body = "Sun"
        spawnrate = 2
        orbit = { size = { distribution = 1 } }
        "#
    )
    .is_err());
}

#[test]
fn weights_convert_to_tables() {
    let weights: Weights = [("a", 1.0), ("b", 2.0)].into_iter().collect();
    assert_eq!(weights.to_table().unwrap().total_weight(), 3.0);

    let negative: Weights = [("a", -1.0)].into_iter().collect();
    assert!(matches!(
        negative.to_table(),
        Err(SamplingError::NegativeWeight { .. })
    ));
}

#[test]
fn detectability_requires_every_condition() {
    let rule = Detectability {
        conditions: vec!["radar".to_string(), "optical".to_string()],
    };
    assert!(rule.is_satisfied(|_| true));
    assert!(!rule.is_satisfied(|c| c == "radar"));
    assert!(Detectability::default().is_satisfied(|_| false));
}

#[test]
fn builders_set_optional_fields() {
    let population = Population::orbital(
        "belt",
        "Sun",
        2.0,
        OrbitSpec::with_size(SizeSpec::new(SizeType::Periapsis, DistributionSpec::constant(1.0))),
    )
    .with_reference_plane("ecliptic")
    .with_sizes([("A", 1.0)].into_iter().collect());

    assert_eq!(population.reference_plane.as_deref(), Some("ecliptic"));
    assert!(!population.sizes.is_empty());
    assert!(population.asteroid_types.is_empty());
}
