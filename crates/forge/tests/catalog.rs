use celestial::BodyTable;
use forge::{ConfigurationError, Engine};
use population::{CatalogConfig, ConfigError, DistributionError};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use sampling::SamplingError;

const BODIES: &str = include_str!("../data/kerbol.toml");
const CATALOG: &str = include_str!("../data/catalog.toml");

const CLASSIFICATIONS: &str = r#"
[[classifications]]
name = "stony"
density = 2700
sizes = { A = 1 }
"#;

fn bodies() -> BodyTable {
    BodyTable::from_toml_str(BODIES).unwrap()
}

fn build(text: &str) -> Result<Engine, ConfigurationError> {
    let config = CatalogConfig::from_toml_str(text)?;
    Engine::new(config, &bodies())
}

fn with_population(population: &str) -> String {
    format!("{CLASSIFICATIONS}\n[[populations]]\nname = \"test\"\n{population}")
}

#[test]
fn unknown_central_body_is_rejected() {
    let text = with_population(
        r#"
        central_body = "Eve"
        asteroid_types = { stony = 1 }
        orbit = { size = { distribution = 1e10 } }
        "#,
    );
    assert_eq!(
        build(&text).unwrap_err(),
        ConfigurationError::UnknownBody {
            population: "test".to_string(),
            body: "Eve".to_string(),
        }
    );
}

#[test]
fn unknown_body_in_expression_is_rejected() {
    let text = with_population(
        r#"
        central_body = "Sun"
        asteroid_types = { stony = 1 }
        orbit = { size = { distribution = "Ratio(Moho.sma, 1.0)" } }
        "#,
    );
    assert!(matches!(
        build(&text),
        Err(ConfigurationError::UnknownBody { body, .. }) if body == "Moho"
    ));
}

#[test]
fn undefined_property_fails_at_load() {
    // The root body has no orbit
    let text = with_population(
        r#"
        central_body = "Sun"
        asteroid_types = { stony = 1 }
        orbit = { size = { distribution = "Ratio(Sun.sma, 1.0)" } }
        "#,
    );
    assert!(matches!(
        build(&text),
        Err(ConfigurationError::Element {
            element: "size",
            source: DistributionError::Expression(_),
            ..
        })
    ));
}

#[test]
fn property_of_the_wrong_kind_fails_at_load() {
    let text = with_population(
        r#"
        central_body = "Sun"
        asteroid_types = { stony = 1 }
        orbit = { size = { distribution = 1e10 }, inclination = "Ratio(Kerbin.sma, 1.0)" }
        "#,
    );
    assert!(matches!(
        build(&text),
        Err(ConfigurationError::Element { element: "inclination", .. })
    ));
}

#[test]
fn unknown_reference_plane_is_rejected() {
    let text = with_population(
        r#"
        central_body = "Sun"
        reference_plane = "galactic"
        asteroid_types = { stony = 1 }
        orbit = { size = { distribution = 1e10 } }
        "#,
    );
    assert_eq!(
        build(&text).unwrap_err(),
        ConfigurationError::UnknownReferencePlane("galactic".to_string())
    );
}

#[test]
fn unknown_default_plane_is_rejected() {
    let text = format!("default_plane = \"galactic\"\n{CLASSIFICATIONS}");
    assert_eq!(
        build(&text).unwrap_err(),
        ConfigurationError::UnknownReferencePlane("galactic".to_string())
    );
}

#[test]
fn degenerate_plane_is_rejected() {
    let text = r#"
        [[reference_planes]]
        name = "flat"
        normal = [0, 0, 1]
        reference = [0, 0, 5]
    "#;
    assert!(matches!(
        build(text),
        Err(ConfigurationError::DegenerateReferenceFrame { plane, .. }) if plane == "flat"
    ));
}

#[test]
fn closed_sizing_with_open_eccentricity_is_rejected() {
    let text = with_population(
        r#"
        central_body = "Sun"
        asteroid_types = { stony = 1 }
        orbit = { size = { distribution = 1e10 }, eccentricity = { min = 0.5, max = 1.2 } }
        "#,
    );
    assert!(matches!(
        build(&text),
        Err(ConfigurationError::InvalidOrbitShape { population, .. }) if population == "test"
    ));

    let apoapsis = with_population(
        r#"
        central_body = "Sun"
        asteroid_types = { stony = 1 }
        orbit = { size = { type = "Apoapsis", distribution = 1e10 }, eccentricity = 1.0 }
        "#,
    );
    assert!(matches!(
        build(&apoapsis),
        Err(ConfigurationError::InvalidOrbitShape { .. })
    ));
}

#[test]
fn periapsis_sizing_allows_open_orbits() {
    let text = with_population(
        r#"
        central_body = "Sun"
        asteroid_types = { stony = 1 }
        orbit = { size = { type = "Periapsis", distribution = 1e10 }, eccentricity = { min = 0.9, max = 1.5 } }
        "#,
    );
    assert!(build(&text).is_ok());
}

#[test]
fn unknown_classification_is_rejected() {
    let text = with_population(
        r#"
        central_body = "Sun"
        asteroid_types = { stony = 1, vulcanoid = 2 }
        orbit = { size = { distribution = 1e10 } }
        "#,
    );
    assert_eq!(
        build(&text).unwrap_err(),
        ConfigurationError::UnknownClassification {
            population: "test".to_string(),
            classification: "vulcanoid".to_string(),
        }
    );
}

#[test]
fn duplicate_names_are_rejected() {
    let population = r#"
        [[populations]]
        name = "belt"
        central_body = "Sun"
        asteroid_types = { stony = 1 }
        orbit = { size = { distribution = 1e10 } }
    "#;
    let text = format!("{CLASSIFICATIONS}{population}{population}");
    assert_eq!(
        build(&text).unwrap_err(),
        ConfigurationError::DuplicateName {
            kind: "population",
            name: "belt".to_string(),
        }
    );

    let text = format!("{CLASSIFICATIONS}{CLASSIFICATIONS}");
    assert!(matches!(
        build(&text),
        Err(ConfigurationError::DuplicateName { kind: "classification", .. })
    ));
}

#[test]
fn negative_spawn_rate_is_rejected() {
    let text = with_population(
        r#"
        central_body = "Sun"
        spawn_rate = -1.0
        asteroid_types = { stony = 1 }
        orbit = { size = { distribution = 1e10 } }
        "#,
    );
    assert!(matches!(
        build(&text),
        Err(ConfigurationError::InvalidWeights { owner, .. }) if owner.contains("test")
    ));
}

#[test]
fn intercept_population_takes_no_plane() {
    let text = format!(
        r#"
        [[reference_planes]]
        name = "ecliptic"
        angles = {{ lan = 0, inc = 0, ape = 0 }}
        {}
        reference_plane = "ecliptic"
        asteroid_types = {{ stony = 1 }}
        intercept = {{ target = "Kerbin", approach = 700000, warn_time = 864000, speed = 2000 }}
        "#,
        with_population("")
    );
    assert!(matches!(
        build(&text),
        Err(ConfigurationError::Unsupported { .. })
    ));
}

#[test]
fn unreadable_toml_is_a_load_error() {
    assert!(matches!(
        build("[[populations]]\nname = 3"),
        Err(ConfigurationError::Load(ConfigError::Parse(_)))
    ));
}

#[test]
fn failed_reload_keeps_the_previous_catalog() {
    let bodies = bodies();
    let engine = build(CATALOG).unwrap();
    let names = engine.population_names();
    let weight = engine.total_spawn_weight();

    let broken = with_population(
        r#"
        central_body = "Eve"
        asteroid_types = { stony = 1 }
        orbit = { size = { distribution = 1e10 } }
        "#,
    );
    let result = engine.reload(CatalogConfig::from_toml_str(&broken).unwrap(), &bodies);
    assert!(matches!(result, Err(ConfigurationError::UnknownBody { .. })));

    assert_eq!(engine.population_names(), names);
    assert_eq!(engine.total_spawn_weight(), weight);
    let mut rng = ChaChaRng::seed_from_u64(1);
    assert!(engine.draw_body(&bodies, &mut rng).is_ok());
}

#[test]
fn successful_reload_replaces_the_catalog() {
    let bodies = bodies();
    let engine = build(CATALOG).unwrap();

    let replacement = with_population(
        r#"
        central_body = "Kerbin"
        spawn_rate = 4.0
        asteroid_types = { stony = 1 }
        orbit = { size = { distribution = "Ratio(Mun.sma, 0.5)" } }
        "#,
    );
    engine
        .reload(CatalogConfig::from_toml_str(&replacement).unwrap(), &bodies)
        .unwrap();

    assert_eq!(engine.population_names(), vec!["test"]);
    assert_eq!(engine.total_spawn_weight(), 4.0);
    assert!(engine.resolve_reference_plane("ecliptic").is_err());

    let mut rng = ChaChaRng::seed_from_u64(2);
    let body = engine.draw_body(&bodies, &mut rng).unwrap();
    assert_eq!(body.orbit.central_body, "Kerbin");
    assert_eq!(body.orbit.elements.semi_major_axis.to_meters(), 6_000_000.0);
}

#[test]
fn population_without_asteroid_types_is_rejected() {
    for types in ["", "asteroid_types = { stony = 0 }"] {
        let text = with_population(&format!(
            r#"
            central_body = "Sun"
            {types}
            orbit = {{ size = {{ distribution = 1e10 }} }}
            "#
        ));
        assert_eq!(
            build(&text).unwrap_err(),
            ConfigurationError::InvalidWeights {
                owner: "population `test` asteroid types".to_string(),
                source: SamplingError::NoValidChoice,
            },
            "{types:?}"
        );
    }
}

const UNSIZED: &str = r#"
[[classifications]]
name = "unsized"
density = 1000
"#;

#[test]
fn classification_without_sizes_needs_population_sizes() {
    let text = format!(
        r#"{UNSIZED}
        [[populations]]
        name = "test"
        central_body = "Sun"
        asteroid_types = {{ unsized = 1 }}
        orbit = {{ size = {{ distribution = 1e10 }} }}
        "#
    );
    assert!(matches!(
        build(&text),
        Err(ConfigurationError::InvalidWeights { owner, source: SamplingError::NoValidChoice })
            if owner.contains("`unsized`")
    ));

    let sized = text.replace("asteroid_types", "sizes = { B = 1 }
        asteroid_types");
    let engine = build(&sized).unwrap();
    let mut rng = ChaChaRng::seed_from_u64(3);
    assert_eq!(engine.draw_body(&bodies(), &mut rng).unwrap().size, "B");
}

#[test]
fn zero_sum_population_sizes_are_rejected() {
    let text = with_population(
        r#"
        central_body = "Sun"
        asteroid_types = { stony = 1 }
        sizes = { A = 0, B = 0 }
        orbit = { size = { distribution = 1e10 } }
        "#,
    );
    assert!(matches!(
        build(&text),
        Err(ConfigurationError::InvalidWeights { source: SamplingError::NoValidChoice, .. })
    ));
}

#[test]
fn unsized_classification_with_zero_weight_is_allowed() {
    let text = format!(
        r#"{CLASSIFICATIONS}{UNSIZED}
        [[populations]]
        name = "test"
        central_body = "Sun"
        asteroid_types = {{ stony = 1, unsized = 0 }}
        orbit = {{ size = {{ distribution = 1e10 }} }}
        "#
    );
    let engine = build(&text).unwrap();
    let mut rng = ChaChaRng::seed_from_u64(4);
    for _ in 0..50 {
        assert_eq!(engine.draw_body(&bodies(), &mut rng).unwrap().classification, "stony");
    }
}

#[test]
fn parabolic_population_loads_and_draws() {
    let text = with_population(
        r#"
        central_body = "Sun"
        asteroid_types = { stony = 1 }
        orbit = { size = { type = "Periapsis", distribution = 1e10 }, eccentricity = 1.0 }
        "#,
    );
    let bodies = bodies();
    let engine = build(&text).unwrap();
    let mut rng = ChaChaRng::seed_from_u64(5);
    for _ in 0..20 {
        let elements = engine.draw_body(&bodies, &mut rng).unwrap().orbit.elements;
        assert_eq!(elements.eccentricity, 1.0);
        assert_eq!(elements.periapsis().to_meters(), 1e10);
        elements.validate().unwrap();
    }
}
