use crate::{CatalogConfig, ConfigError, PlaneOrientation, PopulationKind};

const CATALOG: &str = r#"
default_plane = "ecliptic"

[[reference_planes]]
name = "ecliptic"
angles = { lan = 0, inc = 0, ape = 0 }

[[classifications]]
name = "stony"
title = "Stony asteroid"
density = 2700
experiments = ["surface_sample"]
sizes = { A = 1, B = 2 }

[[classifications]]
name = "icy"
density = 900

[[populations]]
name = "belt"
central_body = "Sun"
spawn_rate = 2.0
asteroid_types = { stony = 1 }

[populations.orbit]
size = { type = "Periapsis", distribution = { type = "LogUniform", min = "Ratio(Dres.sma, 0.9)", max = "Resonance(Jool, 1:2)" } }
eccentricity = { type = "Rayleigh", avg = 0.1 }

[[populations]]
name = "impactors"
spawn_rate = 0.0
asteroid_types = { icy = 1 }
intercept = { target = "Kerbin", approach = 6e5, warn_time = 864000, speed = 5000 }
"#;

#[test]
fn parses_a_full_catalog() {
    let config = CatalogConfig::from_toml_str(CATALOG).unwrap();

    assert_eq!(config.default_plane.as_deref(), Some("ecliptic"));
    assert_eq!(config.populations.len(), 2);
    assert_eq!(config.classifications.len(), 2);
    assert!(matches!(
        config.reference_plane("ecliptic").map(|p| &p.orientation),
        Some(PlaneOrientation::Angles { .. })
    ));

    let belt = config.population("belt").unwrap();
    assert!(matches!(belt.kind, PopulationKind::Orbital { .. }));
    let impactors = config.population("impactors").unwrap();
    assert!(matches!(impactors.kind, PopulationKind::Intercept(_)));
    assert_eq!(impactors.spawn_rate, 0.0);

    let icy = config.classification("icy").unwrap();
    assert_eq!(icy.display_title(), "icy");
    assert!(icy.experiments.is_empty());
    assert_eq!(config.classification("stony").unwrap().display_title(), "Stony asteroid");
}

#[test]
fn empty_document_is_an_empty_catalog() {
    assert_eq!(CatalogConfig::from_toml_str("").unwrap(), CatalogConfig::default());
}

#[test]
fn syntax_errors_are_parse_errors() {
    assert!(matches!(
        CatalogConfig::from_toml_str("[[populations]\nname ="),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn malformed_expressions_fail_the_load() {
    let text = CATALOG.replace("Resonance(Jool, 1:2)", "Resonance(Jool, 1:0)");
    let err = CatalogConfig::from_toml_str(&text).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    assert!(matches!(
        CatalogConfig::from_path("/nonexistent/catalog.toml"),
        Err(ConfigError::Io { .. })
    ));
}

#[test]
fn loads_from_disk() {
    let path = std::env::temp_dir().join(format!("catalog-{}.toml", std::process::id()));
    std::fs::write(&path, CATALOG).unwrap();
    let config = CatalogConfig::from_path(&path);
    std::fs::remove_file(&path).unwrap();
    assert_eq!(config.unwrap().populations.len(), 2);
}
