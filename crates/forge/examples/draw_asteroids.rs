//! Draw a batch of bodies from the sample Kerbol catalog as CSV
//!
//! Usage: cargo run -p forge --example draw_asteroids -- [count] [seed]
//!
//! Set RUST_LOG=forge=debug to see each draw.

use std::collections::BTreeMap;

use celestial::BodyTable;
use forge::Engine;
use population::CatalogConfig;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use tracing_subscriber::EnvFilter;

const BODIES: &str = include_str!("../data/kerbol.toml");
const CATALOG: &str = include_str!("../data/catalog.toml");

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let count: usize = args.next().map(|s| s.parse()).transpose()?.unwrap_or(20);
    let seed: u64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(42);

    let bodies = BodyTable::from_toml_str(BODIES)?;
    let engine = Engine::new(CatalogConfig::from_toml_str(CATALOG)?, &bodies)?;
    let mut rng = ChaChaRng::seed_from_u64(seed);

    println!("id,population,central_body,sma_gm,ecc,inc_deg,classification,size");

    let mut tally = BTreeMap::new();
    for _ in 0..count {
        let body = engine.draw_body(&bodies, &mut rng)?;
        let elements = &body.orbit.elements;
        println!(
            "{},{},{},{:.4},{:.4},{:.2},{},{}",
            body.id,
            body.population,
            body.orbit.central_body,
            elements.semi_major_axis.to_gigameters(),
            elements.eccentricity,
            elements.inclination.to_degrees(),
            body.classification,
            body.size,
        );
        *tally.entry(body.population).or_insert(0) += 1;
    }

    for (population, n) in &tally {
        eprintln!("{population}: {n}");
    }
    eprintln!("Drew {count} bodies with seed {seed}");
    Ok(())
}
