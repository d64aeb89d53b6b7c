//! The engine that hosts call to draw new bodies.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use celestial::BodyTable;
use nalgebra::Rotation3;
use population::{CatalogConfig, PopulationKind};
use rand::Rng;
use tracing::{debug, info};
use units::Density;
use uuid::{Builder, Uuid};

use crate::assembler::draw_orbit;
use crate::body::DrawnBody;
use crate::catalog::{Catalog, PreparedPopulation};
use crate::classify::classify;
use crate::error::{ConfigurationError, DrawError};
use crate::intercept::draw_intercept;

/// Draws orbits and classifications from a validated catalog.
///
/// The catalog is immutable once built. [`Engine::reload`] validates a new
/// configuration completely before swapping it in, so a draw always sees
/// either the old catalog or the new one.
///
/// # Example
/// ```
/// use celestial::BodyTable;
/// use forge::Engine;
/// use population::CatalogConfig;
/// use rand::SeedableRng;
/// use rand_chacha::ChaChaRng;
///
/// let bodies = BodyTable::from_toml_str(r#"
///     [[bodies]]
///     name = "Sun"
///     mu = 1.1723328e18
///     radius = 261600000
/// "#).unwrap();
///
/// let config = CatalogConfig::from_toml_str(r#"
///     [[classifications]]
///     name = "stony"
///     density = 2700
///     sizes = { A = 1 }
///
///     [[populations]]
///     name = "belt"
///     central_body = "Sun"
///     asteroid_types = { stony = 1 }
///     orbit = { size = { distribution = { type = "LogUniform", min = 1e10, max = 5e10 } } }
/// "#).unwrap();
///
/// let engine = Engine::new(config, &bodies).unwrap();
/// let mut rng = ChaChaRng::seed_from_u64(42);
/// let body = engine.draw_body(&bodies, &mut rng).unwrap();
///
/// assert_eq!(body.population, "belt");
/// assert_eq!(body.orbit.central_body, "Sun");
/// ```
#[derive(Debug)]
pub struct Engine {
    catalog: RwLock<Arc<Catalog>>,
}

impl Engine {
    /// Validate `config` against `bodies` and build an engine.
    pub fn new(config: CatalogConfig, bodies: &BodyTable) -> Result<Self, ConfigurationError> {
        let catalog = Catalog::build(config, bodies)?;
        log_loaded("Loaded catalog", &catalog);
        Ok(Self {
            catalog: RwLock::new(Arc::new(catalog)),
        })
    }

    /// Replace the catalog. On error the current catalog stays in place.
    pub fn reload(&self, config: CatalogConfig, bodies: &BodyTable) -> Result<(), ConfigurationError> {
        let catalog = Arc::new(Catalog::build(config, bodies)?);
        log_loaded("Reloaded catalog", &catalog);
        *self
            .catalog
            .write()
            .unwrap_or_else(PoisonError::into_inner) = catalog;
        Ok(())
    }

    fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Sum of all population spawn rates.
    pub fn total_spawn_weight(&self) -> f64 {
        self.catalog().spawn_table.total_weight()
    }

    pub fn population_names(&self) -> Vec<String> {
        self.catalog()
            .populations
            .iter()
            .map(|p| p.definition.name.clone())
            .collect()
    }

    /// Rotation from the named plane into the base frame.
    pub fn resolve_reference_plane(&self, name: &str) -> Result<Rotation3<f64>, DrawError> {
        self.catalog()
            .planes
            .get(name)
            .map(|plane| *plane.rotation())
            .ok_or_else(|| DrawError::UnknownReferencePlane(name.to_string()))
    }

    /// Draw one body: pick a population by spawn rate, then draw its orbit
    /// and classification.
    pub fn draw_body<R: Rng + ?Sized>(
        &self,
        bodies: &BodyTable,
        rng: &mut R,
    ) -> Result<DrawnBody, DrawError> {
        let catalog = self.catalog();
        let index = *catalog
            .spawn_table
            .select(rng)
            .map_err(|_| DrawError::NoPopulationsConfigured)?;
        draw_from(&catalog, &catalog.populations[index], bodies, rng)
    }

    /// Draw one body from the named population, ignoring spawn rates.
    pub fn draw_from_population<R: Rng + ?Sized>(
        &self,
        name: &str,
        bodies: &BodyTable,
        rng: &mut R,
    ) -> Result<DrawnBody, DrawError> {
        let catalog = self.catalog();
        let population = catalog
            .population(name)
            .ok_or_else(|| DrawError::UnknownPopulation(name.to_string()))?;
        draw_from(&catalog, population, bodies, rng)
    }

    /// [`draw_body`](Self::draw_body) with an RNG shared between threads.
    /// The lock is held for exactly one draw.
    pub fn draw_body_shared<R: Rng>(
        &self,
        bodies: &BodyTable,
        rng: &Mutex<R>,
    ) -> Result<DrawnBody, DrawError> {
        let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
        self.draw_body(bodies, &mut *rng)
    }
}

fn draw_from<R: Rng + ?Sized>(
    catalog: &Catalog,
    population: &PreparedPopulation,
    bodies: &BodyTable,
    rng: &mut R,
) -> Result<DrawnBody, DrawError> {
    let definition = &population.definition;

    let orbit = match &definition.kind {
        PopulationKind::Orbital {
            central_body,
            elements,
        } => draw_orbit(
            &definition.name,
            central_body,
            elements,
            &population.plane,
            bodies,
            rng,
        )?,
        PopulationKind::Intercept(spec) => draw_intercept(&definition.name, spec, bodies, rng)?,
    };

    let (classification, size) = classify(catalog, population, rng)?;

    let id: Uuid = Builder::from_random_bytes(rng.random()).into_uuid();

    debug!(
        %id,
        population = %definition.name,
        classification = %classification.definition.name,
        size = %size,
        "Drew body"
    );

    Ok(DrawnBody {
        id,
        population: definition.name.clone(),
        population_title: definition.title.clone(),
        orbit,
        classification: classification.definition.name.clone(),
        classification_title: classification.definition.display_title().to_string(),
        density: Density::from_kg_per_m3(classification.definition.density),
        experiments: classification.definition.experiments.clone(),
        size,
        detectability: definition.detectability.clone(),
    })
}

fn log_loaded(message: &str, catalog: &Catalog) {
    info!(
        populations = catalog.populations.len(),
        classifications = catalog.classifications.len(),
        planes = catalog.planes.len(),
        total_spawn_weight = catalog.spawn_table.total_weight(),
        "{message}"
    );
}
