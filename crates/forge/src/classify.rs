//! Classification and size-category draws.

use rand::Rng;

use crate::catalog::{Catalog, PreparedClassification, PreparedPopulation};
use crate::error::DrawError;

/// Pick an asteroid type from the population's weights, then a size
/// category from the population's sizes or, when it lists none, the
/// classification's.
pub(crate) fn classify<'a, R: Rng + ?Sized>(
    catalog: &'a Catalog,
    population: &PreparedPopulation,
    rng: &mut R,
) -> Result<(&'a PreparedClassification, String), DrawError> {
    let name = &population.definition.name;
    let no_choice = |choice| DrawError::NoValidChoice {
        population: name.clone(),
        choice,
    };

    let type_name = population
        .asteroid_types
        .select(rng)
        .map_err(|_| no_choice("asteroid type"))?;
    // Names were checked against the catalog at load
    let classification = catalog
        .classifications
        .get(type_name)
        .ok_or_else(|| no_choice("asteroid type"))?;

    let sizes = if population.sizes.is_empty() {
        &classification.sizes
    } else {
        &population.sizes
    };
    let size = sizes.select(rng).map_err(|_| no_choice("size"))?;

    Ok((classification, size.clone()))
}
