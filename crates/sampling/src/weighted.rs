//! Weighted categorical selection.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SamplingError;

/// Labels with non-negative relative weights.
///
/// Weights need not sum to one. Entries with weight zero stay in the table
/// but are never selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedTable<L> {
    entries: Vec<(L, f64)>,
    total: f64,
}

impl<L> WeightedTable<L> {
    /// Build a table, rejecting negative or non-finite weights.
    pub fn new(entries: impl IntoIterator<Item = (L, f64)>) -> Result<Self, SamplingError> {
        let entries: Vec<(L, f64)> = entries.into_iter().collect();
        for (index, (_, weight)) in entries.iter().enumerate() {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(SamplingError::NegativeWeight {
                    index,
                    weight: *weight,
                });
            }
        }
        let total = entries.iter().map(|(_, w)| w).sum();
        Ok(Self { entries, total })
    }

    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            total: 0.0,
        }
    }

    pub fn total_weight(&self) -> f64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&L, f64)> {
        self.entries.iter().map(|(label, weight)| (label, *weight))
    }

    pub fn labels(&self) -> impl Iterator<Item = &L> {
        self.entries.iter().map(|(label, _)| label)
    }

    /// Same weights with each label transformed.
    pub fn try_map<M, E>(
        &self,
        mut f: impl FnMut(&L) -> Result<M, E>,
    ) -> Result<WeightedTable<M>, E> {
        let entries = self
            .entries
            .iter()
            .map(|(label, weight)| Ok((f(label)?, *weight)))
            .collect::<Result<Vec<_>, E>>()?;
        Ok(WeightedTable {
            entries,
            total: self.total,
        })
    }

    /// Draw one label with probability proportional to its weight.
    ///
    /// Fails with `NoValidChoice` when the table is empty or every weight is
    /// zero.
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&L, SamplingError> {
        if !(self.total > 0.0) {
            return Err(SamplingError::NoValidChoice);
        }

        let roll = rng.random::<f64>() * self.total;
        let mut cumulative = 0.0;
        for (label, weight) in &self.entries {
            cumulative += weight;
            if *weight > 0.0 && roll < cumulative {
                return Ok(label);
            }
        }

        // Rounding can leave the roll just past the final bound
        self.entries
            .iter()
            .rev()
            .find(|(_, weight)| *weight > 0.0)
            .map(|(label, _)| label)
            .ok_or(SamplingError::NoValidChoice)
    }
}

impl<L> Default for WeightedTable<L> {
    fn default() -> Self {
        Self::empty()
    }
}
