//! Base-ingredient cost resolution.
//!
//! Every ingredient decomposes into a count of base ingredients. The resolver
//! memoizes each vector for its own lifetime; later requests are lookups.

use ahash::{AHashMap, AHashSet};
use craftplan_common::IngredientId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use tracing::trace;

use crate::creation::CreationGraph;

/// Cost resolution error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CostError {
    /// Ingredient reached again while its own cost was being resolved
    #[error("Cyclic production while resolving cost of {0}")]
    Cycle(IngredientId),
}

/// Result type for cost resolution.
pub type CostResult<T> = Result<T, CostError>;

/// Base ingredient → units needed for one unit of some ingredient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostVector {
    units: BTreeMap<IngredientId, u64>,
}

impl CostVector {
    /// Cost of a base ingredient: one unit of itself.
    #[must_use]
    pub fn unit(ingredient: IngredientId) -> Self {
        let mut units = BTreeMap::new();
        units.insert(ingredient, 1);
        Self { units }
    }

    /// Adds every count of `other` into `self`, summing shared keys.
    pub fn merge(&mut self, other: &Self) {
        for (ingredient, count) in &other.units {
            *self.units.entry(ingredient.clone()).or_insert(0) += count;
        }
    }

    /// Returns the per-key sum of two vectors.
    #[must_use]
    pub fn combined(a: &Self, b: &Self) -> Self {
        let mut result = a.clone();
        result.merge(b);
        result
    }

    /// Units of a base ingredient (0 when absent).
    #[must_use]
    pub fn get(&self, ingredient: &IngredientId) -> u64 {
        self.units.get(ingredient).copied().unwrap_or(0)
    }

    /// Total base units across all keys.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.units.values().sum()
    }

    /// Number of distinct base ingredients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns true if the vector has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Iterates `(base ingredient, units)` in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&IngredientId, u64)> {
        self.units.iter().map(|(id, &count)| (id, count))
    }
}

impl fmt::Display for CostVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (ingredient, count) in &self.units {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{count} x {ingredient}")?;
            first = false;
        }
        Ok(())
    }
}

/// Memoizing cost resolver over a creation graph.
#[derive(Debug)]
pub struct CostResolver<'g> {
    graph: &'g CreationGraph,
    /// Resolved vectors by ingredient
    memo: AHashMap<IngredientId, CostVector>,
    /// Ingredients currently on the resolution stack
    in_progress: AHashSet<IngredientId>,
    /// Number of vectors actually computed
    resolutions: usize,
}

impl<'g> CostResolver<'g> {
    /// Creates a resolver with an empty memo.
    #[must_use]
    pub fn new(graph: &'g CreationGraph) -> Self {
        Self {
            graph,
            memo: AHashMap::new(),
            in_progress: AHashSet::new(),
            resolutions: 0,
        }
    }

    /// Returns the creation graph this resolver decomposes over.
    #[must_use]
    pub fn graph(&self) -> &'g CreationGraph {
        self.graph
    }

    /// Resolves the base-ingredient cost of one unit of `ingredient`.
    pub fn cost(&mut self, ingredient: &IngredientId) -> CostResult<CostVector> {
        if let Some(cached) = self.memo.get(ingredient) {
            return Ok(cached.clone());
        }

        let graph = self.graph;
        let vector = match graph.inputs(ingredient) {
            None => CostVector::unit(ingredient.clone()),
            Some(pair) => {
                if !self.in_progress.insert(ingredient.clone()) {
                    return Err(CostError::Cycle(ingredient.clone()));
                }
                let left = self.cost(&pair.first);
                let right = left.and_then(|left| self.cost(&pair.second).map(|right| (left, right)));
                self.in_progress.remove(ingredient);
                let (left, right) = right?;
                CostVector::combined(&left, &right)
            },
        };

        trace!("Cost to create {}: {}", ingredient, vector);
        self.resolutions += 1;
        self.memo.insert(ingredient.clone(), vector.clone());
        Ok(vector)
    }

    /// Resolves the combined cost of one unit of each input.
    pub fn pair_cost(&mut self, first: &IngredientId, second: &IngredientId) -> CostResult<CostVector> {
        let left = self.cost(first)?;
        let right = self.cost(second)?;
        Ok(CostVector::combined(&left, &right))
    }

    /// Returns a memoized vector without resolving.
    #[must_use]
    pub fn cached(&self, ingredient: &IngredientId) -> Option<&CostVector> {
        self.memo.get(ingredient)
    }

    /// Number of vectors computed so far (cache hits are not counted).
    #[must_use]
    pub const fn resolutions(&self) -> usize {
        self.resolutions
    }
}
