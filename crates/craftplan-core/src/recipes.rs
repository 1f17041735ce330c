//! Recipe table: ordered ingredient pairs mapped to combination outcomes.
//!
//! This module provides:
//! - The outcome of a two-input combination (yield and result)
//! - The recipe table keyed by ordered pair, remembering registration order
//! - Lookup of the outcome for an unordered pair across both orderings

use ahash::AHashMap;
use craftplan_common::{IngredientId, IngredientPair};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Recipe table error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecipeError {
    /// Ordered pair already has a recipe
    #[error("Recipe for {0} already exists")]
    Duplicate(IngredientPair),
    /// Yield must be positive
    #[error("Recipe for {0} has zero yield")]
    ZeroYield(IngredientPair),
}

/// Result type for recipe table operations.
pub type RecipeResult<T> = Result<T, RecipeError>;

/// What a combination produces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipeOutcome {
    /// Units produced per combination.
    pub quantity: u32,
    /// Produced ingredient or reward.
    pub result: IngredientId,
}

impl RecipeOutcome {
    /// Creates a new outcome.
    #[must_use]
    pub fn new(quantity: u32, result: impl Into<IngredientId>) -> Self {
        Self {
            quantity,
            result: result.into(),
        }
    }

    /// Creates an outcome yielding a single unit.
    #[must_use]
    pub fn one(result: impl Into<IngredientId>) -> Self {
        Self::new(1, result)
    }
}

impl fmt::Display for RecipeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.quantity, self.result)
    }
}

/// All known combinations.
#[derive(Debug, Clone, Default)]
pub struct RecipeTable {
    /// Outcomes by ordered pair
    entries: AHashMap<IngredientPair, RecipeOutcome>,
    /// Pairs in registration order
    order: Vec<IngredientPair>,
}

impl RecipeTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the outcome of combining `pair.first` with `pair.second`.
    pub fn register(&mut self, pair: IngredientPair, outcome: RecipeOutcome) -> RecipeResult<()> {
        if outcome.quantity == 0 {
            return Err(RecipeError::ZeroYield(pair));
        }
        if self.entries.contains_key(&pair) {
            return Err(RecipeError::Duplicate(pair));
        }

        debug!("Adding recipe: {} => [{}] x {}", pair, outcome.quantity, outcome.result);
        self.order.push(pair.clone());
        self.entries.insert(pair, outcome);
        Ok(())
    }

    /// Gets the outcome registered under exactly this ordered pair.
    #[must_use]
    pub fn get(&self, pair: &IngredientPair) -> Option<&RecipeOutcome> {
        self.entries.get(pair)
    }

    /// Gets the outcome for `(first, second)` without building a pair.
    #[must_use]
    pub fn lookup(&self, first: &IngredientId, second: &IngredientId) -> Option<&RecipeOutcome> {
        self.entries.get(&IngredientPair::new(first.clone(), second.clone()))
    }

    /// Returns the number of registered recipes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no recipe is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates recipes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&IngredientPair, &RecipeOutcome)> {
        self.order
            .iter()
            .filter_map(|pair| self.entries.get(pair).map(|outcome| (pair, outcome)))
    }
}
