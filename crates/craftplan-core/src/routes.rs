//! Production routes per result, ranked by efficiency.
//!
//! A route is one recipe considered as a way to obtain its result, annotated
//! with the base-ingredient cost of its two inputs. Efficiency is yield per
//! base unit consumed.

use ahash::AHashMap;
use craftplan_common::{IngredientId, IngredientPair};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;
use tracing::{debug, info};

use crate::catalog::IngredientCatalog;
use crate::cost::{CostError, CostResolver, CostVector};
use crate::recipes::{RecipeOutcome, RecipeTable};

/// Route enumeration error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    /// Both orderings of a pair are registered with different outcomes
    #[error("Asymmetric recipe for {pair}: {canonical} but reversed gives {reversed}")]
    Asymmetric {
        /// Pair in catalog order
        pair: IngredientPair,
        /// Outcome under catalog order
        canonical: RecipeOutcome,
        /// Outcome under reversed order
        reversed: RecipeOutcome,
    },
    /// Nothing produces the requested result
    #[error("Target reward '{0}' not found in recipes")]
    NoRoutes(IngredientId),
    /// Cost resolution failed
    #[error("Cost error: {0}")]
    Cost(#[from] CostError),
}

/// Result type for route operations.
pub type RouteResult<T> = Result<T, RouteError>;

/// One way to obtain a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Inputs, in catalog order.
    pub pair: IngredientPair,
    /// Units of the result produced.
    pub quantity: u32,
    /// Base-ingredient cost of both inputs together.
    pub cost: CostVector,
}

impl Route {
    /// Yield per base unit consumed.
    #[must_use]
    pub fn efficiency(&self) -> f64 {
        let units = self.cost.total();
        if units == 0 {
            return 0.0;
        }
        f64::from(self.quantity) / units as f64
    }

    /// Orders routes from most to least efficient.
    ///
    /// Compares `q1 / c1` against `q2 / c2` by cross-multiplying, so equal
    /// ratios compare equal exactly.
    #[must_use]
    pub fn cmp_efficiency_desc(&self, other: &Self) -> Ordering {
        let lhs = u128::from(self.quantity) * u128::from(other.cost.total());
        let rhs = u128::from(other.quantity) * u128::from(self.cost.total());
        rhs.cmp(&lhs)
    }
}

/// All routes, grouped by result and ranked.
#[derive(Debug, Clone, Default)]
pub struct RouteIndex {
    by_result: AHashMap<IngredientId, Vec<Route>>,
}

impl RouteIndex {
    /// Enumerates every unordered catalog pair once and ranks the routes.
    ///
    /// The catalog-order entry of a pair is consulted first and the reverse
    /// entry fills in when it is missing. Pairs with no recipe are skipped.
    pub fn enumerate(
        catalog: &IngredientCatalog,
        recipes: &RecipeTable,
        resolver: &mut CostResolver<'_>,
    ) -> RouteResult<Self> {
        let mut by_result: AHashMap<IngredientId, Vec<Route>> = AHashMap::new();

        for (first, second) in catalog.canonical_pairs() {
            let Some(outcome) = Self::symmetric_outcome(recipes, first, second)? else {
                continue;
            };

            let cost = resolver.pair_cost(first, second)?;
            by_result
                .entry(outcome.result.clone())
                .or_default()
                .push(Route {
                    pair: IngredientPair::new(first.clone(), second.clone()),
                    quantity: outcome.quantity,
                    cost,
                });
        }

        for (result, routes) in &mut by_result {
            // Stable: ties keep enumeration order.
            routes.sort_by(Route::cmp_efficiency_desc);
            debug!("{} route(s) to {}", routes.len(), result);
        }

        info!("Enumerated routes for {} result(s)", by_result.len());
        Ok(Self { by_result })
    }

    fn symmetric_outcome<'r>(
        recipes: &'r RecipeTable,
        first: &IngredientId,
        second: &IngredientId,
    ) -> RouteResult<Option<&'r RecipeOutcome>> {
        let canonical = recipes.lookup(first, second);
        if first == second {
            return Ok(canonical);
        }
        let reversed = recipes.lookup(second, first);

        match (canonical, reversed) {
            (Some(canonical), Some(reversed)) if canonical != reversed => {
                Err(RouteError::Asymmetric {
                    pair: IngredientPair::new(first.clone(), second.clone()),
                    canonical: canonical.clone(),
                    reversed: reversed.clone(),
                })
            },
            (Some(outcome), _) | (None, Some(outcome)) => Ok(Some(outcome)),
            (None, None) => Ok(None),
        }
    }

    /// Ranked routes to `result`, most efficient first.
    pub fn routes_for(&self, result: &IngredientId) -> RouteResult<&[Route]> {
        self.by_result
            .get(result)
            .map(Vec::as_slice)
            .ok_or_else(|| RouteError::NoRoutes(result.clone()))
    }

    /// Returns true if any recipe produces `result`.
    #[must_use]
    pub fn contains(&self, result: &IngredientId) -> bool {
        self.by_result.contains_key(result)
    }

    /// All results in identifier order.
    #[must_use]
    pub fn results(&self) -> Vec<&IngredientId> {
        let mut results: Vec<_> = self.by_result.keys().collect();
        results.sort();
        results
    }

    /// Returns the number of distinct results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_result.len()
    }

    /// Returns true if no route was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_result.is_empty()
    }
}
