//! Creation graph: which input pair produces each composite ingredient.
//!
//! Built once from the catalog and recipe table. Ambiguous production and
//! cyclic dependencies are rejected here, before any cost is resolved.

use ahash::AHashMap;
use craftplan_common::{IngredientId, IngredientPair};
use thiserror::Error;
use tracing::{debug, info};

use crate::catalog::IngredientCatalog;
use crate::recipes::RecipeTable;

/// Creation graph error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CreationError {
    /// Ingredient producible by two different input pairs
    #[error("Conflict: ingredient {result} can be created by both {existing} and {conflicting}")]
    Conflict {
        /// Composite ingredient
        result: IngredientId,
        /// Pair registered first
        existing: IngredientPair,
        /// Pair that disagrees with it
        conflicting: IngredientPair,
    },
    /// Recipe input not present in the catalog
    #[error("Recipe {0} uses an ingredient that is not in the catalog")]
    UnknownInput(IngredientPair),
    /// Ingredient depends on itself
    #[error("Cyclic production: {}", format_cycle(.0))]
    Cycle(Vec<IngredientId>),
}

fn format_cycle(path: &[IngredientId]) -> String {
    path.iter()
        .map(IngredientId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Result type for creation graph construction.
pub type CreationResult<T> = Result<T, CreationError>;

/// DFS marks for cycle detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// Producing pair for every composite ingredient.
#[derive(Debug, Clone, Default)]
pub struct CreationGraph {
    /// Inputs by composite ingredient
    entries: AHashMap<IngredientId, IngredientPair>,
    /// Composites in catalog order
    composites: Vec<IngredientId>,
}

impl CreationGraph {
    /// Builds the graph from every recipe whose result is a catalog ingredient.
    pub fn build(catalog: &IngredientCatalog, recipes: &RecipeTable) -> CreationResult<Self> {
        let mut entries: AHashMap<IngredientId, IngredientPair> = AHashMap::new();

        for (pair, outcome) in recipes.iter() {
            if !catalog.contains(&pair.first) || !catalog.contains(&pair.second) {
                return Err(CreationError::UnknownInput(pair.clone()));
            }
            if !catalog.contains(&outcome.result) {
                continue;
            }

            if let Some(existing) = entries.get(&outcome.result) {
                if !existing.same_inputs(pair) {
                    return Err(CreationError::Conflict {
                        result: outcome.result.clone(),
                        existing: existing.clone(),
                        conflicting: pair.clone(),
                    });
                }
            }
            // Latest matching ordering wins.
            debug!("Adding creation recipe for {}: {}", outcome.result, pair);
            entries.insert(outcome.result.clone(), pair.clone());
        }

        let composites = catalog
            .iter()
            .filter(|ingredient| entries.contains_key(*ingredient))
            .cloned()
            .collect();

        let graph = Self {
            entries,
            composites,
        };
        graph.check_acyclic()?;

        info!(
            "Creation graph built: {} composite of {} ingredients",
            graph.composites.len(),
            catalog.len()
        );
        Ok(graph)
    }

    /// Builds a graph from raw entries without conflict or cycle checks.
    #[cfg(test)]
    pub(crate) fn from_entries_unchecked<'a>(
        entries: impl IntoIterator<Item = (&'a str, &'a str, &'a str)>,
    ) -> Self {
        let mut graph = Self::default();
        for (result, first, second) in entries {
            graph.composites.push(result.into());
            graph.entries.insert(result.into(), IngredientPair::new(first, second));
        }
        graph
    }

    /// Returns the producing pair of a composite ingredient.
    #[must_use]
    pub fn inputs(&self, ingredient: &IngredientId) -> Option<&IngredientPair> {
        self.entries.get(ingredient)
    }

    /// Returns true if the ingredient has a producing pair.
    #[must_use]
    pub fn is_composite(&self, ingredient: &IngredientId) -> bool {
        self.entries.contains_key(ingredient)
    }

    /// Composite ingredients in catalog order.
    #[must_use]
    pub fn composites(&self) -> &[IngredientId] {
        &self.composites
    }

    /// Returns the number of composite ingredients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if every ingredient is base.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check_acyclic(&self) -> CreationResult<()> {
        let mut marks: AHashMap<&IngredientId, Mark> = AHashMap::new();
        let mut path = Vec::new();
        for ingredient in &self.composites {
            self.visit(ingredient, &mut marks, &mut path)?;
        }
        Ok(())
    }

    fn visit<'a>(
        &'a self,
        ingredient: &'a IngredientId,
        marks: &mut AHashMap<&'a IngredientId, Mark>,
        path: &mut Vec<&'a IngredientId>,
    ) -> CreationResult<()> {
        match marks.get(ingredient) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::InProgress) => {
                let start = path.iter().position(|p| *p == ingredient).unwrap_or(0);
                let mut cycle: Vec<IngredientId> =
                    path[start..].iter().map(|p| (*p).clone()).collect();
                cycle.push(ingredient.clone());
                return Err(CreationError::Cycle(cycle));
            },
            None => {},
        }

        let Some(pair) = self.entries.get(ingredient) else {
            marks.insert(ingredient, Mark::Done);
            return Ok(());
        };

        marks.insert(ingredient, Mark::InProgress);
        path.push(ingredient);
        self.visit(&pair.first, marks, path)?;
        self.visit(&pair.second, marks, path)?;
        path.pop();
        marks.insert(ingredient, Mark::Done);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipes::RecipeOutcome;

    fn setup(names: &[&str], recipes: &[(&str, &str, u32, &str)]) -> (IngredientCatalog, RecipeTable) {
        let catalog = IngredientCatalog::from_ingredients(names.iter().copied()).expect("catalog");
        let mut table = RecipeTable::new();
        for (a, b, quantity, result) in recipes {
            table
                .register(IngredientPair::new(*a, *b), RecipeOutcome::new(*quantity, *result))
                .expect("register");
        }
        (catalog, table)
    }

    #[test]
    fn test_build_records_catalog_results_only() {
        let (catalog, table) = setup(
            &["A", "B", "C"],
            &[("A", "B", 1, "C"), ("A", "A", 3, "Wildcards")],
        );
        let graph = CreationGraph::build(&catalog, &table).expect("graph");

        assert_eq!(graph.len(), 1);
        assert_eq!(graph.inputs(&"C".into()), Some(&IngredientPair::new("A", "B")));
        assert!(!graph.is_composite(&"A".into()));
        assert!(!graph.is_composite(&"Wildcards".into()));
        assert_eq!(graph.composites(), &[IngredientId::from("C")]);
    }

    #[test]
    fn test_reverse_pair_is_not_a_conflict() {
        let (catalog, table) = setup(&["A", "B", "C"], &[("A", "B", 1, "C"), ("B", "A", 1, "C")]);
        let graph = CreationGraph::build(&catalog, &table).expect("graph");

        assert_eq!(graph.len(), 1);
        assert_eq!(graph.inputs(&"C".into()), Some(&IngredientPair::new("B", "A")));
    }

    #[test]
    fn test_conflicting_pairs_rejected() {
        let (catalog, table) = setup(&["A", "B", "C"], &[("A", "B", 1, "C"), ("A", "A", 1, "C")]);
        let result = CreationGraph::build(&catalog, &table);

        assert_eq!(
            result.err(),
            Some(CreationError::Conflict {
                result: "C".into(),
                existing: IngredientPair::new("A", "B"),
                conflicting: IngredientPair::new("A", "A"),
            })
        );
    }

    #[test]
    fn test_unknown_input_rejected() {
        let (catalog, table) = setup(&["A", "B"], &[("A", "Z", 1, "B")]);
        assert!(matches!(
            CreationGraph::build(&catalog, &table),
            Err(CreationError::UnknownInput(_))
        ));
    }

    #[test]
    fn test_cycle_detected() {
        let (catalog, table) = setup(&["A", "B", "C"], &[("A", "B", 1, "C"), ("A", "C", 1, "B")]);
        let err = CreationGraph::build(&catalog, &table).expect_err("cycle");

        match err {
            CreationError::Cycle(path) => {
                assert_eq!(path.first(), path.last());
                assert!(path.contains(&"B".into()));
                assert!(path.contains(&"C".into()));
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_self_production_is_a_cycle() {
        let (catalog, table) = setup(&["A", "B"], &[("A", "B", 1, "A")]);
        let err = CreationGraph::build(&catalog, &table).expect_err("cycle");
        assert_eq!(err, CreationError::Cycle(vec!["A".into(), "A".into()]));
        assert!(err.to_string().contains("A -> A"));
    }
}
