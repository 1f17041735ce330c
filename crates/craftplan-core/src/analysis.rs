//! One-shot recipe analysis: creation graph, composite costs and routes.

use craftplan_common::IngredientId;
use tracing::info;

use crate::catalog::IngredientCatalog;
use crate::cost::{CostResolver, CostVector};
use crate::creation::CreationGraph;
use crate::error::CraftplanResult;
use crate::inventory::Inventory;
use crate::planner::{plan_target, PlanOutcome};
use crate::recipes::RecipeTable;
use crate::routes::RouteIndex;

/// Everything derived from the catalog and recipe table before planning.
#[derive(Debug, Clone)]
pub struct RecipeAnalysis {
    graph: CreationGraph,
    /// Cost of every composite, in catalog order
    composite_costs: Vec<(IngredientId, CostVector)>,
    routes: RouteIndex,
}

impl RecipeAnalysis {
    /// Builds the creation graph, resolves composite costs and ranks routes.
    pub fn build(catalog: &IngredientCatalog, recipes: &RecipeTable) -> CraftplanResult<Self> {
        let graph = CreationGraph::build(catalog, recipes)?;

        let (composite_costs, routes) = {
            let mut resolver = CostResolver::new(&graph);
            let mut costs = Vec::with_capacity(graph.len());
            for ingredient in graph.composites() {
                costs.push((ingredient.clone(), resolver.cost(ingredient)?));
            }
            let routes = RouteIndex::enumerate(catalog, recipes, &mut resolver)?;
            info!(
                "Resolved {} cost vector(s) for {} composite ingredient(s)",
                resolver.resolutions(),
                costs.len()
            );
            (costs, routes)
        };

        Ok(Self {
            graph,
            composite_costs,
            routes,
        })
    }

    /// The creation graph.
    #[must_use]
    pub fn graph(&self) -> &CreationGraph {
        &self.graph
    }

    /// Costs of composite ingredients, in catalog order.
    #[must_use]
    pub fn composite_costs(&self) -> &[(IngredientId, CostVector)] {
        &self.composite_costs
    }

    /// Ranked routes for every result.
    #[must_use]
    pub fn routes(&self) -> &RouteIndex {
        &self.routes
    }

    /// Plans the maximum greedy yield of `target` from `inventory`.
    pub fn plan(&self, target: &IngredientId, inventory: &Inventory) -> CraftplanResult<PlanOutcome> {
        Ok(plan_target(&self.graph, &self.routes, target, inventory)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CraftplanError;
    use crate::recipes::RecipeOutcome;
    use craftplan_common::IngredientPair;

    fn table(recipes: &[(&str, &str, u32, &str)]) -> RecipeTable {
        let mut table = RecipeTable::new();
        for (a, b, quantity, result) in recipes {
            table
                .register(IngredientPair::new(*a, *b), RecipeOutcome::new(*quantity, *result))
                .expect("register");
        }
        table
    }

    #[test]
    fn test_analysis_end_to_end() {
        let catalog = IngredientCatalog::from_ingredients(["A", "B", "C"]).expect("catalog");
        let recipes = table(&[
            ("A", "A", 1, "Wildcards"),
            ("A", "B", 1, "C"),
            ("A", "C", 4, "Wildcards"),
        ]);
        let analysis = RecipeAnalysis::build(&catalog, &recipes).expect("analysis");

        assert_eq!(analysis.composite_costs().len(), 1);
        assert_eq!(analysis.composite_costs()[0].1.total(), 2);
        assert_eq!(analysis.routes().len(), 2);

        let inventory = Inventory::from_counts([("A", 3), ("B", 1)]);
        let outcome = analysis.plan(&"Wildcards".into(), &inventory).expect("plan");
        // (A,C) with C created from (A,B), then nothing left for (A,A).
        assert_eq!(outcome.total_yield, 4);
        assert_eq!(outcome.plan.len(), 2);
        assert_eq!(outcome.inventory.count(&"A".into()), 1);
    }

    #[test]
    fn test_conflict_aborts_before_planning() {
        let catalog = IngredientCatalog::from_ingredients(["A", "B", "C"]).expect("catalog");
        let recipes = table(&[("A", "B", 1, "C"), ("B", "B", 1, "C")]);

        assert!(matches!(
            RecipeAnalysis::build(&catalog, &recipes),
            Err(CraftplanError::Creation(_))
        ));
    }

    #[test]
    fn test_unknown_target() {
        let catalog = IngredientCatalog::from_ingredients(["A"]).expect("catalog");
        let recipes = table(&[("A", "A", 1, "Dust")]);
        let analysis = RecipeAnalysis::build(&catalog, &recipes).expect("analysis");

        let result = analysis.plan(&"Wildcards".into(), &Inventory::new());
        assert!(matches!(result, Err(CraftplanError::Planner(_))));
    }
}
