//! Per input-pair execution counts of a crafting plan.

use craftplan_common::IngredientPair;
use serde::{Deserialize, Serialize};

use crate::planner::CraftAction;
use crate::recipes::{RecipeOutcome, RecipeTable};

/// How often one input pair is combined in a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    /// Exact ordered pair used by the actions.
    pub inputs: IngredientPair,
    /// Number of actions (`CREATE` and `CRAFT`) using this pair.
    pub count: usize,
    /// Recipe registered under this exact ordering, if any.
    pub outcome: Option<RecipeOutcome>,
}

/// Execution counts ordered by descending count, ties in first-use order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    entries: Vec<SummaryEntry>,
}

impl PlanSummary {
    /// Counts the actions of `plan`, annotating each pair from `recipes`.
    #[must_use]
    pub fn from_plan(plan: &[CraftAction], recipes: &RecipeTable) -> Self {
        let mut entries: Vec<SummaryEntry> = Vec::new();
        for action in plan {
            let inputs = action.inputs();
            match entries.iter_mut().find(|entry| &entry.inputs == inputs) {
                Some(entry) => entry.count += 1,
                None => entries.push(SummaryEntry {
                    inputs: inputs.clone(),
                    count: 1,
                    outcome: recipes.get(inputs).cloned(),
                }),
            }
        }
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        Self { entries }
    }

    /// Entries, most executed first.
    #[must_use]
    pub fn entries(&self) -> &[SummaryEntry] {
        &self.entries
    }

    /// Returns the number of distinct pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true for an empty plan.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(a: &str, b: &str, result: &str) -> CraftAction {
        CraftAction::Create {
            inputs: IngredientPair::new(a, b),
            result: result.into(),
        }
    }

    fn craft(a: &str, b: &str, quantity: u32) -> CraftAction {
        CraftAction::Craft {
            inputs: IngredientPair::new(a, b),
            quantity,
            target: "T".into(),
        }
    }

    #[test]
    fn test_counts_sorted_with_stable_ties() {
        let mut recipes = RecipeTable::new();
        recipes
            .register(IngredientPair::new("A", "B"), RecipeOutcome::one("C"))
            .expect("register");
        recipes
            .register(IngredientPair::new("A", "C"), RecipeOutcome::new(3, "T"))
            .expect("register");

        let plan = vec![
            create("A", "B", "C"),
            craft("A", "C", 3),
            craft("A", "A", 1),
            create("A", "B", "C"),
            craft("A", "C", 3),
            create("A", "B", "C"),
        ];
        let summary = PlanSummary::from_plan(&plan, &recipes);

        let counts: Vec<_> = summary
            .entries()
            .iter()
            .map(|e| (e.inputs.to_string(), e.count))
            .collect();
        assert_eq!(
            counts,
            vec![
                ("(A, B)".to_string(), 3),
                ("(A, C)".to_string(), 2),
                ("(A, A)".to_string(), 1),
            ]
        );
        assert_eq!(summary.entries()[1].outcome, Some(RecipeOutcome::new(3, "T")));
        assert_eq!(summary.entries()[2].outcome, None);
    }

    #[test]
    fn test_empty_plan() {
        let summary = PlanSummary::from_plan(&[], &RecipeTable::new());
        assert!(summary.is_empty());
    }
}
