//! Two-phase greedy crafting planner.
//!
//! Given a target and its ranked routes, the planner repeatedly attempts each
//! route against a throwaway copy of its working inventory and promotes the
//! copy only when the attempt succeeds:
//! - Phase 1 commits only attempts that had to create at least one
//!   intermediate ingredient, so existing composite stock is spent first.
//! - Phase 2 drains whatever capacity is left, base-only crafts included.
//!
//! The result is an ordered plan of `CREATE`/`CRAFT` actions, the total yield
//! and the final inventory. The allocation is greedy and not globally optimal.

use craftplan_common::{IngredientId, IngredientPair};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

use crate::creation::CreationGraph;
use crate::inventory::Inventory;
use crate::routes::{Route, RouteIndex};

/// Planner error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlannerError {
    /// Target has no route at all
    #[error("Target reward '{0}' not found in recipes")]
    UnknownTarget(IngredientId),
}

/// Result type for planning.
pub type PlannerResult<T> = Result<T, PlannerError>;

/// One step of a crafting plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CraftAction {
    /// Combine two inputs into one unit of an intermediate ingredient.
    Create {
        /// Inputs consumed
        inputs: IngredientPair,
        /// Intermediate produced
        result: IngredientId,
    },
    /// Combine two inputs into the target.
    Craft {
        /// Inputs consumed
        inputs: IngredientPair,
        /// Units of the target produced
        quantity: u32,
        /// Target produced
        target: IngredientId,
    },
}

impl CraftAction {
    /// Returns the input pair of this action.
    #[must_use]
    pub fn inputs(&self) -> &IngredientPair {
        match self {
            Self::Create { inputs, .. } | Self::Craft { inputs, .. } => inputs,
        }
    }

    /// Returns true for an intermediate creation step.
    #[must_use]
    pub const fn is_create(&self) -> bool {
        matches!(self, Self::Create { .. })
    }
}

impl fmt::Display for CraftAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create { inputs, result } => {
                write!(f, "CREATE({}, {} -> {})", inputs.first, inputs.second, result)
            },
            Self::Craft {
                inputs,
                quantity,
                target,
            } => write!(
                f,
                "CRAFT({}, {} -> {} x {})",
                inputs.first, inputs.second, quantity, target
            ),
        }
    }
}

/// Planning phases, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanPhase {
    /// Commit only attempts that create at least one intermediate.
    ExistingComposites,
    /// Commit any successful attempt.
    RemainingBase,
}

impl PlanPhase {
    /// Get display name for this phase.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::ExistingComposites => "PHASE 1: Using existing complex ingredients",
            Self::RemainingBase => "PHASE 2: Using remaining base ingredients",
        }
    }

    const fn requires_create(self) -> bool {
        matches!(self, Self::ExistingComposites)
    }
}

/// What one phase committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseReport {
    /// Which phase.
    pub phase: PlanPhase,
    /// Number of `CRAFT` actions committed.
    pub crafts: usize,
    /// Target units gained.
    pub yield_gained: u64,
    /// Total target units after this phase.
    pub total_after: u64,
    /// Working inventory after this phase.
    pub inventory_after: Inventory,
}

/// Final result of a planning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOutcome {
    /// Target that was optimized for.
    pub target: IngredientId,
    /// Actions in commit order.
    pub plan: Vec<CraftAction>,
    /// Target units obtained.
    pub total_yield: u64,
    /// Inventory after every committed action.
    pub inventory: Inventory,
    /// Per-phase summaries, phase 1 first.
    pub phases: Vec<PhaseReport>,
}

/// Greedy planner state for one run.
#[derive(Debug)]
pub struct CraftingPlanner<'a> {
    graph: &'a CreationGraph,
    target: IngredientId,
    routes: &'a [Route],
    /// Inventory after every committed attempt
    working: Inventory,
    /// Committed actions
    plan: Vec<CraftAction>,
    total_yield: u64,
}

impl<'a> CraftingPlanner<'a> {
    /// Creates a planner over a private copy of `inventory`.
    #[must_use]
    pub fn new(
        graph: &'a CreationGraph,
        target: IngredientId,
        routes: &'a [Route],
        inventory: &Inventory,
    ) -> Self {
        Self {
            graph,
            target,
            routes,
            working: inventory.clone(),
            plan: Vec::new(),
            total_yield: 0,
        }
    }

    /// Checks whether one unit of `ingredient` is on hand or recursively creatable.
    ///
    /// Each input is checked against the same stock independently, so a true
    /// result does not guarantee that [`try_craft`](Self::try_craft) succeeds
    /// when inputs share stock. A false result does guarantee it fails.
    #[must_use]
    pub fn can_craft(&self, ingredient: &IngredientId, inventory: &Inventory) -> bool {
        if inventory.count(ingredient) > 0 {
            return true;
        }
        match self.graph.inputs(ingredient) {
            Some(pair) => {
                self.can_craft(&pair.first, inventory) && self.can_craft(&pair.second, inventory)
            },
            None => false,
        }
    }

    /// Consumes one unit of `ingredient` from `inventory`, creating it from its
    /// inputs when none is on hand.
    ///
    /// The left input is fully resolved before the right one. Every creation is
    /// appended to `steps`. On failure `inventory` and `steps` are partially
    /// updated and must be discarded.
    pub fn try_craft(
        &self,
        ingredient: &IngredientId,
        inventory: &mut Inventory,
        steps: &mut Vec<CraftAction>,
    ) -> bool {
        if inventory.take_one(ingredient) {
            return true;
        }

        let Some(pair) = self.graph.inputs(ingredient) else {
            return false;
        };

        if self.try_craft(&pair.first, inventory, steps)
            && self.try_craft(&pair.second, inventory, steps)
        {
            steps.push(CraftAction::Create {
                inputs: pair.clone(),
                result: ingredient.clone(),
            });
            return true;
        }
        false
    }

    /// Attempts one execution of `route` on a copy of the working inventory.
    fn attempt(&self, route: &Route) -> Option<(Inventory, Vec<CraftAction>)> {
        if !self.can_craft(&route.pair.first, &self.working)
            || !self.can_craft(&route.pair.second, &self.working)
        {
            return None;
        }

        let mut inventory = self.working.clone();
        let mut steps = Vec::new();
        let crafted = self.try_craft(&route.pair.first, &mut inventory, &mut steps)
            && self.try_craft(&route.pair.second, &mut inventory, &mut steps);
        crafted.then_some((inventory, steps))
    }

    fn commit(&mut self, route: &Route, inventory: Inventory, steps: Vec<CraftAction>) {
        self.working = inventory;

        if steps.is_empty() {
            debug!(
                "Crafted {} => {} x {}",
                route.pair, route.quantity, self.target
            );
        } else {
            let created: Vec<_> = steps
                .iter()
                .filter_map(|step| match step {
                    CraftAction::Create { result, .. } => Some(result.as_str()),
                    CraftAction::Craft { .. } => None,
                })
                .collect();
            debug!(
                "Crafted {} => {} x {} (required creating: {})",
                route.pair,
                route.quantity,
                self.target,
                created.join(", ")
            );
        }

        self.plan.extend(steps);
        self.plan.push(CraftAction::Craft {
            inputs: route.pair.clone(),
            quantity: route.quantity,
            target: self.target.clone(),
        });
        self.total_yield += u64::from(route.quantity);
    }

    /// Runs one phase over every route in rank order.
    fn run_phase(&mut self, phase: PlanPhase) -> PhaseReport {
        let yield_before = self.total_yield;
        let mut crafts = 0;
        let routes = self.routes;

        for route in routes {
            while let Some((inventory, steps)) = self.attempt(route) {
                if phase.requires_create() && steps.is_empty() {
                    break;
                }
                self.commit(route, inventory, steps);
                crafts += 1;
            }
        }

        let report = PhaseReport {
            phase,
            crafts,
            yield_gained: self.total_yield - yield_before,
            total_after: self.total_yield,
            inventory_after: self.working.clone(),
        };
        info!(
            "{} complete: {} craft(s), total {} so far: {}",
            phase.display_name(),
            report.crafts,
            self.target,
            report.total_after
        );
        report
    }

    /// Runs both phases and returns the plan.
    #[must_use]
    pub fn run(mut self) -> PlanOutcome {
        let phases = vec![
            self.run_phase(PlanPhase::ExistingComposites),
            self.run_phase(PlanPhase::RemainingBase),
        ];

        info!("Total {} obtained: {}", self.target, self.total_yield);
        PlanOutcome {
            target: self.target,
            plan: self.plan,
            total_yield: self.total_yield,
            inventory: self.working,
            phases,
        }
    }
}

/// Looks up the ranked routes of `target` and plans against `inventory`.
///
/// Fails before planning when nothing produces `target`.
pub fn plan_target(
    graph: &CreationGraph,
    routes: &RouteIndex,
    target: &IngredientId,
    inventory: &Inventory,
) -> PlannerResult<PlanOutcome> {
    let ranked = routes
        .routes_for(target)
        .map_err(|_| PlannerError::UnknownTarget(target.clone()))?;
    info!("Optimizing for target reward {} over {} route(s)", target, ranked.len());
    Ok(CraftingPlanner::new(graph, target.clone(), ranked, inventory).run())
}
