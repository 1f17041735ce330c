//! Markdown report and JSON export of a planning run.
//!
//! The report is meant to be pasted into a markdown viewer: verbose sections
//! are wrapped in collapsible `<details>` blocks, while the target heading,
//! the numbered plan and the recipe summary stay visible.

use std::fmt::{self, Write};

use craftplan_common::IngredientId;
use craftplan_core::{
    CraftAction, IngredientCatalog, Inventory, PhaseReport, PlanOutcome, PlanPhase, PlanSummary,
    RecipeAnalysis, SummaryEntry,
};
use serde::Serialize;

use crate::loader::{InventoryData, RecipeData};

/// Everything needed to render one run.
#[derive(Debug, Clone, Copy)]
pub struct PlanReport<'a> {
    /// Recipe file name as shown to the reader.
    pub recipe_source: &'a str,
    /// Inventory file name as shown to the reader.
    pub inventory_source: &'a str,
    /// Parsed recipe matrix.
    pub recipes: &'a RecipeData,
    /// Parsed inventory.
    pub inventory: &'a InventoryData,
    /// Costs and routes.
    pub analysis: &'a RecipeAnalysis,
    /// Planner result.
    pub outcome: &'a PlanOutcome,
    /// Per-pair counts of the plan.
    pub summary: &'a PlanSummary,
    /// Render the loading and analysis sections.
    pub show_loading_sections: bool,
}

/// Splits a plan into commits: zero or more `CREATE`s closed by one `CRAFT`.
fn commits(plan: &[CraftAction]) -> Vec<&[CraftAction]> {
    let mut commits = Vec::new();
    let mut start = 0;
    for (idx, action) in plan.iter().enumerate() {
        if !action.is_create() {
            commits.push(&plan[start..=idx]);
            start = idx + 1;
        }
    }
    commits
}

fn remaining(inventory: &Inventory, catalog: &IngredientCatalog) -> String {
    inventory
        .stocked(catalog)
        .iter()
        .map(|(id, count)| format!("{count} x {id}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn open_section(out: &mut String, title: &str) -> fmt::Result {
    writeln!(out, "<details>")?;
    writeln!(out, "<summary>{title}</summary>")?;
    writeln!(out)
}

fn close_section(out: &mut String) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "</details>")
}

impl<'a> PlanReport<'a> {
    /// Renders the full markdown document.
    pub fn render(&self) -> Result<String, fmt::Error> {
        let mut out = String::new();
        if self.show_loading_sections {
            self.write_recipe_loading(&mut out)?;
            self.write_inventory_loading(&mut out)?;
            self.write_analysis(&mut out)?;
        }
        self.write_phases(&mut out)?;
        self.write_plan(&mut out)?;
        self.write_summary(&mut out)?;
        self.write_remaining_csv(&mut out)?;
        Ok(out)
    }

    fn catalog(&self) -> &IngredientCatalog {
        &self.recipes.catalog
    }

    fn target(&self) -> &IngredientId {
        &self.outcome.target
    }

    fn write_recipe_loading(&self, out: &mut String) -> fmt::Result {
        open_section(out, "📁 Recipe Data Loading")?;
        writeln!(
            out,
            "Loaded {} lines from {}",
            self.recipes.lines_read, self.recipe_source
        )?;
        writeln!(out)?;
        let names: Vec<&str> = self.catalog().iter().map(IngredientId::as_str).collect();
        writeln!(out, "Ingredients ({}): {}", names.len(), names.join(", "))?;
        writeln!(out, "Recipes: {}", self.recipes.recipes.len())?;
        writeln!(out, "Creation recipes: {}", self.analysis.graph().len())?;
        close_section(out)
    }

    fn write_inventory_loading(&self, out: &mut String) -> fmt::Result {
        open_section(out, "📦 Inventory Data Loading")?;
        writeln!(
            out,
            "Loaded {} lines from {}",
            self.inventory.lines_read, self.inventory_source
        )?;
        writeln!(out)?;
        for (id, count) in self.inventory.inventory.stocked(self.catalog()) {
            writeln!(out, "- {id} => {count}")?;
        }
        writeln!(out)?;
        writeln!(
            out,
            "{} entr(ies), {} unit(s) in stock",
            self.inventory.entries,
            self.inventory.inventory.total()
        )?;
        close_section(out)
    }

    fn write_analysis(&self, out: &mut String) -> fmt::Result {
        open_section(out, "📈 Recipe Analysis")?;
        for (ingredient, cost) in self.analysis.composite_costs() {
            writeln!(out, "Cost to create {ingredient}: {cost}")?;
        }
        writeln!(out)?;

        let routes = self.analysis.routes();
        for result in routes.results() {
            writeln!(out, "Possible ways to get reward {result}:")?;
            for route in routes.routes_for(result).unwrap_or_default() {
                writeln!(
                    out,
                    "  From ({}, {}) x {} with cost: {} [{:.4}]",
                    route.pair.first,
                    route.pair.second,
                    route.quantity,
                    route.cost,
                    route.efficiency()
                )?;
            }
        }
        close_section(out)
    }

    fn write_phases(&self, out: &mut String) -> fmt::Result {
        writeln!(out)?;
        writeln!(out, "## 🎯 OPTIMIZING FOR TARGET REWARD: {}", self.target())?;
        writeln!(out)?;

        let commits = commits(&self.outcome.plan);
        let mut next = 0;
        for report in &self.outcome.phases {
            open_section(out, &format!("⚗️ {}", report.phase.display_name()))?;
            let end = (next + report.crafts).min(commits.len());
            for commit in &commits[next..end] {
                Self::write_commit(out, commit)?;
            }
            next = end;
            self.write_phase_footer(out, report)?;
            close_section(out)?;
        }

        open_section(out, "✅ OPTIMIZATION COMPLETE")?;
        writeln!(
            out,
            "**Total {} obtained: {}**",
            self.target(),
            self.outcome.total_yield
        )?;
        writeln!(out)?;
        writeln!(
            out,
            "Remaining inventory: {}",
            remaining(&self.outcome.inventory, self.catalog())
        )?;
        close_section(out)
    }

    fn write_commit(out: &mut String, commit: &[CraftAction]) -> fmt::Result {
        let created: Vec<String> = commit
            .iter()
            .filter_map(|action| match action {
                CraftAction::Create { result, .. } => Some(result.to_string()),
                CraftAction::Craft { .. } => None,
            })
            .collect();
        if let Some(CraftAction::Craft {
            inputs,
            quantity,
            target,
        }) = commit.last()
        {
            writeln!(
                out,
                "Crafted ({}, {}) => {} x {}",
                inputs.first, inputs.second, quantity, target
            )?;
        }
        if !created.is_empty() {
            writeln!(out, "  Required creating: {}", created.join(", "))?;
        }
        Ok(())
    }

    fn write_phase_footer(&self, out: &mut String, report: &PhaseReport) -> fmt::Result {
        writeln!(out)?;
        match report.phase {
            PlanPhase::ExistingComposites => {
                writeln!(out, "Phase 1 complete. Total rewards so far: {}", report.total_after)?;
                writeln!(
                    out,
                    "Remaining inventory: {}",
                    remaining(&report.inventory_after, self.catalog())
                )?;
            },
            PlanPhase::RemainingBase => {
                writeln!(
                    out,
                    "Phase 2 complete. {} craft(s), {} reward(s) gained",
                    report.crafts, report.yield_gained
                )?;
            },
        }
        Ok(())
    }

    fn write_plan(&self, out: &mut String) -> fmt::Result {
        writeln!(out)?;
        writeln!(out, "## 📋 DETAILED CRAFTING PLAN")?;
        writeln!(out)?;
        for (step, action) in self.outcome.plan.iter().enumerate() {
            let inputs = action.inputs();
            match action {
                CraftAction::Create { result, .. } => writeln!(
                    out,
                    "{}. Combine **{}** + **{}** to create intermediate ingredient - Creating {}",
                    step + 1,
                    inputs.first,
                    inputs.second,
                    result
                )?,
                CraftAction::Craft {
                    quantity, target, ..
                } => writeln!(
                    out,
                    "{}. Combine **{}** + **{}** => {} x {}",
                    step + 1,
                    inputs.first,
                    inputs.second,
                    quantity,
                    target
                )?,
            }
        }
        Ok(())
    }

    fn write_summary(&self, out: &mut String) -> fmt::Result {
        writeln!(out)?;
        writeln!(out, "## 📊 RECIPE SUMMARY")?;
        writeln!(out)?;
        for SummaryEntry {
            inputs,
            count,
            outcome,
        } in self.summary.entries()
        {
            match outcome {
                Some(outcome) => writeln!(
                    out,
                    "- **({} + {})** => {}: Execute {} time(s)",
                    inputs.first, inputs.second, outcome, count
                )?,
                None => writeln!(
                    out,
                    "- **({} + {})**: Execute {} time(s)",
                    inputs.first, inputs.second, count
                )?,
            }
        }
        Ok(())
    }

    fn write_remaining_csv(&self, out: &mut String) -> fmt::Result {
        writeln!(out)?;
        open_section(out, "📦 REMAINING INVENTORY (CSV FORMAT)")?;
        writeln!(out, "```csv")?;
        writeln!(out, "Ingredient,Quantity")?;
        for (id, count) in self.outcome.inventory.in_catalog_order(self.catalog()) {
            writeln!(out, "{id},{count}")?;
        }
        writeln!(out, "```")?;
        close_section(out)
    }

    /// Machine-readable view of the run.
    #[must_use]
    pub fn export(&self) -> PlanExport<'a> {
        let outcome: &'a PlanOutcome = self.outcome;
        let summary: &'a PlanSummary = self.summary;
        let catalog: &'a IngredientCatalog = &self.recipes.catalog;
        PlanExport {
            target: &outcome.target,
            total_yield: outcome.total_yield,
            phases: &outcome.phases,
            plan: &outcome.plan,
            summary: summary.entries(),
            remaining: outcome.inventory.in_catalog_order(catalog),
        }
    }
}

/// JSON export of a run, with the inventory in catalog order.
#[derive(Debug, Serialize)]
pub struct PlanExport<'a> {
    /// Target optimized for.
    pub target: &'a IngredientId,
    /// Target units obtained.
    pub total_yield: u64,
    /// Per-phase counters.
    pub phases: &'a [PhaseReport],
    /// Ordered actions.
    pub plan: &'a [CraftAction],
    /// Per-pair execution counts.
    pub summary: &'a [SummaryEntry],
    /// Final stock of every catalog ingredient.
    pub remaining: Vec<(&'a IngredientId, u32)>,
}
