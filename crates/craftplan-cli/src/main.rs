//! # Craftplan
//!
//! Plans the maximum greedy yield of a target from a recipe matrix and an
//! inventory snapshot, and prints the plan as markdown.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use craftplan_cli::config::PlannerConfig;
use craftplan_cli::loader::{load_inventory, load_recipes};
use craftplan_cli::report::PlanReport;
use craftplan_common::IngredientId;
use craftplan_core::{PlanSummary, RecipeAnalysis};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "craftplan", version, about = "Greedy two-phase crafting planner")]
struct Cli {
    /// Target to optimize for (defaults to the configured target)
    target: Option<String>,

    /// Configuration file (defaults to $CRAFTPLAN_CONFIG, then craftplan.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Recipe matrix CSV, overriding the configuration
    #[arg(long)]
    recipes: Option<PathBuf>,

    /// Inventory CSV, overriding the configuration
    #[arg(long)]
    inventory: Option<PathBuf>,

    /// Also write the plan as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Main entry point.
fn main() -> Result<()> {
    let cli = Cli::parse();

    let directive = if cli.verbose { "craftplan=debug" } else { "craftplan=info" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .init();

    info!("Craftplan v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match &cli.config {
        Some(path) => PlannerConfig::load_from(path),
        None => PlannerConfig::load(),
    };
    if let Some(path) = cli.recipes {
        config.recipe_path = path;
    }
    if let Some(path) = cli.inventory {
        config.inventory_path = path;
    }
    if let Some(path) = cli.json {
        config.json_output = Some(path);
    }

    run(&config, cli.target.as_deref())
}

fn run(config: &PlannerConfig, requested: Option<&str>) -> Result<()> {
    let recipes = load_recipes(&config.recipe_path)
        .with_context(|| format!("Failed to load recipes from {}", config.recipe_path.display()))?;
    let inventory = load_inventory(&config.inventory_path, &recipes.catalog).with_context(|| {
        format!("Failed to load inventory from {}", config.inventory_path.display())
    })?;

    let analysis =
        RecipeAnalysis::build(&recipes.catalog, &recipes.recipes).context("Recipe analysis failed")?;

    let target = IngredientId::new(config.target(requested));
    info!("Optimizing for target reward: {target}");
    let outcome = analysis
        .plan(&target, &inventory.inventory)
        .context("Planning failed")?;
    let summary = PlanSummary::from_plan(&outcome.plan, &recipes.recipes);

    let recipe_source = config.recipe_path.display().to_string();
    let inventory_source = config.inventory_path.display().to_string();
    let report = PlanReport {
        recipe_source: &recipe_source,
        inventory_source: &inventory_source,
        recipes: &recipes,
        inventory: &inventory,
        analysis: &analysis,
        outcome: &outcome,
        summary: &summary,
        show_loading_sections: config.show_loading_sections,
    };

    print!("{}", report.render().context("Failed to render report")?);

    if let Some(path) = &config.json_output {
        let json = serde_json::to_string_pretty(&report.export())?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote plan JSON to {}", path.display());
    }

    info!(
        "Planned {} action(s) for {} x {target}",
        outcome.plan.len(),
        outcome.total_yield
    );
    Ok(())
}
