//! `nexdex simulate` command implementation.

use anyhow::{Context as _, Result};
use nexdex_core::{Scenario, SimulationEngine, SimulationResult};
use std::io;

use super::Context;
use crate::output::{self, color::success, report::TOP_PROCESSES};

/// Where to save the simulated failure set, if anywhere.
#[derive(Debug, Default)]
pub struct SaveAs {
    /// Scenario name; nothing is saved when `None`.
    pub name: Option<String>,
    /// Scenario description.
    pub description: Option<String>,
    /// Scenario tags.
    pub tags: Vec<String>,
}

/// Run the simulate command.
pub fn run(
    ctx: &Context,
    services: &[String],
    peak_hours: bool,
    save_as: SaveAs,
    json: bool,
) -> Result<()> {
    let graph = ctx.load_graph()?;
    let result = SimulationEngine::new(&graph).simulate_failure(services, peak_hours)?;

    if let Some(name) = save_as.name {
        let scenario = Scenario::new(name, services.iter().cloned())
            .with_description(save_as.description.unwrap_or_default())
            .with_tags(save_as.tags)
            .with_peak_hours(peak_hours);
        let path = ctx
            .store
            .save(&scenario)
            .with_context(|| format!("failed to save scenario '{}'", scenario.name))?;
        // Keep stdout clean for --json consumers.
        eprintln!(
            "{}",
            success(&format!("Saved scenario to {}", path.display()), &ctx.output)
        );
    }

    report(ctx, &graph, &result, json)
}

/// Print a result either as JSON or as the full text report.
pub(super) fn report(
    ctx: &Context,
    graph: &nexdex_core::DependencyGraph,
    result: &SimulationResult,
    json: bool,
) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if json {
        output::print_json(&mut handle, result)?;
        return Ok(());
    }

    let engine = SimulationEngine::new(graph);
    let summary = engine.get_impact_summary(result);
    let top = engine.get_top_business_processes(result, TOP_PROCESSES);
    output::print_simulation(&mut handle, result, &summary, &top, &ctx.output)?;
    Ok(())
}
