//! `nexdex worst-case` command implementation.

use anyhow::Result;
use nexdex_core::SimulationEngine;

use super::Context;
use crate::output::color::{bold, dimmed, error, success};
use crate::output::format_score;

/// Run the worst-case command.
///
/// Simulates every service on its own, so this gets slow on large graphs.
pub fn run(ctx: &Context) -> Result<()> {
    let graph = ctx.load_graph()?;
    let engine = SimulationEngine::new(&graph);
    let config = &ctx.output;

    let Some(worst) = engine.get_worst_case_scenario()? else {
        println!("{}", success("No service failure has any impact.", config));
        return Ok(());
    };

    let result = engine.simulate_failure(&[&worst], false)?;
    let summary = engine.get_impact_summary(&result);

    println!(
        "{}: {}",
        bold("Worst single failure", config),
        error(&worst, config)
    );
    println!(
        "  {}: {}",
        dimmed("Total impact score", config),
        format_score(summary.total_impact_score)
    );
    println!(
        "  {}: {} ({} cascading)",
        dimmed("Services affected", config),
        summary.total_services_affected,
        summary.cascade_failures
    );
    Ok(())
}
