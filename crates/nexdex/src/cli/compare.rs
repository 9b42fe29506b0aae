//! `nexdex compare` command implementation.

use anyhow::{Context as _, Result};
use nexdex_core::SimulationEngine;
use std::io;

use super::Context;
use crate::output;

/// Run the compare command.
///
/// Each scenario is simulated with its own peak-hours flag.
pub fn run(ctx: &Context, name_a: &str, name_b: &str, json: bool) -> Result<()> {
    let graph = ctx.load_graph()?;
    let engine = SimulationEngine::new(&graph);

    let mut results = Vec::with_capacity(2);
    for name in [name_a, name_b] {
        let scenario = ctx
            .store
            .load(name)
            .with_context(|| format!("failed to load scenario '{name}'"))?;
        let result = engine
            .simulate_failure(&scenario.failed_services, scenario.peak_hours)
            .with_context(|| format!("scenario '{name}' cannot be simulated"))?;
        results.push(result);
    }

    let comparison = engine.compare_results(&results[0], &results[1]);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if json {
        output::print_json(&mut handle, &comparison)?;
    } else {
        output::print_comparison(&mut handle, name_a, name_b, &comparison, &ctx.output)?;
    }
    Ok(())
}
