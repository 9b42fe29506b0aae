//! `nexdex scenarios`, `nexdex run`, and `nexdex batch` command implementations.

use anyhow::{bail, Context as _, Result};
use nexdex_core::{Scenario, SimulationEngine};
use std::io;
use std::path::PathBuf;

use super::{simulate, Context};
use crate::output;
use crate::store::ScenarioStore;

/// List saved scenarios, optionally filtered by tag.
pub fn list(ctx: &Context, tag: Option<&str>) -> Result<()> {
    let scenarios = ctx.store.list(tag).with_context(|| {
        format!("failed to read scenarios from {}", ctx.store.dir().display())
    })?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    output::print_scenarios(&mut handle, &scenarios, &ctx.output)?;
    Ok(())
}

/// Run one saved scenario.
pub fn run(ctx: &Context, name: &str, json: bool) -> Result<()> {
    let scenario = ctx
        .store
        .load(name)
        .with_context(|| format!("failed to load scenario '{name}'"))?;
    let graph = ctx.load_graph()?;
    let result = SimulationEngine::new(&graph)
        .simulate_failure(&scenario.failed_services, scenario.peak_hours)
        .with_context(|| format!("scenario '{name}' cannot be simulated"))?;

    simulate::report(ctx, &graph, &result, json)
}

/// Expand each argument into scenario files: a file stands for itself, a
/// directory for every scenario file directly inside it.
fn expand(patterns: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        if pattern.is_dir() {
            let found = ScenarioStore::scenario_files(pattern)
                .with_context(|| format!("failed to read directory {}", pattern.display()))?;
            if found.is_empty() {
                tracing::warn!(dir = %pattern.display(), "No scenario files in directory");
            }
            files.extend(found);
        } else if pattern.is_file() {
            files.push(pattern.clone());
        } else {
            bail!("no scenario file or directory at {}", pattern.display());
        }
    }
    files.dedup();
    Ok(files)
}

fn load_all(files: &[PathBuf]) -> Result<Vec<Scenario>> {
    files
        .iter()
        .map(|path| {
            ScenarioStore::load_file(path)
                .with_context(|| format!("failed to load scenario file {}", path.display()))
        })
        .collect()
}

/// Simulate every scenario matched by `patterns` and print one row each.
pub fn batch(ctx: &Context, patterns: &[PathBuf]) -> Result<()> {
    let scenarios = load_all(&expand(patterns)?)?;
    let graph = ctx.load_graph()?;
    let results = SimulationEngine::new(&graph).simulate_scenarios(&scenarios)?;
    tracing::info!(count = results.len(), "Batch simulation complete");

    let runs: Vec<_> = scenarios.into_iter().zip(results).collect();

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    output::print_batch(&mut handle, &runs, &ctx.output)?;
    Ok(())
}
