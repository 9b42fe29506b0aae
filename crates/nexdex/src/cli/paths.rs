//! `nexdex paths` command implementation.

use anyhow::{bail, Result};
use nexdex_core::SimulationEngine;
use std::io;

use super::Context;
use crate::output;

/// Run the paths command.
pub fn run(ctx: &Context, service: &str) -> Result<()> {
    let graph = ctx.load_graph()?;
    if !graph.contains(service) {
        bail!(nexdex_core::Error::ServiceNotFound(service.to_string()));
    }

    let paths = SimulationEngine::new(&graph).find_critical_paths(service);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    output::print_paths(&mut handle, service, &paths, &ctx.output)?;
    Ok(())
}
