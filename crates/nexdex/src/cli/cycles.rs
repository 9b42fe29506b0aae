//! `nexdex cycles` command implementation.

use anyhow::Result;
use std::io;

use super::Context;
use crate::output;

/// Run the cycles command.
pub fn run(ctx: &Context) -> Result<()> {
    let graph = ctx.load_graph()?;
    let cycles = graph.detect_circular_dependencies();

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    output::print_cycles(&mut handle, &cycles, &ctx.output)?;
    Ok(())
}
