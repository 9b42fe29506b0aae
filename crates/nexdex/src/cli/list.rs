//! `nexdex list` command implementation.

use anyhow::Result;
use std::io;

use super::Context;
use crate::output;

/// Run the list command.
pub fn run(ctx: &Context) -> Result<()> {
    let graph = ctx.load_graph()?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    output::print_services(&mut handle, &graph, &ctx.output)?;
    Ok(())
}
