//! `nexdex validate` command implementation.

use anyhow::{bail, Result};
use std::io;

use super::Context;
use crate::output;

/// Run the validate command.
///
/// Cycles are reported but allowed; dangling references fail the command.
pub fn run(ctx: &Context) -> Result<()> {
    let graph = ctx.load_graph()?;
    let errors = graph.validate_dependencies();
    let cycles = graph.detect_circular_dependencies();

    {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        output::print_validation(&mut handle, &errors, &cycles, &ctx.output)?;
    }

    if !errors.is_empty() {
        bail!("{} dangling dependency reference(s)", errors.len());
    }
    Ok(())
}
