//! Output formatting for CLI commands.
//!
//! Every printer writes to a generic [`Write`] so the text can be captured
//! in tests; commands pass a locked stdout.
//!
//! Submodules:
//! - [`color`]: semantic color helpers gated on [`OutputConfig::use_colors`]
//! - [`report`]: simulation, comparison, and scenario reports

pub mod color;
pub mod report;

use nexdex_core::{DependencyGraph, GraphStats};
use serde::Serialize;
use std::env;
use std::io::{self, Write};

pub use report::{print_batch, print_comparison, print_scenarios, print_simulation};

use color::{bold, dimmed, error, header, info, success, warning};

// ============================================================================
// Output Configuration
// ============================================================================

const DEFAULT_TERMINAL_WIDTH: u16 = 80;
const DEFAULT_MAX_CONTENT_WIDTH: usize = 100;

/// Lists longer than this are cut short with "... and N more".
pub(crate) const MAX_DISPLAY_ITEMS: usize = 10;

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for text wrapping.
    pub max_width: usize,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create an `OutputConfig` with explicit values.
    #[must_use]
    pub fn new(max_width: usize, use_colors: bool) -> Self {
        Self {
            max_width,
            use_colors,
        }
    }

    /// Create an `OutputConfig` by reading from environment variables.
    ///
    /// Reads:
    /// - `NEXDEX_MAX_WIDTH`: Maximum content width (default: 100)
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `NEXDEX_COLOR`: Set to "0" or "false" to disable colors (default: true)
    #[must_use]
    pub fn from_env() -> Self {
        let max_width = match env::var("NEXDEX_MAX_WIDTH") {
            Ok(s) if !s.is_empty() => match s.parse() {
                Ok(width) if width > 0 => width,
                _ => {
                    tracing::warn!(
                        env_var = "NEXDEX_MAX_WIDTH",
                        value = %s,
                        default = DEFAULT_MAX_CONTENT_WIDTH,
                        "Invalid value, using default"
                    );
                    DEFAULT_MAX_CONTENT_WIDTH
                }
            },
            _ => DEFAULT_MAX_CONTENT_WIDTH,
        };

        // Respect NO_COLOR (https://no-color.org/), with NEXDEX_COLOR for explicit control
        let use_colors = env::var("NO_COLOR").is_err()
            && env::var("NEXDEX_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self {
            max_width,
            use_colors,
        }
    }

    /// Width available for wrapped text: the terminal width, capped at `max_width`.
    #[must_use]
    pub fn content_width(&self) -> usize {
        get_terminal_width().min(self.max_width)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_CONTENT_WIDTH,
            use_colors: true,
        }
    }
}

/// Get the current terminal width, falling back to default if detection fails.
fn get_terminal_width() -> usize {
    terminal_size::terminal_size()
        .map_or(DEFAULT_TERMINAL_WIDTH, |(w, _)| w.0)
        .into()
}

// ============================================================================
// Shared Helpers
// ============================================================================

/// Wrap text to `max_width`, preserving blank lines.
pub(crate) fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, max_width.max(10))
                    .into_iter()
                    .map(std::borrow::Cow::into_owned)
                    .collect()
            }
        })
        .collect()
}

/// Two-decimal score.
pub(crate) fn format_score(score: f64) -> String {
    format!("{score:.2}")
}

/// A cycle or path joined with arrows.
pub(crate) fn format_chain(names: &[String]) -> String {
    names.join(" → ")
}

/// Bulleted list, truncated after [`MAX_DISPLAY_ITEMS`].
pub(crate) fn print_name_list<W: Write, S: AsRef<str>>(
    w: &mut W,
    names: &[S],
    empty_message: &str,
    config: &OutputConfig,
) -> io::Result<()> {
    if names.is_empty() {
        writeln!(w, "    {}", dimmed(empty_message, config))?;
        return Ok(());
    }

    for name in names.iter().take(MAX_DISPLAY_ITEMS) {
        writeln!(w, "    {} {}", dimmed("•", config), name.as_ref())?;
    }
    if names.len() > MAX_DISPLAY_ITEMS {
        writeln!(
            w,
            "    {} ... and {} more",
            dimmed("•", config),
            names.len() - MAX_DISPLAY_ITEMS
        )?;
    }
    Ok(())
}

/// Print any serializable value as pretty JSON.
///
/// # Errors
///
/// Returns an I/O error if writing fails or the value cannot be serialized.
pub fn print_json<W: Write, T: Serialize>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{json}")
}

// ============================================================================
// Graph Output
// ============================================================================

/// Print the service table followed by graph statistics.
///
/// # Errors
///
/// Returns an I/O error if writing fails.
pub fn print_services<W: Write>(
    w: &mut W,
    graph: &DependencyGraph,
    config: &OutputConfig,
) -> io::Result<()> {
    let services = graph.services();
    if services.is_empty() {
        writeln!(w, "No services defined.")?;
        return Ok(());
    }

    let name_width = services.iter().map(|s| s.name.len()).max().unwrap_or(0).max(7);
    let process_width = services
        .iter()
        .map(|s| s.business_process.len())
        .max()
        .unwrap_or(0)
        .max(7);
    let width = config.content_width();

    writeln!(w, "{}", header(&format!("Services ({})", services.len()), config))?;
    writeln!(w)?;
    writeln!(
        w,
        "  {}",
        bold(
            &format!(
                "{:<name_width$}  {:<process_width$}  {:>10}  {:>5}  DEPENDS ON",
                "SERVICE", "PROCESS", "IMPORTANCE", "MTTR"
            ),
            config
        )
    )?;

    for service in services {
        let name = format!("{:<name_width$}", service.name);
        let importance = graph.effective_importance(service);
        let depends_on = if graph.is_placeholder(&service.name) {
            warning("(undefined)", config)
        } else if service.depends_on.is_empty() {
            dimmed("-", config)
        } else {
            service.depends_on.join(", ")
        };

        writeln!(
            w,
            "  {}  {:<process_width$}  {:>10}  {:>5}  {}",
            info(&name, config),
            service.business_process,
            importance,
            service.mttr,
            depends_on
        )?;

        if let Some(description) = service.description.as_deref() {
            for line in wrap_text(description, width.saturating_sub(6)) {
                writeln!(w, "      {}", dimmed(&line, config))?;
            }
        }
    }

    writeln!(w)?;
    print_stats(w, &graph.get_graph_stats(), config)
}

/// Print aggregate graph statistics and the most critical services.
///
/// # Errors
///
/// Returns an I/O error if writing fails.
pub fn print_stats<W: Write>(w: &mut W, stats: &GraphStats, config: &OutputConfig) -> io::Result<()> {
    writeln!(w, "{}", header("Graph Statistics", config))?;
    writeln!(w)?;
    writeln!(w, "  {}: {}", bold("Services", config), stats.total_services)?;
    writeln!(w, "  {}: {}", bold("Dependencies", config), stats.total_dependencies)?;
    let cycles = stats.circular_dependencies.to_string();
    writeln!(
        w,
        "  {}: {}",
        bold("Circular dependencies", config),
        if stats.circular_dependencies > 0 {
            warning(&cycles, config)
        } else {
            cycles
        }
    )?;
    writeln!(w, "  {}: {}", bold("Isolated services", config), stats.isolated_services)?;

    if !stats.most_critical.is_empty() {
        writeln!(w)?;
        writeln!(w, "  {}:", bold("Most critical", config))?;
        for (rank, critical) in stats.most_critical.iter().enumerate() {
            writeln!(
                w,
                "    {}. {} {}",
                rank + 1,
                info(&critical.name, config),
                dimmed(&format!("({} dependent services)", critical.dependent_count), config)
            )?;
        }
    }
    Ok(())
}

/// Print each cycle closed back to its first service.
///
/// # Errors
///
/// Returns an I/O error if writing fails.
pub fn print_cycles<W: Write>(
    w: &mut W,
    cycles: &[Vec<String>],
    config: &OutputConfig,
) -> io::Result<()> {
    if cycles.is_empty() {
        writeln!(w, "{}", success("No circular dependencies detected.", config))?;
        return Ok(());
    }

    writeln!(
        w,
        "Found {} circular dependencies:",
        error(&cycles.len().to_string(), config)
    )?;
    writeln!(w)?;

    for (i, cycle) in cycles.iter().enumerate() {
        writeln!(w, "  {} {}:", warning("Cycle", config), i + 1)?;
        let mut closed = cycle.clone();
        if let Some(first) = cycle.first() {
            closed.push(first.clone());
        }
        writeln!(w, "    {}", dimmed(&format_chain(&closed), config))?;
    }
    Ok(())
}

/// Print dangling references and cycles found by validation.
///
/// # Errors
///
/// Returns an I/O error if writing fails.
pub fn print_validation<W: Write>(
    w: &mut W,
    errors: &[String],
    cycles: &[Vec<String>],
    config: &OutputConfig,
) -> io::Result<()> {
    if errors.is_empty() {
        writeln!(w, "{}", success("All dependencies are defined.", config))?;
    } else {
        writeln!(
            w,
            "Found {} dangling dependency reference(s):",
            error(&errors.len().to_string(), config)
        )?;
        for message in errors {
            writeln!(w, "  {} {message}", error("✗", config))?;
        }
    }
    writeln!(w)?;
    print_cycles(w, cycles, config)
}

/// Print the shortest cascade path from `service` to each of its dependents.
///
/// # Errors
///
/// Returns an I/O error if writing fails.
pub fn print_paths<W: Write>(
    w: &mut W,
    service: &str,
    paths: &[Vec<String>],
    config: &OutputConfig,
) -> io::Result<()> {
    if paths.is_empty() {
        writeln!(
            w,
            "{}",
            success(&format!("No services depend on {service}."), config)
        )?;
        return Ok(());
    }

    writeln!(
        w,
        "{}",
        header(
            &format!("Cascade paths from {service} ({} affected)", paths.len()),
            config
        )
    )?;
    writeln!(w)?;
    for path in paths {
        let depth = path.len().saturating_sub(1);
        writeln!(
            w,
            "  {} {}",
            dimmed(&format!("[{depth}]"), config),
            format_chain(path)
        )?;
    }
    Ok(())
}
