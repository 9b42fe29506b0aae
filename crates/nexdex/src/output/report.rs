//! Simulation, comparison, and scenario reports.

use super::color::{bold, colorize_delta, colorize_kind, dimmed, error, header, info, warning};
use super::{format_score, print_name_list, wrap_text, OutputConfig};
use nexdex_core::{ImpactSummary, ResultComparison, Scenario, SimulationResult, WorseResult};
use std::io::{self, Write};

/// How many business processes the simulation report ranks.
pub const TOP_PROCESSES: usize = 5;

/// A dimmed label padded to a fixed column.
fn label(text: &str, config: &OutputConfig) -> String {
    dimmed(&format!("{text:<22}"), config)
}

/// Print a simulation summary, its impacts sorted by score, and the top processes.
///
/// # Errors
///
/// Returns an I/O error if writing fails.
pub fn print_simulation<W: Write>(
    w: &mut W,
    result: &SimulationResult,
    summary: &ImpactSummary,
    top_processes: &[(String, f64)],
    config: &OutputConfig,
) -> io::Result<()> {
    let mut title = format!("Simulated failure: {}", result.failed_services.join(", "));
    if result.peak_hours {
        title.push_str(" (peak hours)");
    }
    writeln!(w, "{}", header(&title, config))?;
    writeln!(w)?;

    writeln!(
        w,
        "  {}{} ({} direct, {} cascading)",
        label("Services affected:", config),
        bold(&summary.total_services_affected.to_string(), config),
        summary.direct_failures,
        summary.cascade_failures
    )?;
    writeln!(
        w,
        "  {}{}",
        label("Business processes:", config),
        summary.business_processes_affected
    )?;
    writeln!(
        w,
        "  {}{}",
        label("Total impact score:", config),
        bold(&format_score(summary.total_impact_score), config)
    )?;
    writeln!(
        w,
        "  {}{}",
        label("Average per service:", config),
        format_score(summary.average_impact_per_service)
    )?;
    if let Some(highest) = &summary.highest_impact_service {
        writeln!(
            w,
            "  {}{}",
            label("Highest impact:", config),
            info(highest, config)
        )?;
    }

    writeln!(w)?;
    writeln!(w, "{}", bold("Affected business processes:", config))?;
    let processes: Vec<&String> = result.affected_business_processes.iter().collect();
    print_name_list(w, &processes, "none", config)?;

    writeln!(w)?;
    writeln!(w, "{}", bold("Impacts:", config))?;
    let impacts = result.impacts_by_score();
    let name_width = impacts
        .iter()
        .map(|impact| impact.service_name().len())
        .max()
        .unwrap_or(0)
        .max(7);
    writeln!(
        w,
        "  {}",
        dimmed(
            &format!(
                "{:<name_width$}  {:<8}  {:>5}  {:>10}  {:>8}  CAUSED BY",
                "SERVICE", "KIND", "DEPTH", "SCORE", "DOWNTIME"
            ),
            config
        )
    )?;
    for impact in impacts {
        let kind = if impact.is_direct_failure { "direct" } else { "cascade" };
        writeln!(
            w,
            "  {}  {}  {:>5}  {:>10}  {:>8}  {}",
            info(&format!("{:<name_width$}", impact.service_name()), config),
            colorize_kind(impact.is_direct_failure, &format!("{kind:<8}"), config),
            impact.cascade_depth,
            format_score(impact.impact_score),
            format!("{}m", impact.estimated_downtime),
            impact.caused_by.join(", ")
        )?;
    }

    if !top_processes.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}", bold("Top business processes:", config))?;
        for (rank, (process, score)) in top_processes.iter().enumerate() {
            writeln!(
                w,
                "    {}. {process}  {}",
                rank + 1,
                dimmed(&format_score(*score), config)
            )?;
        }
    }
    Ok(())
}

fn signed(value: f64) -> String {
    format!("{value:+.2}")
}

/// Print a side-by-side comparison of two named results.
///
/// # Errors
///
/// Returns an I/O error if writing fails.
pub fn print_comparison<W: Write>(
    w: &mut W,
    name_a: &str,
    name_b: &str,
    comparison: &ResultComparison,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "{}",
        header(&format!("Comparing A: {name_a}  vs  B: {name_b}"), config)
    )?;
    writeln!(w)?;

    let a = &comparison.summary_a;
    let b = &comparison.summary_b;
    writeln!(w, "  {:<20}{:>12}{:>12}  DIFF", "", "A", "B")?;

    let impact_delta = format!(
        "{} ({:+.1}%)",
        signed(comparison.impact_diff),
        comparison.impact_pct_diff
    );
    writeln!(
        w,
        "  {:<20}{:>12}{:>12}  {}",
        "Total impact",
        format_score(a.total_impact_score),
        format_score(b.total_impact_score),
        colorize_delta(comparison.impact_diff, &impact_delta, config)
    )?;
    #[allow(clippy::cast_precision_loss)]
    let services_delta = comparison.services_diff as f64;
    writeln!(
        w,
        "  {:<20}{:>12}{:>12}  {}",
        "Services affected",
        a.total_services_affected,
        b.total_services_affected,
        colorize_delta(services_delta, &format!("{:+}", comparison.services_diff), config)
    )?;
    writeln!(
        w,
        "  {:<20}{:>12}{:>12}",
        "Direct failures", a.direct_failures, b.direct_failures
    )?;
    writeln!(
        w,
        "  {:<20}{:>12}{:>12}",
        "Cascading failures", a.cascade_failures, b.cascade_failures
    )?;
    writeln!(
        w,
        "  {:<20}{:>12}{:>12}",
        "Business processes", a.business_processes_affected, b.business_processes_affected
    )?;
    let highest = |impact: Option<&nexdex_core::ImpactResult>| {
        impact.map_or_else(|| "-".to_string(), |i| i.service_name().to_string())
    };
    writeln!(
        w,
        "  {:<20}{:>12}{:>12}",
        "Highest impact",
        highest(comparison.highest_a.as_ref()),
        highest(comparison.highest_b.as_ref())
    )?;

    for (title, names) in [
        ("Only in A", &comparison.only_in_a),
        ("Only in B", &comparison.only_in_b),
        ("In both", &comparison.in_both),
    ] {
        writeln!(w)?;
        writeln!(w, "{} ({}):", bold(title, config), names.len())?;
        let names: Vec<&String> = names.iter().collect();
        print_name_list(w, &names, "none", config)?;
    }

    writeln!(w)?;
    let worse_name = match comparison.worse {
        WorseResult::A => name_a,
        WorseResult::B => name_b,
    };
    writeln!(
        w,
        "{} {} ({worse_name})",
        bold("Worse:", config),
        error(&comparison.worse.to_string(), config)
    )
}

/// Print saved scenarios with their tags and failure sets.
///
/// # Errors
///
/// Returns an I/O error if writing fails.
pub fn print_scenarios<W: Write>(
    w: &mut W,
    scenarios: &[Scenario],
    config: &OutputConfig,
) -> io::Result<()> {
    if scenarios.is_empty() {
        writeln!(w, "No saved scenarios found.")?;
        return Ok(());
    }

    writeln!(
        w,
        "{}",
        header(&format!("Saved scenarios ({})", scenarios.len()), config)
    )?;
    let width = config.content_width();

    for scenario in scenarios {
        writeln!(w)?;
        let mut line = info(&scenario.name, config);
        if !scenario.tags.is_empty() {
            line.push_str(&format!("  {}", dimmed(&format!("[{}]", scenario.tags.join(", ")), config)));
        }
        if scenario.peak_hours {
            line.push_str(&format!("  {}", warning("peak hours", config)));
        }
        writeln!(w, "  {line}")?;

        for text in wrap_text(&scenario.description, width.saturating_sub(4)) {
            writeln!(w, "    {text}")?;
        }
        writeln!(
            w,
            "    {} {}    {} {}",
            dimmed("Fails:", config),
            scenario.failed_services.join(", "),
            dimmed("Created:", config),
            scenario.created_at.format("%Y-%m-%d %H:%M")
        )?;
    }
    Ok(())
}

/// Print one row per simulated scenario and name the worst.
///
/// # Errors
///
/// Returns an I/O error if writing fails.
pub fn print_batch<W: Write>(
    w: &mut W,
    runs: &[(Scenario, SimulationResult)],
    config: &OutputConfig,
) -> io::Result<()> {
    if runs.is_empty() {
        writeln!(w, "No scenarios to run.")?;
        return Ok(());
    }

    writeln!(
        w,
        "{}",
        header(&format!("Batch results ({} scenarios)", runs.len()), config)
    )?;
    writeln!(w)?;

    let name_width = runs
        .iter()
        .map(|(scenario, _)| scenario.name.len())
        .max()
        .unwrap_or(0)
        .max(8);
    writeln!(
        w,
        "  {}",
        dimmed(
            &format!(
                "{:<name_width$}  {:>6}  {:>8}  {:>12}  PEAK",
                "SCENARIO", "FAILED", "AFFECTED", "TOTAL"
            ),
            config
        )
    )?;
    for (scenario, result) in runs {
        writeln!(
            w,
            "  {}  {:>6}  {:>8}  {:>12}  {}",
            info(&format!("{:<name_width$}", scenario.name), config),
            result.failed_services.len(),
            result.total_services_affected,
            format_score(result.total_impact_score),
            if result.peak_hours { "yes" } else { "no" }
        )?;
    }

    // First maximum wins, matching the worst-case search.
    let worst = runs.iter().fold(None::<&(Scenario, SimulationResult)>, |worst, run| {
        match worst {
            Some(current) if current.1.total_impact_score >= run.1.total_impact_score => {
                Some(current)
            }
            _ => Some(run),
        }
    });
    if let Some((scenario, result)) = worst {
        writeln!(w)?;
        writeln!(
            w,
            "{} {} ({})",
            bold("Worst:", config),
            error(&scenario.name, config),
            format_score(result.total_impact_score)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexdex_core::{DependencyGraph, Service, SimulationEngine};

    fn plain() -> OutputConfig {
        OutputConfig::new(80, false)
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buffer = Vec::new();
        f(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn chain() -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for service in [
            Service::new("db").with_business_process("Storage"),
            Service::new("api").with_depends_on(["db"]).with_business_process("Checkout"),
            Service::new("web").with_depends_on(["api"]),
        ] {
            graph.add_service(service).unwrap();
        }
        graph
    }

    #[test]
    fn simulation_report_sections() {
        let graph = chain();
        let engine = SimulationEngine::new(&graph);
        let result = engine.simulate_failure(&["db"], true).unwrap();
        let summary = engine.get_impact_summary(&result);
        let top = engine.get_top_business_processes(&result, TOP_PROCESSES);

        let text = render(|w| print_simulation(w, &result, &summary, &top, &plain()));

        assert!(text.contains("Simulated failure: db (peak hours)"));
        assert!(text.contains("3 (1 direct, 2 cascading)"));
        assert!(text.contains("• Checkout"));
        assert!(text.contains("Top business processes:"));
        let db_row = text.lines().position(|l| l.trim_start().starts_with("db ")).unwrap();
        let web_row = text.lines().position(|l| l.trim_start().starts_with("web ")).unwrap();
        assert!(db_row < web_row, "impacts should be sorted by score");
    }

    #[test]
    fn comparison_names_the_worse_result() {
        let graph = chain();
        let engine = SimulationEngine::new(&graph);
        let a = engine.simulate_failure(&["web"], false).unwrap();
        let b = engine.simulate_failure(&["db"], false).unwrap();

        let comparison = engine.compare_results(&a, &b);
        let text = render(|w| print_comparison(w, "leaf", "root", &comparison, &plain()));

        assert!(text.contains("Comparing A: leaf  vs  B: root"));
        assert!(text.contains("Only in B (2):"));
        assert!(text.contains("In both (1):"));
        assert!(text.contains("Worse: B (root)"));
    }

    #[test]
    fn scenarios_show_tags_and_failures() {
        let scenarios = vec![
            Scenario::new("db-outage", ["db"])
                .with_description("Primary database is gone")
                .with_tags(["storage"])
                .with_peak_hours(true),
        ];

        let text = render(|w| print_scenarios(w, &scenarios, &plain()));

        assert!(text.contains("db-outage  [storage]  peak hours"));
        assert!(text.contains("Primary database is gone"));
        assert!(text.contains("Fails: db"));
    }

    #[test]
    fn batch_picks_first_worst() {
        let graph = chain();
        let engine = SimulationEngine::new(&graph);
        let scenarios = vec![
            Scenario::new("first", ["db"]),
            Scenario::new("second", ["db"]),
            Scenario::new("small", ["web"]),
        ];
        let results = engine.simulate_scenarios(&scenarios).unwrap();
        let runs: Vec<_> = scenarios.into_iter().zip(results).collect();

        let text = render(|w| print_batch(w, &runs, &plain()));

        assert!(text.contains("Batch results (3 scenarios)"));
        assert!(text.contains("Worst: first"));
    }
}
