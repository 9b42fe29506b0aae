//! Failure simulation over a [`DependencyGraph`].
//!
//! The engine borrows a graph, so one loaded graph can serve any number of
//! engines. Simulations are pure: the same graph and inputs always produce
//! the same scores, only the timestamp differs.
//!
//! # Aggregation
//!
//! A service reachable from several failed roots is scored once per root
//! (at that root's cascade depth) and only the highest score is kept. Scores
//! are never summed across roots, so shared downstream services are not
//! double counted. The peak-hours multiplier is applied once to the total.

mod compare;
pub mod score;
mod summary;

pub use compare::{ResultComparison, WorseResult};
pub use summary::ImpactSummary;

use crate::domain::{ImpactResult, Scenario, Service, SimulationResult};
use crate::error::{Error, Result};
use crate::graph::DependencyGraph;
use chrono::Utc;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Scale applied to the total impact of a failure during peak hours.
pub const PEAK_HOURS_MULTIPLIER: f64 = 1.2;

/// Simulates service failures against a borrowed graph.
#[derive(Debug, Clone, Copy)]
pub struct SimulationEngine<'g> {
    graph: &'g DependencyGraph,
}

impl<'g> SimulationEngine<'g> {
    /// Create an engine over the given graph.
    #[must_use]
    pub fn new(graph: &'g DependencyGraph) -> Self {
        Self { graph }
    }

    /// The graph this engine reads.
    #[must_use]
    pub fn graph(&self) -> &'g DependencyGraph {
        self.graph
    }

    /// Simulate the simultaneous failure of `failed_services`.
    ///
    /// # Errors
    ///
    /// Returns `Error::ServiceNotFound` naming the first unknown service.
    /// Nothing is simulated in that case.
    pub fn simulate_failure<S: AsRef<str>>(
        &self,
        failed_services: &[S],
        peak_hours: bool,
    ) -> Result<SimulationResult> {
        let failed: Vec<String> = failed_services
            .iter()
            .map(|name| name.as_ref().to_string())
            .collect();
        if let Some(missing) = failed.iter().find(|name| !self.graph.contains(name)) {
            return Err(Error::ServiceNotFound(missing.clone()));
        }

        tracing::debug!(failed = ?failed, peak_hours, "Simulating failure");

        let mut roots: Vec<&Service> = Vec::new();
        for name in &failed {
            let service = self.service(name)?;
            if !roots.contains(&service) {
                roots.push(service);
            }
        }
        let failed_set: HashSet<&str> = roots.iter().map(|s| s.name.as_str()).collect();

        // Retained impacts keyed by name; `order` records first discovery.
        let mut order: Vec<String> = Vec::new();
        let mut retained: HashMap<String, ImpactResult> = HashMap::new();
        let mut caused_by: HashMap<String, Vec<String>> = HashMap::new();
        let mut affected: HashSet<String> = failed_set.iter().map(ToString::to_string).collect();

        for root in &roots {
            order.push(root.name.clone());
            retained.insert(root.name.clone(), self.calculate_impact(root, None));
        }

        for root in &roots {
            for (name, depth) in self.graph.get_cascade_depths(&root.name) {
                affected.insert(name.clone());
                if failed_set.contains(name.as_str()) {
                    continue;
                }
                caused_by
                    .entry(name.clone())
                    .or_default()
                    .push(root.name.clone());

                let candidate = self.calculate_impact(self.service(&name)?, Some(depth));
                match retained.get(&name) {
                    Some(existing) if existing.impact_score >= candidate.impact_score => {}
                    Some(_) => {
                        retained.insert(name, candidate);
                    }
                    None => {
                        order.push(name.clone());
                        retained.insert(name, candidate);
                    }
                }
            }
        }

        let impacts: Vec<ImpactResult> = order
            .iter()
            .filter_map(|name| {
                let mut impact = retained.remove(name)?;
                if let Some(roots) = caused_by.remove(name) {
                    impact.caused_by = roots;
                }
                Some(impact)
            })
            .collect();

        let affected_business_processes: BTreeSet<String> = impacts
            .iter()
            .flat_map(|impact| impact.affected_business_processes.iter().cloned())
            .collect();

        let mut total_impact_score: f64 = impacts.iter().map(|impact| impact.impact_score).sum();
        if peak_hours {
            total_impact_score *= PEAK_HOURS_MULTIPLIER;
        }

        tracing::debug!(
            impacts = impacts.len(),
            affected = affected.len(),
            total = total_impact_score,
            "Simulation complete"
        );

        Ok(SimulationResult {
            timestamp: Utc::now(),
            failed_services: failed,
            impacts,
            total_impact_score,
            affected_business_processes,
            total_services_affected: affected.len(),
            peak_hours,
        })
    }

    fn service(&self, name: &str) -> Result<&'g Service> {
        self.graph
            .get_service(name)
            .ok_or_else(|| Error::ServiceNotFound(name.to_string()))
    }

    /// Score one service. `depth` is `None` for a direct failure.
    fn calculate_impact(&self, service: &Service, depth: Option<usize>) -> ImpactResult {
        let dependents = self.graph.get_dependents(&service.name);
        let importance = self.graph.effective_importance(service);
        let impact_score = score::impact_score(service.mttr, importance, depth, dependents.len());

        ImpactResult {
            service: service.clone(),
            is_direct_failure: depth.is_none(),
            affected_business_processes: service.process().map(str::to_string).into_iter().collect(),
            cascade_depth: depth.unwrap_or(0),
            dependent_services: dependents,
            caused_by: Vec::new(),
            impact_score,
            estimated_downtime: service.mttr,
        }
    }

    /// Run each scenario with its own peak-hours flag.
    ///
    /// # Errors
    ///
    /// Returns `Error::ServiceNotFound` for the first scenario that names an
    /// unknown service.
    pub fn simulate_scenarios(&self, scenarios: &[Scenario]) -> Result<Vec<SimulationResult>> {
        scenarios
            .iter()
            .map(|scenario| {
                self.simulate_failure(scenario.failed_services.as_slice(), scenario.peak_hours)
            })
            .collect()
    }

    /// Shortest propagation path from `name` to each service it affects.
    ///
    /// Sorted by target name. Empty for unknown services.
    #[must_use]
    pub fn find_critical_paths(&self, name: &str) -> Vec<Vec<String>> {
        self.graph
            .get_all_dependents(name)
            .iter()
            .filter_map(|target| self.graph.get_cascade_path(name, target))
            .collect()
    }

    /// The single service whose failure has the highest total impact.
    ///
    /// Services are tried in name order and the first maximum wins. Returns
    /// `None` for an empty graph or when every total is zero. Runs one full
    /// simulation per service, so it is meant for small graphs.
    ///
    /// # Errors
    ///
    /// Propagates simulation errors; none are expected for known services.
    pub fn get_worst_case_scenario(&self) -> Result<Option<String>> {
        let mut worst: Option<(String, f64)> = None;
        for service in self.graph.services() {
            let result = self.simulate_failure(&[&service.name], false)?;
            let current = worst.as_ref().map_or(0.0, |(_, total)| *total);
            if result.total_impact_score > current {
                worst = Some((service.name.clone(), result.total_impact_score));
            }
        }
        Ok(worst.map(|(name, _)| name))
    }

    /// Summarize a result.
    #[must_use]
    pub fn get_impact_summary(&self, result: &SimulationResult) -> ImpactSummary {
        ImpactSummary::from_result(result)
    }

    /// Business processes ranked by summed impact score.
    ///
    /// Sorted by score descending, then by process name; at most `limit` entries.
    #[must_use]
    pub fn get_top_business_processes(
        &self,
        result: &SimulationResult,
        limit: usize,
    ) -> Vec<(String, f64)> {
        summary::top_business_processes(result, limit)
    }

    /// Compare two results; see [`ResultComparison`].
    #[must_use]
    pub fn compare_results(&self, a: &SimulationResult, b: &SimulationResult) -> ResultComparison {
        ResultComparison::new(a, b)
    }
}
