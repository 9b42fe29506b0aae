//! Result summaries and per-process rollups.

use crate::domain::SimulationResult;
use serde::Serialize;
use std::collections::BTreeMap;

/// Headline numbers for one simulation result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactSummary {
    /// Failed services plus everything reachable from them.
    pub total_services_affected: usize,
    /// Impacts on services in the failure set.
    pub direct_failures: usize,
    /// Impacts on services reached by propagation.
    pub cascade_failures: usize,
    /// Distinct business processes touched.
    pub business_processes_affected: usize,
    /// Total impact score (peak-scaled if applicable).
    pub total_impact_score: f64,
    /// Total score divided by services affected; 0 when nothing is affected.
    pub average_impact_per_service: f64,
    /// The highest-scoring service; ties go to the first in stored order.
    pub highest_impact_service: Option<String>,
}

impl ImpactSummary {
    /// Summarize a result.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_result(result: &SimulationResult) -> Self {
        let direct_failures = result
            .impacts
            .iter()
            .filter(|impact| impact.is_direct_failure)
            .count();

        let average_impact_per_service = if result.total_services_affected > 0 {
            result.total_impact_score / result.total_services_affected as f64
        } else {
            0.0
        };

        Self {
            total_services_affected: result.total_services_affected,
            direct_failures,
            cascade_failures: result.impacts.len() - direct_failures,
            business_processes_affected: result.affected_business_processes.len(),
            total_impact_score: result.total_impact_score,
            average_impact_per_service,
            highest_impact_service: result
                .highest_impact()
                .map(|impact| impact.service_name().to_string()),
        }
    }
}

/// Business processes ranked by summed impact score, then by name.
pub(super) fn top_business_processes(result: &SimulationResult, limit: usize) -> Vec<(String, f64)> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for impact in &result.impacts {
        for process in &impact.affected_business_processes {
            if !process.is_empty() {
                *totals.entry(process.as_str()).or_default() += impact.impact_score;
            }
        }
    }

    let mut ranked: Vec<(String, f64)> = totals
        .into_iter()
        .map(|(process, total)| (process.to_string(), total))
        .collect();
    // BTreeMap order is by name, and the sort is stable, so ties stay alphabetical.
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(limit);
    ranked
}
