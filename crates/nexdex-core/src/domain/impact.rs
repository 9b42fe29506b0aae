//! Simulation output records.

use super::Service;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;

fn serialize_service_name<S: Serializer>(service: &Service, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&service.name)
}

/// The impact of one service within a single simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactResult {
    /// The affected service. Serialized as its name.
    #[serde(serialize_with = "serialize_service_name")]
    pub service: Service,

    /// Whether the service was in the simulated failure set.
    pub is_direct_failure: bool,

    /// Business processes touched by this service (at most one).
    pub affected_business_processes: Vec<String>,

    /// Hops from the failed root along the shortest path; 0 for direct failures.
    pub cascade_depth: usize,

    /// Direct dependents of the service at evaluation time.
    pub dependent_services: Vec<String>,

    /// Failed roots whose failure reaches this service, in input order.
    pub caused_by: Vec<String>,

    /// Weighted impact score, rounded to two decimals.
    pub impact_score: f64,

    /// Estimated downtime in minutes (the service's MTTR).
    pub estimated_downtime: u32,
}

impl ImpactResult {
    /// Name of the affected service.
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service.name
    }
}

/// The complete output of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    /// When the simulation ran.
    pub timestamp: DateTime<Utc>,

    /// The input failure set, as given.
    pub failed_services: Vec<String>,

    /// One retained impact per affected service.
    pub impacts: Vec<ImpactResult>,

    /// Sum of retained impact scores, scaled once for peak hours.
    pub total_impact_score: f64,

    /// Union of business processes touched by any impact.
    pub affected_business_processes: BTreeSet<String>,

    /// Count of failed services plus everything reachable from them.
    pub total_services_affected: usize,

    /// Whether the peak-hours multiplier was applied.
    pub peak_hours: bool,
}

impl SimulationResult {
    /// Look up the retained impact for a service.
    #[must_use]
    pub fn impact_for(&self, name: &str) -> Option<&ImpactResult> {
        self.impacts.iter().find(|impact| impact.service.name == name)
    }

    /// Names of every service with a retained impact.
    #[must_use]
    pub fn affected_service_names(&self) -> BTreeSet<String> {
        self.impacts
            .iter()
            .map(|impact| impact.service.name.clone())
            .collect()
    }

    /// The highest-scoring impact; the first one in stored order wins ties.
    #[must_use]
    pub fn highest_impact(&self) -> Option<&ImpactResult> {
        self.impacts.iter().fold(None, |best, impact| match best {
            Some(current) if current.impact_score >= impact.impact_score => Some(current),
            _ => Some(impact),
        })
    }

    /// Impacts ordered by score, highest first. Ties keep stored order.
    #[must_use]
    pub fn impacts_by_score(&self) -> Vec<&ImpactResult> {
        let mut sorted: Vec<&ImpactResult> = self.impacts.iter().collect();
        sorted.sort_by(|a, b| b.impact_score.total_cmp(&a.impact_score));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impact(name: &str, score: f64) -> ImpactResult {
        ImpactResult {
            service: Service::new(name),
            is_direct_failure: false,
            affected_business_processes: vec![],
            cascade_depth: 1,
            dependent_services: vec![],
            caused_by: vec![],
            impact_score: score,
            estimated_downtime: 30,
        }
    }

    fn result_with(impacts: Vec<ImpactResult>) -> SimulationResult {
        SimulationResult {
            timestamp: Utc::now(),
            failed_services: vec![],
            total_impact_score: impacts.iter().map(|i| i.impact_score).sum(),
            total_services_affected: impacts.len(),
            impacts,
            affected_business_processes: BTreeSet::new(),
            peak_hours: false,
        }
    }

    #[test]
    fn highest_impact_prefers_first_on_tie() {
        let result = result_with(vec![impact("a", 5.0), impact("b", 9.0), impact("c", 9.0)]);
        assert_eq!(result.highest_impact().unwrap().service_name(), "b");
    }

    #[test]
    fn highest_impact_of_empty_result_is_none() {
        assert!(result_with(vec![]).highest_impact().is_none());
    }

    #[test]
    fn impacts_by_score_is_descending_and_stable() {
        let result = result_with(vec![impact("a", 1.0), impact("b", 3.0), impact("c", 1.0)]);
        let names: Vec<_> = result
            .impacts_by_score()
            .iter()
            .map(|i| i.service_name().to_string())
            .collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn impact_serializes_service_as_name() {
        let json = serde_json::to_value(impact("api", 12.5)).unwrap();
        assert_eq!(json["service"], "api");
        assert_eq!(json["impact_score"], 12.5);
    }
}
