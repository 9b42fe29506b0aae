//! Side-by-side comparison of two simulation results.

use super::ImpactSummary;
use crate::domain::{ImpactResult, SimulationResult};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Which of two compared results had the larger total impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WorseResult {
    /// The first result; also reported on a tie.
    A,
    /// The second result.
    B,
}

impl fmt::Display for WorseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// Differences between result `a` and result `b`.
///
/// All deltas are `b - a`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultComparison {
    /// `b.total_impact_score - a.total_impact_score`.
    pub impact_diff: f64,
    /// `impact_diff` as a percentage of `a`'s total; 0 when `a`'s total is 0.
    pub impact_pct_diff: f64,
    /// Change in the number of affected services.
    pub services_diff: i64,
    /// Summary of `a`.
    pub summary_a: ImpactSummary,
    /// Summary of `b`.
    pub summary_b: ImpactSummary,
    /// Services with an impact only in `a`.
    pub only_in_a: BTreeSet<String>,
    /// Services with an impact only in `b`.
    pub only_in_b: BTreeSet<String>,
    /// Services with an impact in both.
    pub in_both: BTreeSet<String>,
    /// Highest-scoring impact of `a`.
    pub highest_a: Option<ImpactResult>,
    /// Highest-scoring impact of `b`.
    pub highest_b: Option<ImpactResult>,
    /// `B` only if `b`'s total is strictly greater.
    pub worse: WorseResult,
}

impl ResultComparison {
    /// Compare `a` against `b`.
    #[must_use]
    #[allow(clippy::cast_possible_wrap, clippy::float_cmp)]
    pub fn new(a: &SimulationResult, b: &SimulationResult) -> Self {
        let impact_diff = b.total_impact_score - a.total_impact_score;
        let impact_pct_diff = if a.total_impact_score == 0.0 {
            0.0
        } else {
            impact_diff / a.total_impact_score * 100.0
        };

        let names_a = a.affected_service_names();
        let names_b = b.affected_service_names();

        Self {
            impact_diff,
            impact_pct_diff,
            services_diff: b.total_services_affected as i64 - a.total_services_affected as i64,
            summary_a: ImpactSummary::from_result(a),
            summary_b: ImpactSummary::from_result(b),
            only_in_a: names_a.difference(&names_b).cloned().collect(),
            only_in_b: names_b.difference(&names_a).cloned().collect(),
            in_both: names_a.intersection(&names_b).cloned().collect(),
            highest_a: a.highest_impact().cloned(),
            highest_b: b.highest_impact().cloned(),
            worse: if b.total_impact_score > a.total_impact_score {
                WorseResult::B
            } else {
                WorseResult::A
            },
        }
    }

    /// The comparison with `a` and `b` swapped.
    ///
    /// Only `worse` is not a mirror image: a tie reports `A` either way.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn reversed(&self) -> Self {
        let impact_diff = -self.impact_diff;
        let total_b = self.summary_b.total_impact_score;
        Self {
            impact_diff,
            impact_pct_diff: if total_b == 0.0 {
                0.0
            } else {
                impact_diff / total_b * 100.0
            },
            services_diff: -self.services_diff,
            summary_a: self.summary_b.clone(),
            summary_b: self.summary_a.clone(),
            only_in_a: self.only_in_b.clone(),
            only_in_b: self.only_in_a.clone(),
            in_both: self.in_both.clone(),
            highest_a: self.highest_b.clone(),
            highest_b: self.highest_a.clone(),
            worse: if self.summary_a.total_impact_score > total_b {
                WorseResult::B
            } else {
                WorseResult::A
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Service;
    use chrono::Utc;

    fn impact(name: &str, score: f64) -> ImpactResult {
        ImpactResult {
            service: Service::new(name),
            is_direct_failure: true,
            affected_business_processes: vec![],
            cascade_depth: 0,
            dependent_services: vec![],
            caused_by: vec![],
            impact_score: score,
            estimated_downtime: 30,
        }
    }

    fn result(impacts: Vec<ImpactResult>) -> SimulationResult {
        SimulationResult {
            timestamp: Utc::now(),
            failed_services: vec![],
            total_impact_score: impacts.iter().map(|i| i.impact_score).sum(),
            affected_business_processes: BTreeSet::new(),
            total_services_affected: impacts.len(),
            impacts,
            peak_hours: false,
        }
    }

    #[test]
    fn diff_is_b_minus_a() {
        let a = result(vec![impact("x", 100.0), impact("y", 50.0)]);
        let b = result(vec![impact("y", 200.0), impact("z", 100.0)]);

        let cmp = ResultComparison::new(&a, &b);

        assert!((cmp.impact_diff - 150.0).abs() < 1e-9);
        assert!((cmp.impact_pct_diff - 100.0).abs() < 1e-9);
        assert_eq!(cmp.services_diff, 0);
        assert_eq!(cmp.only_in_a, BTreeSet::from(["x".to_string()]));
        assert_eq!(cmp.only_in_b, BTreeSet::from(["z".to_string()]));
        assert_eq!(cmp.in_both, BTreeSet::from(["y".to_string()]));
        assert_eq!(cmp.highest_a.as_ref().map(ImpactResult::service_name), Some("x"));
        assert_eq!(cmp.highest_b.as_ref().map(ImpactResult::service_name), Some("y"));
        assert_eq!(cmp.worse, WorseResult::B);
    }

    #[test]
    fn zero_baseline_has_zero_percentage() {
        let a = result(vec![]);
        let b = result(vec![impact("x", 10.0)]);

        let cmp = ResultComparison::new(&a, &b);

        assert!(cmp.impact_pct_diff.abs() < f64::EPSILON);
        assert_eq!(cmp.services_diff, 1);
        assert!(cmp.highest_a.is_none());
    }

    #[test]
    fn tie_reports_a() {
        let a = result(vec![impact("x", 10.0)]);
        let b = result(vec![impact("y", 10.0)]);

        assert_eq!(ResultComparison::new(&a, &b).worse, WorseResult::A);
        assert_eq!(ResultComparison::new(&b, &a).worse, WorseResult::A);
    }

    #[test]
    fn reversed_matches_swapped_arguments() {
        let a = result(vec![impact("x", 40.0)]);
        let b = result(vec![impact("x", 10.0), impact("y", 10.0)]);

        let forward = ResultComparison::new(&a, &b);
        let backward = ResultComparison::new(&b, &a);

        assert_eq!(forward.reversed(), backward);
        assert!((forward.impact_diff + backward.impact_diff).abs() < 1e-9);
        assert_eq!(forward.only_in_a, backward.only_in_b);
    }
}
