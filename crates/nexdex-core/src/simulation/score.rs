//! Impact score formula.
//!
//! ```text
//! base_impact           = mttr * effective_importance
//! cascade_multiplier    = 1.0                          (direct failure)
//!                       = 1.0 / (1 + depth * 0.5)      (cascade)
//! dependency_multiplier = 1.0                          (no dependents)
//!                       = log2(1 + dependents)         (otherwise)
//! impact_score          = round2(base * cascade * dependency)
//! ```

/// Discount applied per hop of cascade depth.
const CASCADE_DEPTH_FACTOR: f64 = 0.5;

/// Multiplier for a failure `depth` hops away from its root.
///
/// `None` marks a direct failure.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn cascade_multiplier(depth: Option<usize>) -> f64 {
    match depth {
        None => 1.0,
        Some(depth) => 1.0 / (1.0 + depth as f64 * CASCADE_DEPTH_FACTOR),
    }
}

/// Amplification for services with direct dependents.
///
/// A service with no dependents gets 1.0 rather than `log2(1) = 0`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn dependency_multiplier(dependents: usize) -> f64 {
    if dependents == 0 {
        1.0
    } else {
        (1.0 + dependents as f64).log2()
    }
}

/// Round to two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Score one service.
///
/// `importance` must already be the effective (clamped) importance.
#[must_use]
pub fn impact_score(mttr: u32, importance: u8, depth: Option<usize>, dependents: usize) -> f64 {
    let base = f64::from(mttr) * f64::from(importance);
    round2(base * cascade_multiplier(depth) * dependency_multiplier(dependents))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::direct_leaf(30, 5, None, 0, 150.0)]
    #[case::direct_with_one_dependent(30, 5, None, 1, 150.0)]
    #[case::direct_with_three_dependents(30, 5, None, 3, 300.0)]
    #[case::depth_one(30, 5, Some(1), 1, 100.0)]
    #[case::depth_two(30, 5, Some(2), 0, 75.0)]
    #[case::zero_mttr(0, 10, None, 7, 0.0)]
    #[case::rounded(10, 3, Some(1), 2, 31.70)]
    fn score_cases(
        #[case] mttr: u32,
        #[case] importance: u8,
        #[case] depth: Option<usize>,
        #[case] dependents: usize,
        #[case] expected: f64,
    ) {
        let score = impact_score(mttr, importance, depth, dependents);
        assert!(
            (score - expected).abs() < 1e-9,
            "expected {expected}, got {score}"
        );
    }

    #[test]
    fn no_dependents_is_neutral() {
        assert!((dependency_multiplier(0) - 1.0).abs() < f64::EPSILON);
        assert!((dependency_multiplier(1) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert!((round2(1.005_1) - 1.01).abs() < 1e-9);
        assert!((round2(2.344) - 2.34).abs() < 1e-9);
    }
}
