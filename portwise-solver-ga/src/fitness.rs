//! Weighted inverse-cost fitness.

use portwise_core::{ObjectiveWeights, RouteMetrics};

/// Added to every denominator so zero costs stay finite.
pub const FITNESS_EPSILON: f64 = 1e-6;

/// Fitness of a route; higher is better.
///
/// Each objective contributes its weight divided by its cost, so a route
/// with zero congestion earns a large but finite reward. `weights` should
/// already be normalized.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "fitness blends floating-point route costs"
)]
pub fn fitness(metrics: &RouteMetrics, weights: &ObjectiveWeights) -> f64 {
    weights.fuel / (metrics.fuel_liters + FITNESS_EPSILON)
        + weights.time / (metrics.travel_time_hours + FITNESS_EPSILON)
        + weights.congestion / (metrics.congestion_hours + FITNESS_EPSILON)
}

#[cfg(test)]
#[expect(clippy::float_arithmetic, reason = "tests compare scores against closed forms")]
mod tests {
    use super::*;
    use rstest::rstest;

    fn metrics(fuel_liters: f64, travel_time_hours: f64, congestion_hours: f64) -> RouteMetrics {
        RouteMetrics {
            fuel_liters,
            travel_time_hours,
            congestion_hours,
            ..RouteMetrics::default()
        }
    }

    #[rstest]
    fn cheaper_routes_score_higher() {
        let weights = ObjectiveWeights::default();
        let cheap = fitness(&metrics(100.0, 10.0, 1.0), &weights);
        let dear = fitness(&metrics(200.0, 20.0, 2.0), &weights);
        assert!(cheap > dear);
    }

    #[rstest]
    fn zero_costs_stay_finite() {
        let score = fitness(&RouteMetrics::default(), &ObjectiveWeights::default());
        assert!(score.is_finite());
        assert!((score - 1.0 / FITNESS_EPSILON).abs() < 1e-3);
    }

    #[rstest]
    fn unweighted_objectives_are_ignored() {
        let fuel_only = ObjectiveWeights::new(1.0, 0.0, 0.0);
        let lhs = fitness(&metrics(50.0, 1.0, 0.0), &fuel_only);
        let rhs = fitness(&metrics(50.0, 900.0, 40.0), &fuel_only);
        assert!((lhs - rhs).abs() < 1e-12);
    }
}
