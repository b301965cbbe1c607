#![expect(
    clippy::expect_used,
    reason = "property tests use expect for readable failures"
)]

//! Property-based tests for `GaPlanner`.
//!
//! # Invariants tested
//!
//! - **Valid order:** the best order is a permutation of the free stops.
//! - **No regression:** the chosen order is never less fit than the request
//!   order.
//! - **Itinerary shape:** one ETA entry per free stop, arrivals strictly
//!   increasing even when stops coincide.
//! - **Determinism:** a fixed seed reproduces the same order.

use portwise_core::test_support::{StubRouter, sample_vessel};
use portwise_core::{ObjectiveWeights, PlanRequest, Planner, Stop};
use portwise_solver_ga::{GaConfig, GaPlanner, fitness};
use proptest::prelude::*;

fn position() -> impl Strategy<Value = (f64, f64)> {
    (-60.0_f64..60.0, -170.0_f64..170.0)
}

fn stop_set() -> impl Strategy<Value = Vec<Stop>> {
    prop::collection::vec(position(), 2..7).prop_map(|positions| {
        positions
            .into_iter()
            .map(|(lat, lon)| Stop::new(lat, lon).expect("strategy yields valid positions"))
            .collect()
    })
}

/// Stop sets where one free stop repeats another's position.
fn stop_set_with_repeat() -> impl Strategy<Value = Vec<Stop>> {
    (stop_set(), any::<prop::sample::Index>()).prop_map(|(mut stops, pick)| {
        let free = stops.len() - 1;
        let repeated = stops
            .get(1 + pick.index(free))
            .cloned()
            .expect("free stops exist");
        stops.push(repeated);
        stops
    })
}

fn planner() -> GaPlanner<StubRouter> {
    GaPlanner::new(StubRouter::scaled(1.25)).with_config(GaConfig::default().with_generations(15))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn plans_are_valid_and_never_regress(stops in stop_set(), seed in any::<u64>()) {
        let free = stops.len() - 1;
        let request = PlanRequest::new(stops, sample_vessel())
            .with_seed(seed)
            .with_start_time("2025-01-01T00:00:00Z");
        let plan = planner().plan(&request).expect("valid requests plan");

        let mut order = plan.best_order.clone();
        order.sort_unstable();
        prop_assert_eq!(order, (1..=free).collect::<Vec<_>>());

        let weights = ObjectiveWeights::default().normalized();
        prop_assert!(
            fitness(&plan.optimized_metrics, &weights) >= fitness(&plan.standard_metrics, &weights)
        );

        prop_assert_eq!(plan.eta.len(), free);
        for pair in plan.eta.windows(2) {
            if let [earlier, later] = pair {
                prop_assert!(earlier.arrival < later.arrival);
            }
        }
    }

    #[test]
    fn repeated_stops_keep_arrivals_strictly_increasing(
        stops in stop_set_with_repeat(),
        seed in any::<u64>(),
    ) {
        let free = stops.len() - 1;
        let request = PlanRequest::new(stops, sample_vessel())
            .with_seed(seed)
            .with_start_time("2025-01-01T00:00:00Z");
        let plan = planner().plan(&request).expect("valid requests plan");

        prop_assert_eq!(plan.eta.len(), free);
        for pair in plan.eta.windows(2) {
            if let [earlier, later] = pair {
                prop_assert!(earlier.arrival < later.arrival);
            }
        }
    }

    #[test]
    fn fixed_seed_reproduces_the_order(stops in stop_set(), seed in any::<u64>()) {
        let request = PlanRequest::new(stops, sample_vessel()).with_seed(seed);
        let first = planner().plan(&request).expect("valid requests plan");
        let second = planner().plan(&request).expect("valid requests plan");
        prop_assert_eq!(first.best_order, second.best_order);
        prop_assert_eq!(first.optimized_metrics, second.optimized_metrics);
    }
}
