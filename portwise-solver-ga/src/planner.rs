//! [`GaPlanner`]: the voyage planning pipeline around the genetic search.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use log::{info, warn};
use portwise_core::congestion::{PortDelayLookup, resolve_base_delays};
use portwise_core::eta::resolve_start_time;
use portwise_core::{
    DistanceEngine, DistanceEngineConfig, EtaScheduler, LegRouter, PlanDiagnostics, PlanError,
    PlanRequest, PlanResponse, Planner, RouteEvaluator, VesselPerformance,
};

use crate::fitness::fitness;
use crate::ga::{GaConfig, GeneticOptimizer};

/// Plans voyages by building a distance matrix with `R` and searching
/// visiting orders with [`GeneticOptimizer`].
///
/// # Examples
///
/// ```
/// use portwise_core::{GreatCircleRouter, PlanRequest, Planner, Stop, VesselProfile};
/// use portwise_core::vessel::FuelCurveSample;
/// use portwise_solver_ga::{GaConfig, GaPlanner};
///
/// let stops = vec![
///     Stop::new(51.9, 4.4)?,
///     Stop::new(53.5, 9.9)?,
///     Stop::new(51.2, 4.4)?,
/// ];
/// let vessel = VesselProfile::new("Feeder", vec![FuelCurveSample::new(14.0, 2.0)]);
/// let planner = GaPlanner::new(GreatCircleRouter)
///     .with_config(GaConfig::default().with_generations(20));
/// let plan = planner.plan(&PlanRequest::new(stops, vessel).with_seed(7))?;
/// assert_eq!(plan.eta.len(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct GaPlanner<R> {
    engine: DistanceEngine<R>,
    config: GaConfig,
    delays: Option<Arc<dyn PortDelayLookup>>,
    cancel: Option<Arc<AtomicBool>>,
}

impl<R: LegRouter> GaPlanner<R> {
    /// Planner routing legs with `router` and default settings.
    pub fn new(router: R) -> Self {
        Self {
            engine: DistanceEngine::new(router),
            config: GaConfig::default(),
            delays: None,
            cancel: None,
        }
    }

    /// Replace the distance engine settings.
    #[must_use]
    pub fn with_engine_config(self, config: DistanceEngineConfig) -> Self {
        let Self {
            engine,
            config: ga,
            delays,
            cancel,
        } = self;
        Self {
            engine: DistanceEngine::with_config(engine.into_router(), config),
            config: ga,
            delays,
            cancel,
        }
    }

    /// Replace the search settings.
    #[must_use]
    pub fn with_config(mut self, config: GaConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolve per-country base delays through `lookup` for stops without a
    /// congestion index.
    #[must_use]
    pub fn with_delay_lookup(mut self, lookup: Arc<dyn PortDelayLookup>) -> Self {
        self.delays = Some(lookup);
        self
    }

    /// Share a cancellation flag with the search.
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Search settings in use.
    #[must_use]
    pub const fn config(&self) -> &GaConfig {
        &self.config
    }

    fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Optimizer sharing the cancel flag, left with whatever part of the
    /// time limit the run has not yet spent.
    fn optimizer(&self, started: Instant) -> GeneticOptimizer {
        let mut config = self.config.clone();
        config.time_limit = config
            .time_limit
            .map(|limit| limit.saturating_sub(started.elapsed()));
        let optimizer = GeneticOptimizer::new(config);
        match &self.cancel {
            Some(flag) => optimizer.with_cancel_flag(Arc::clone(flag)),
            None => optimizer,
        }
    }
}

impl<R: LegRouter> Planner for GaPlanner<R> {
    fn plan(&self, request: &PlanRequest) -> Result<PlanResponse, PlanError> {
        request.validate()?;
        let started = Instant::now();

        let deadline = self.config.time_limit;
        let interrupted =
            || self.cancelled() || deadline.is_some_and(|limit| started.elapsed() >= limit);
        let build = self.engine.build_matrix_until(&request.stops, &interrupted);
        if build.fallback_legs > 0 {
            warn!(
                "{} legs fell back to great-circle distance",
                build.fallback_legs
            );
        }
        let base_delays = resolve_base_delays(&request.stops, self.delays.as_deref());
        let performance = VesselPerformance::from_profile(&request.vessel);
        let evaluator = RouteEvaluator::new(&build.matrix, performance, &base_delays)
            .with_round_trip(request.round_trip);
        let weights = request.weights.normalized();
        let seed = request.seed.unwrap_or_else(rand::random);

        let search = self.optimizer(started).optimize(evaluator.free_stops(), seed, |order| {
            fitness(&evaluator.metrics(order), &weights)
        });

        let as_given = evaluator.as_given_order();
        let standard_metrics = evaluator.metrics(&as_given);
        let optimized_metrics = evaluator.metrics(&search.order);

        let start = resolve_start_time(request.start_time.as_deref());
        let scheduler = EtaScheduler::new(performance.average_speed_kmh(), request.port_stay_hours);
        let sailed = evaluator.sailed_order(&search.order);
        let eta = scheduler.schedule(&request.stops, &build.matrix, &sailed, start);
        let route_geometry = build.matrix.voyage_geometry(&sailed);
        let congestion = evaluator.congestion(&search.order);

        let diagnostics = PlanDiagnostics {
            generations: search.generations,
            evaluations: search.evaluations,
            elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            seed,
            fallback_legs: build.fallback_legs,
            skipped_legs: build.skipped_legs,
            stop_reason: search.stop_reason,
            best_fitness: search.fitness,
        };
        info!(
            "planned {} stops in {} ms: {:.1} km, {:.0} L fuel, order {:?}",
            request.stops.len(),
            diagnostics.elapsed_ms,
            optimized_metrics.distance_km,
            optimized_metrics.fuel_liters,
            search.order
        );

        Ok(PlanResponse {
            standard_metrics,
            optimized_metrics,
            best_order: search.order,
            route_geometry,
            eta,
            congestion,
            diagnostics,
        })
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    clippy::expect_used,
    reason = "tests compare distances and unwrap known-good plans"
)]
mod tests {
    use super::*;
    use std::time::Duration;
    use portwise_core::test_support::{FailingRouter, StubRouter, sample_vessel, square_stops, stops};
    use portwise_core::{ObjectiveWeights, PlanRequestValidationError, StopReason};
    use rstest::rstest;

    /// Every permutation of `1..n`.
    fn permutations(n: usize) -> Vec<Vec<usize>> {
        let mut all = vec![Vec::new()];
        for _ in 1..n {
            all = all
                .into_iter()
                .flat_map(|prefix: Vec<usize>| {
                    (1..n)
                        .filter(|stop| !prefix.contains(stop))
                        .map(|stop| {
                            let mut next = prefix.clone();
                            next.push(stop);
                            next
                        })
                        .collect::<Vec<_>>()
                })
                .collect();
        }
        all
    }

    fn quick() -> GaConfig {
        GaConfig::default().with_generations(40)
    }

    #[rstest]
    fn square_voyage_matches_brute_force() {
        let request = PlanRequest::new(square_stops(), sample_vessel()).with_seed(11);
        let planner = GaPlanner::new(StubRouter::scaled(1.0)).with_config(quick());
        let plan = planner.plan(&request).expect("plan succeeds");

        let build = DistanceEngine::new(StubRouter::scaled(1.0)).build_matrix(&request.stops);
        let delays = resolve_base_delays(&request.stops, None);
        let evaluator = RouteEvaluator::new(
            &build.matrix,
            VesselPerformance::from_profile(&request.vessel),
            &delays,
        );
        let shortest = permutations(4)
            .iter()
            .map(|order| evaluator.distance_km(order))
            .fold(f64::INFINITY, f64::min);
        assert!((plan.optimized_metrics.distance_km - shortest).abs() < 1e-6);
        assert!(plan.best_order == vec![1, 2, 3] || plan.best_order == vec![3, 2, 1]);
    }

    #[rstest]
    fn fixed_seed_is_reproducible() {
        let request = PlanRequest::new(
            stops(&[(0.0, 0.0), (4.0, 3.0), (-2.0, 6.0), (5.0, -4.0), (1.0, 8.0)]),
            sample_vessel(),
        )
        .with_seed(99)
        .with_start_time("2025-03-01T00:00:00Z");
        let planner = GaPlanner::new(StubRouter::scaled(1.2)).with_config(quick());
        let first = planner.plan(&request).expect("plan succeeds");
        let second = planner.plan(&request).expect("plan succeeds");
        assert_eq!(first.best_order, second.best_order);
        assert_eq!(first.eta, second.eta);
        assert_eq!(first.diagnostics.seed, 99);
    }

    #[rstest]
    fn optimized_is_never_worse_than_as_given() {
        let request = PlanRequest::new(
            stops(&[(0.0, 0.0), (6.0, 6.0), (1.0, 1.0), (5.0, 5.0), (2.0, 2.0)]),
            sample_vessel(),
        )
        .with_weights(ObjectiveWeights::new(1.0, 1.0, 0.0))
        .with_seed(3);
        let plan = GaPlanner::new(StubRouter::scaled(1.0))
            .with_config(quick())
            .plan(&request)
            .expect("plan succeeds");
        assert!(plan.optimized_metrics.distance_km <= plan.standard_metrics.distance_km + 1e-9);
        assert_eq!(plan.eta.len(), 4);
        assert_eq!(plan.congestion.stops.len(), 5);
    }

    #[rstest]
    fn routing_outage_still_plans() {
        let request = PlanRequest::new(
            stops(&[(51.9, 4.4), (1.29, 103.85), (-29.87, 31.03)]),
            sample_vessel(),
        )
        .with_seed(5);
        let plan = GaPlanner::new(FailingRouter::timeout())
            .with_config(quick())
            .plan(&request)
            .expect("fallback legs still plan");
        assert_eq!(plan.diagnostics.fallback_legs, 3);
        assert_eq!(plan.diagnostics.stop_reason, StopReason::GenerationLimit);
    }

    #[rstest]
    fn rejects_single_stop_requests() {
        let request = PlanRequest::new(stops(&[(0.0, 0.0)]), sample_vessel());
        let err = GaPlanner::new(StubRouter::scaled(1.0))
            .plan(&request)
            .expect_err("one stop cannot be planned");
        assert_eq!(
            err,
            PlanError::InvalidRequest(PlanRequestValidationError::SingleStop)
        );
    }

    #[rstest]
    fn round_trip_sails_back_to_the_origin() {
        let stops = stops(&[(0.0, 0.0), (0.0, 1.0)]);
        let open = PlanRequest::new(stops.clone(), sample_vessel()).with_seed(2);
        let closed = open.clone().with_round_trip(true);
        let planner = GaPlanner::new(StubRouter::scaled(1.0)).with_config(quick());

        let one_way = planner.plan(&open).expect("open voyage plans");
        let there_and_back = planner.plan(&closed).expect("round trip plans");

        assert!(
            (there_and_back.optimized_metrics.distance_km
                - 2.0 * one_way.optimized_metrics.distance_km)
                .abs()
                < 1e-6
        );
        assert_eq!(there_and_back.best_order, vec![1]);
        assert_eq!(there_and_back.eta.len(), 2);
        assert_eq!(there_and_back.eta.last().map(|entry| entry.stop_index), Some(0));
        assert_eq!(
            there_and_back.route_geometry.last(),
            stops.first().map(|stop| &stop.location)
        );
    }

    #[rstest]
    fn cancelled_planner_skips_routing() {
        let flag = Arc::new(AtomicBool::new(true));
        let request = PlanRequest::new(
            stops(&[(51.9, 4.4), (1.29, 103.85), (-29.87, 31.03)]),
            sample_vessel(),
        )
        .with_seed(8);
        let plan = GaPlanner::new(FailingRouter::timeout())
            .with_cancel_flag(flag)
            .plan(&request)
            .expect("cancelled runs still answer");
        assert_eq!(plan.diagnostics.skipped_legs, 3);
        assert_eq!(plan.diagnostics.fallback_legs, 0);
        assert_eq!(plan.diagnostics.stop_reason, StopReason::Cancelled);
    }

    #[rstest]
    fn exhausted_time_limit_skips_routing_and_search() {
        let request = PlanRequest::new(
            stops(&[(51.9, 4.4), (1.29, 103.85), (-29.87, 31.03)]),
            sample_vessel(),
        )
        .with_seed(8);
        let plan = GaPlanner::new(FailingRouter::timeout())
            .with_config(quick().with_time_limit(Duration::ZERO))
            .plan(&request)
            .expect("out-of-time runs still answer");
        assert_eq!(plan.diagnostics.skipped_legs, 3);
        assert_eq!(plan.diagnostics.stop_reason, StopReason::TimeLimit);
        assert_eq!(plan.diagnostics.generations, 0);
        assert_eq!(plan.best_order.len(), 2);
    }

    #[rstest]
    fn cancelled_planner_returns_the_best_seen() {
        let flag = Arc::new(AtomicBool::new(true));
        let request = PlanRequest::new(square_stops(), sample_vessel()).with_seed(1);
        let plan = GaPlanner::new(StubRouter::scaled(1.0))
            .with_cancel_flag(flag)
            .plan(&request)
            .expect("cancelled runs still answer");
        assert_eq!(plan.diagnostics.stop_reason, StopReason::Cancelled);
        assert_eq!(plan.diagnostics.generations, 0);
        assert_eq!(plan.best_order.len(), 3);
    }
}
