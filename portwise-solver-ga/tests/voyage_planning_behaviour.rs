#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural tests for planning whole voyages with `GaPlanner`.

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use portwise_core::test_support::StubRouter;
use portwise_core::vessel::FuelCurveSample;
use portwise_core::{
    ObjectiveWeights, PlanError, PlanRequest, PlanResponse, Planner, Stop, VesselProfile,
};
use portwise_solver_ga::{GaConfig, GaPlanner};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

type PlanOutcome = Result<PlanResponse, PlanError>;

#[derive(Debug, Default)]
struct PlanningWorld {
    stops: RefCell<Vec<Stop>>,
    vessel: RefCell<Option<VesselProfile>>,
    weights: RefCell<ObjectiveWeights>,
    request: RefCell<Option<PlanRequest>>,
    outcome: RefCell<Option<PlanOutcome>>,
}

#[fixture]
fn world() -> PlanningWorld {
    PlanningWorld::default()
}

fn planner() -> GaPlanner<StubRouter> {
    GaPlanner::new(StubRouter::scaled(1.1)).with_config(GaConfig::default().with_generations(50))
}

fn stop(lat: f64, lon: f64) -> Stop {
    Stop::new(lat, lon).expect("valid test position")
}

fn timestamp(raw: &str) -> DateTime<Utc> {
    raw.trim_matches('"')
        .parse()
        .expect("scenario timestamps are RFC 3339")
}

fn response(world: &PlanningWorld) -> PlanResponse {
    world
        .outcome
        .borrow()
        .clone()
        .expect("a plan should have been attempted")
        .expect("planning should succeed")
}

#[given("an origin at 0 0 with stops one degree east and one degree north-east")]
fn given_three_stops(world: &PlanningWorld) {
    world
        .stops
        .replace(vec![stop(0.0, 0.0), stop(0.0, 1.0), stop(1.0, 1.0)]);
}

#[given("only an origin stop")]
fn given_origin_only(world: &PlanningWorld) {
    world.stops.replace(vec![stop(0.0, 0.0)]);
}

#[given("a vessel cruising at {knots} knots burning {tph} tonnes per hour with CO2 factor {factor}")]
fn given_vessel(world: &PlanningWorld, knots: f64, tph: f64, factor: f64) {
    let vessel = VesselProfile::new("Test Carrier", vec![FuelCurveSample::new(knots, tph)])
        .with_cruising_speed(knots)
        .with_co2_factor(factor);
    world.vessel.replace(Some(vessel));
}

#[given("equal objective weights")]
fn given_equal_weights(world: &PlanningWorld) {
    world.weights.replace(ObjectiveWeights::new(1.0, 1.0, 1.0));
}

#[given("the plan request file {name}")]
fn given_request_file(world: &PlanningWorld, name: String) {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name.trim_matches('"'));
    let content = fs::read_to_string(&path).expect("request file should be readable");
    let request: PlanRequest = serde_json::from_str(&content).expect("request file is valid JSON");
    world.request.replace(Some(request));
}

#[when("I plan the voyage departing {start}")]
fn when_plan_departing(world: &PlanningWorld, start: String) {
    let vessel = world
        .vessel
        .borrow()
        .clone()
        .expect("a vessel should be configured");
    let request = PlanRequest::new(world.stops.borrow().clone(), vessel)
        .with_weights(*world.weights.borrow())
        .with_start_time(start.trim_matches('"'))
        .with_seed(2025);
    world.outcome.replace(Some(planner().plan(&request)));
}

#[when("I plan the voyage from the request")]
fn when_plan_request(world: &PlanningWorld) {
    let borrowed = world.request.borrow();
    let request = borrowed.as_ref().expect("a request should be loaded");
    world.outcome.replace(Some(planner().plan(request)));
}

#[then("the best order visits each non-origin stop exactly once")]
fn then_order_is_permutation(world: &PlanningWorld) {
    let mut order = response(world).best_order;
    order.sort_unstable();
    assert_eq!(order, vec![1, 2]);
}

#[then("the optimized distance is positive")]
fn then_distance_positive(world: &PlanningWorld) {
    assert!(response(world).optimized_metrics.distance_km > 0.0);
}

#[then("there are {count} arrival times increasing after {start}")]
fn then_arrivals_increase(world: &PlanningWorld, count: usize, start: String) {
    let plan = response(world);
    assert_eq!(plan.eta.len(), count);
    let mut previous = timestamp(&start);
    for entry in &plan.eta {
        assert!(entry.arrival > previous, "{} <= {previous}", entry.arrival);
        previous = entry.arrival;
    }
}

#[then("the JSON response lists bestOrderIndices and etaDetails")]
fn then_json_fields(world: &PlanningWorld) {
    let json = serde_json::to_value(response(world)).expect("responses serialize");
    let order = json["bestOrderIndices"]
        .as_array()
        .expect("bestOrderIndices is an array");
    assert_eq!(order.len(), 2);
    let eta = json["etaDetails"].as_array().expect("etaDetails is an array");
    assert_eq!(eta.len(), 2);
    assert!(json["optimizedMetrics"]["distanceKm"].as_f64() > Some(0.0));
}

#[then("the diagnostics report seed {seed}")]
fn then_seed(world: &PlanningWorld, seed: u64) {
    assert_eq!(response(world).diagnostics.seed, seed);
}

#[then("the plan is rejected as invalid")]
fn then_rejected(world: &PlanningWorld) {
    let borrowed = world.outcome.borrow();
    let outcome = borrowed.as_ref().expect("a plan should have been attempted");
    assert!(matches!(outcome, Err(PlanError::InvalidRequest(_))));
}

#[scenario(path = "tests/features/voyage_planning.feature", index = 0)]
fn three_stop_voyage(world: PlanningWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/voyage_planning.feature", index = 1)]
fn camel_case_request(world: PlanningWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/voyage_planning.feature", index = 2)]
fn single_stop_rejected(world: PlanningWorld) {
    let _ = world;
}
