//! Behaviour-driven step definitions driving the plan CLI scenarios.

use super::helpers::{StubPlannerBuilder, square_request_json, write_utf8};
use super::*;
use crate::plan::run_plan_with;
use camino::Utf8PathBuf;
use portwise_core::test_support::{sample_vessel, stops};
use portwise_core::{PlanRequest, PlanRequestValidationError, PlanResponse};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use tempfile::TempDir;

#[derive(Debug)]
struct PlanWorld {
    _tmp: TempDir,
    workdir: Utf8PathBuf,
    request_path: Utf8PathBuf,
    include_request: RefCell<bool>,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl PlanWorld {
    fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let workdir =
            Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        let request_path = workdir.join("request.json");

        Self {
            _tmp: tmp,
            workdir,
            request_path,
            include_request: RefCell::new(true),
            cli_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec!["portwise".to_owned(), "plan".to_owned()];
        if *self.include_request.borrow() {
            argv.push(self.request_path.as_str().to_owned());
        }
        argv.extend([format!("--{ARG_GENERATIONS}"), "20".to_owned()]);
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }

    fn error(&self) -> std::cell::Ref<'_, CliError> {
        std::cell::Ref::map(self.result.borrow(), |result| {
            result
                .as_ref()
                .expect("result recorded")
                .as_ref()
                .expect_err("expected error")
        })
    }

    fn assert_succeeded(&self) {
        let borrowed = self.result.borrow();
        let result = borrowed.as_ref().expect("result recorded");
        if let Err(err) = result {
            panic!("expected success, found {err:?}");
        }
    }
}

#[fixture]
fn world() -> PlanWorld {
    PlanWorld::new()
}

fn unquote(value: &str) -> &str {
    value.trim_matches('"')
}

#[given("a valid plan request exists on disk")]
fn valid_plan_request_exists(#[from(world)] world: &PlanWorld) {
    write_utf8(&world.request_path, square_request_json(7).as_bytes());
}

#[given("the plan request contains invalid JSON")]
fn plan_request_contains_invalid_json(#[from(world)] world: &PlanWorld) {
    write_utf8(&world.request_path, b"{ not valid json");
}

#[given("the plan request has only one stop")]
fn plan_request_has_one_stop(#[from(world)] world: &PlanWorld) {
    let request = PlanRequest::new(stops(&[(51.9, 4.4)]), sample_vessel());
    let payload = serde_json::to_string_pretty(&request).expect("serialize request");
    write_utf8(&world.request_path, payload.as_bytes());
}

#[given("I omit the plan request path")]
fn omit_plan_request_path(#[from(world)] world: &PlanWorld) {
    *world.include_request.borrow_mut() = false;
}

#[given("I ask for the plan to be written to {name}")]
fn ask_for_output_file(#[from(world)] world: &PlanWorld, name: String) {
    let target = world.workdir.join(unquote(&name));
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_OUTPUT}"), target.as_str().to_owned()]);
}

#[when("I run the plan command")]
fn run_plan_command(#[from(world)] world: &PlanWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Plan(args) => {
            let mut buffer = world.stdout.borrow_mut();
            run_plan_with(args, &StubPlannerBuilder, &mut *buffer)
        }
    });

    world.result.replace(Some(outcome));
}

#[then("the command succeeds and prints a JSON plan")]
fn command_succeeds_and_prints_json(#[from(world)] world: &PlanWorld) {
    world.assert_succeeded();
    let stdout = String::from_utf8(world.stdout.borrow().clone()).expect("stdout utf-8");
    let value: serde_json::Value =
        serde_json::from_str(&stdout).expect("output should be JSON");
    assert!(value.get("bestOrderIndices").is_some());
    assert!(value.get("etaDetails").is_some());
}

#[then("the plan visits {count} stops after the origin")]
fn plan_visits_stops(#[from(world)] world: &PlanWorld, count: usize) {
    let stdout = String::from_utf8(world.stdout.borrow().clone()).expect("stdout utf-8");
    let response: PlanResponse =
        serde_json::from_str(&stdout).expect("output should be a plan response");
    let mut order = response.best_order.clone();
    order.sort_unstable();
    assert_eq!(order, (1..=count).collect::<Vec<_>>());
    assert_eq!(response.eta.len(), count);
}

#[then("the command succeeds and writes the plan to {name}")]
fn command_writes_plan_file(#[from(world)] world: &PlanWorld, name: String) {
    world.assert_succeeded();
    assert!(world.stdout.borrow().is_empty(), "stdout should stay empty");
    let target = world.workdir.join(unquote(&name));
    let contents = std::fs::read_to_string(&target).expect("plan file written");
    let response: PlanResponse =
        serde_json::from_str(&contents).expect("file should hold a plan response");
    assert_eq!(response.diagnostics.seed, 7);
}

#[then("the command fails because the request JSON is invalid")]
fn command_fails_invalid_json(#[from(world)] world: &PlanWorld) {
    match &*world.error() {
        CliError::ParsePlanRequest { .. } => {}
        other => panic!("expected ParsePlanRequest, found {other:?}"),
    }
}

#[then("the command fails because the request is invalid")]
fn command_fails_invalid_request(#[from(world)] world: &PlanWorld) {
    match &*world.error() {
        CliError::InvalidPlanRequest { source, .. } => {
            assert_eq!(*source, PlanRequestValidationError::SingleStop);
        }
        other => panic!("expected InvalidPlanRequest, found {other:?}"),
    }
}

#[then("the command fails because the request path is missing")]
fn command_fails_missing_request_path(#[from(world)] world: &PlanWorld) {
    match &*world.error() {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_PLAN_REQUEST),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

macro_rules! register_plan_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/plan_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: PlanWorld) {
            let _ = world;
        }
    };
}

register_plan_scenario!(plan_happy_path, "planning a request from JSON");
register_plan_scenario!(plan_to_output_file, "writing the plan to a file");
register_plan_scenario!(plan_invalid_json, "rejecting invalid JSON input");
register_plan_scenario!(plan_single_stop, "rejecting requests with a single stop");
register_plan_scenario!(plan_missing_request, "rejecting missing request paths");
