//! Focused unit tests covering plan CLI configuration and request parsing.

use super::helpers::{StubPlannerBuilder, Workspace, square_request_json, write_utf8};
use super::*;
use crate::plan::{
    PlanArgs, PlanConfig, config_from_layers_for_test, load_plan_request, run_plan_with,
};
use portwise_core::PlanResponse;
use portwise_solver_ga::GaConfig;
use rstest::rstest;
use std::time::Duration;

#[rstest]
fn converting_plan_without_request_errors() {
    let err = PlanConfig::try_from(PlanArgs::default()).expect_err("missing request should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_PLAN_REQUEST);
            assert_eq!(env, ENV_PLAN_REQUEST);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn plan_config_fills_defaults() {
    let args = PlanArgs {
        request_path: Some("voyage.json".into()),
        ..PlanArgs::default()
    };
    let config = PlanConfig::try_from(args).expect("config should build");
    assert_eq!(config.maritime_base_url, None);
    assert_eq!(config.routing_timeout, Duration::from_secs(10));
    assert_eq!(config.congestion_year, "2023");
    assert_eq!(config.ga, GaConfig::default());
    assert_eq!(config.seed, None);
}

#[rstest]
fn search_overrides_reach_the_optimizer() {
    let args = PlanArgs {
        request_path: Some("voyage.json".into()),
        maritime_base_url: Some("   ".into()),
        generations: Some(25),
        population: Some(12),
        time_limit_secs: Some(3),
        ..PlanArgs::default()
    };
    let config = PlanConfig::try_from(args).expect("config should build");
    assert_eq!(config.maritime_base_url, None);
    assert_eq!(
        config.ga,
        GaConfig::default()
            .with_generations(25)
            .with_population_size(12)
            .with_time_limit(Duration::from_secs(3))
    );
}

#[rstest]
fn validate_sources_reports_missing_request() {
    let workspace = Workspace::new();
    let args = PlanArgs {
        request_path: Some(workspace.root.join("absent.json")),
        ..PlanArgs::default()
    };
    let config = PlanConfig::try_from(args).expect("config should build");
    match config.validate_sources().expect_err("request is missing") {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_PLAN_REQUEST),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_checks_the_congestion_csv() {
    let workspace = Workspace::new();
    let request_path = workspace.root.join("voyage.json");
    write_utf8(&request_path, b"{}");
    let args = PlanArgs {
        request_path: Some(request_path),
        congestion_csv: Some(workspace.root.clone()),
        ..PlanArgs::default()
    };
    let config = PlanConfig::try_from(args).expect("config should build");
    match config.validate_sources().expect_err("csv is a directory") {
        CliError::SourcePathNotFile { field, .. } => assert_eq!(field, ARG_CONGESTION_CSV),
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn load_plan_request_reports_open_and_parse_errors() {
    let workspace = Workspace::new();
    let missing = workspace.root.join("missing.json");
    match load_plan_request(&missing).expect_err("missing request") {
        CliError::OpenPlanRequest { path, .. } => assert_eq!(path, missing),
        other => panic!("expected OpenPlanRequest, found {other:?}"),
    }

    let garbled = workspace.root.join("garbled.json");
    write_utf8(&garbled, b"{ \"stops\": [");
    match load_plan_request(&garbled).expect_err("invalid JSON") {
        CliError::ParsePlanRequest { path, .. } => assert_eq!(path, garbled),
        other => panic!("expected ParsePlanRequest, found {other:?}"),
    }
}

#[rstest]
fn seed_flag_overrides_the_request_seed() {
    let workspace = Workspace::new();
    let request_path = workspace.root.join("voyage.json");
    write_utf8(&request_path, square_request_json(1).as_bytes());
    let args = PlanArgs {
        request_path: Some(request_path),
        seed: Some(4242),
        generations: Some(10),
        ..PlanArgs::default()
    };

    let mut buffer = Vec::new();
    run_plan_with(args, &StubPlannerBuilder, &mut buffer).expect("plan succeeds");
    let response: PlanResponse = serde_json::from_slice(&buffer).expect("JSON plan response");
    assert_eq!(response.diagnostics.seed, 4242);
    assert_eq!(response.diagnostics.generations, 10);
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "request_path": 42 }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honour_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let workspace = Workspace::new();
    let env_request = workspace.root.join("from-env.json");
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "maritime_base_url": "http://from-file:8080",
            "generations": 80,
            "congestion_year": "2022",
        }),
        None,
    );
    composer.push_environment(json!({
        "request_path": env_request.as_str(),
        "generations": 60,
    }));
    composer.push_cli(json!({ "generations": 30 }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.request_path, env_request);
    assert_eq!(config.maritime_base_url.as_deref(), Some("http://from-file:8080"));
    assert_eq!(config.congestion_year, "2022");
    assert_eq!(config.ga.generations, 30);
}
