//! Test helpers for plan request files and stub planners.

use super::*;
use crate::plan::{PlanConfig, PlanPlannerBuilder};
use camino::{Utf8Path, Utf8PathBuf};
use portwise_core::test_support::{StubRouter, sample_vessel, square_stops};
use portwise_core::{PlanRequest, Planner};
use portwise_solver_ga::GaPlanner;
use std::fs;
use tempfile::TempDir;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path, contents).expect("write test file");
}

/// Temporary directory addressed with UTF-8 paths.
pub(super) struct Workspace {
    _dir: TempDir,
    pub(super) root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }
}

/// Square voyage request serialized as JSON.
pub(super) fn square_request_json(seed: u64) -> String {
    let request = PlanRequest::new(square_stops(), sample_vessel())
        .with_seed(seed)
        .with_start_time("2025-02-01T00:00:00Z")
        .with_port_stay_hours(6.0);
    serde_json::to_string_pretty(&request).expect("serialize request")
}

/// Builds genetic planners over a deterministic stub router.
pub(super) struct StubPlannerBuilder;

impl PlanPlannerBuilder for StubPlannerBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn Planner>, CliError> {
        Ok(Box::new(
            GaPlanner::new(StubRouter::scaled(1.0)).with_config(config.ga.clone()),
        ))
    }
}
