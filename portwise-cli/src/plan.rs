//! Plan command implementation for the Portwise CLI.

use std::io::{BufReader, Write};
use std::sync::Arc;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use portwise_core::{LegRouter, PlanRequest, PlanResponse, Planner, PortDelayLookup};
use portwise_data::CongestionTable;
use portwise_data::congestion::DEFAULT_YEAR;
use portwise_data::routing::{
    ChainedRouter, CorridorNavigator, DEFAULT_TIMEOUT_SECS, HttpMaritimeRouter,
    HttpMaritimeRouterConfig,
};
use portwise_fs::open_utf8_file;
use portwise_solver_ga::{GaConfig, GaPlanner};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_CONGESTION_CSV, ARG_CONGESTION_YEAR, ARG_GENERATIONS, ARG_MARITIME_BASE_URL, ARG_OUTPUT,
    ARG_PLAN_REQUEST, ARG_POPULATION, ARG_ROUTING_TIMEOUT_SECS, ARG_SEED, ARG_TIME_LIMIT_SECS,
    CliError, ENV_PLAN_REQUEST,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan a voyage from a JSON-encoded PlanRequest. Legs are \
                 routed through a maritime-routing service when a base URL \
                 is configured, falling back to the built-in sea-lane \
                 network. Options can come from CLI flags, configuration \
                 files, or PORTWISE_* environment variables.",
    about = "Optimize the visiting order of a voyage"
)]
#[ortho_config(prefix = "PORTWISE")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing a PlanRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Base URL of the maritime-routing service (e.g. "http://localhost:8080").
    #[arg(long = ARG_MARITIME_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) maritime_base_url: Option<String>,
    /// Per-request timeout for the maritime-routing service.
    #[arg(long = ARG_ROUTING_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) routing_timeout_secs: Option<u64>,
    /// Port-call statistics CSV used for countries without a congestion index.
    #[arg(long = ARG_CONGESTION_CSV, value_name = "path")]
    #[serde(default)]
    pub(crate) congestion_csv: Option<Utf8PathBuf>,
    /// Reporting year read from the congestion CSV.
    #[arg(long = ARG_CONGESTION_YEAR, value_name = "year")]
    #[serde(default)]
    pub(crate) congestion_year: Option<String>,
    /// Generations bred by the optimizer.
    #[arg(long = ARG_GENERATIONS, value_name = "count")]
    #[serde(default)]
    pub(crate) generations: Option<usize>,
    /// Candidates per generation.
    #[arg(long = ARG_POPULATION, value_name = "count")]
    #[serde(default)]
    pub(crate) population: Option<usize>,
    /// Seed overriding the one in the request.
    #[arg(long = ARG_SEED, value_name = "seed")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Wall-clock budget for the search.
    #[arg(long = ARG_TIME_LIMIT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) time_limit_secs: Option<u64>,
    /// Write the plan here instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Maritime-routing service, if any.
    pub(crate) maritime_base_url: Option<String>,
    /// Timeout for each routing request.
    pub(crate) routing_timeout: Duration,
    /// Congestion statistics, if any.
    pub(crate) congestion_csv: Option<Utf8PathBuf>,
    /// Reporting year read from the statistics.
    pub(crate) congestion_year: String,
    /// Optimizer settings.
    pub(crate) ga: GaConfig,
    /// Seed overriding the request's.
    pub(crate) seed: Option<u64>,
    /// Output file; stdout when absent.
    pub(crate) output: Option<Utf8PathBuf>,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_PLAN_REQUEST)?;
        if let Some(csv) = &self.congestion_csv {
            Self::require_existing(csv, ARG_CONGESTION_CSV)?;
        }
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match portwise_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;

        let mut ga = GaConfig::default();
        if let Some(generations) = args.generations {
            ga = ga.with_generations(generations);
        }
        if let Some(population) = args.population {
            ga = ga.with_population_size(population);
        }
        if let Some(secs) = args.time_limit_secs {
            ga = ga.with_time_limit(Duration::from_secs(secs));
        }

        Ok(Self {
            request_path,
            maritime_base_url: args.maritime_base_url.filter(|url| !url.trim().is_empty()),
            routing_timeout: Duration::from_secs(
                args.routing_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            congestion_csv: args.congestion_csv,
            congestion_year: args
                .congestion_year
                .unwrap_or_else(|| DEFAULT_YEAR.to_owned()),
            ga,
            seed: args.seed,
            output: args.output,
        })
    }
}

/// Builds a planner for the current plan invocation.
pub(super) trait PlanPlannerBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn Planner>, CliError>;
}

pub(super) struct DefaultPlanPlannerBuilder;

impl DefaultPlanPlannerBuilder {
    fn planner<R: LegRouter + 'static>(
        router: R,
        config: &PlanConfig,
        delays: Option<Arc<dyn PortDelayLookup>>,
    ) -> Box<dyn Planner> {
        let planner = GaPlanner::new(router).with_config(config.ga.clone());
        match delays {
            Some(lookup) => Box::new(planner.with_delay_lookup(lookup)),
            None => Box::new(planner),
        }
    }
}

impl PlanPlannerBuilder for DefaultPlanPlannerBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn Planner>, CliError> {
        let delays = match &config.congestion_csv {
            Some(path) => {
                let table: Arc<dyn PortDelayLookup> =
                    Arc::new(CongestionTable::from_path(path, &config.congestion_year)?);
                Some(table)
            }
            None => None,
        };

        let Some(base_url) = &config.maritime_base_url else {
            info!("no maritime-routing service configured, using the corridor network");
            return Ok(Self::planner(CorridorNavigator::new(), config, delays));
        };
        let router_config =
            HttpMaritimeRouterConfig::new(base_url.clone()).with_timeout(config.routing_timeout);
        let maritime = HttpMaritimeRouter::with_config(router_config).map_err(|source| {
            CliError::BuildMaritimeRouter {
                base_url: base_url.clone(),
                source,
            }
        })?;
        let router = ChainedRouter::new(maritime, CorridorNavigator::new());
        Ok(Self::planner(router, config, delays))
    }
}

pub(super) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &DefaultPlanPlannerBuilder, &mut stdout)
}

pub(super) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn PlanPlannerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_plan_config(args)?;
    let response = execute_plan(&config, builder)?;
    let payload =
        serde_json::to_string_pretty(&response).map_err(CliError::SerializePlanResponse)?;
    match &config.output {
        Some(path) => portwise_fs::write_utf8_file(path, &format!("{payload}\n"))
            .map_err(CliError::WritePlanOutput),
        None => write_plan_response(writer, &payload),
    }
}

fn execute_plan(
    config: &PlanConfig,
    builder: &dyn PlanPlannerBuilder,
) -> Result<PlanResponse, CliError> {
    let mut request = load_plan_request(&config.request_path)?;
    if let Some(seed) = config.seed {
        request.seed = Some(seed);
    }
    request
        .validate()
        .map_err(|source| CliError::InvalidPlanRequest {
            path: config.request_path.clone(),
            source,
        })?;
    let planner = builder.build(config)?;
    planner
        .plan(&request)
        .map_err(|source| CliError::Plan { source })
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`PlanRequest`] from disk.
pub(super) fn load_plan_request(path: &Utf8Path) -> Result<PlanRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenPlanRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParsePlanRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_plan_response(writer: &mut dyn Write, payload: &str) -> Result<(), CliError> {
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WritePlanOutput)?;
    writer.write_all(b"\n").map_err(CliError::WritePlanOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
