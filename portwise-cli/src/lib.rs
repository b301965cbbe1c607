//! Command-line interface for planning voyages with Portwise.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod plan;

pub use error::CliError;

use plan::{PlanArgs, run_plan};

const ARG_PLAN_REQUEST: &str = "request";
const ARG_MARITIME_BASE_URL: &str = "maritime-base-url";
const ARG_ROUTING_TIMEOUT_SECS: &str = "routing-timeout-secs";
const ARG_CONGESTION_CSV: &str = "congestion-csv";
const ARG_CONGESTION_YEAR: &str = "congestion-year";
const ARG_GENERATIONS: &str = "generations";
const ARG_POPULATION: &str = "population";
const ARG_SEED: &str = "seed";
const ARG_TIME_LIMIT_SECS: &str = "time-limit-secs";
const ARG_OUTPUT: &str = "output";
const ENV_PLAN_REQUEST: &str = "PORTWISE_CMDS_PLAN_REQUEST_PATH";

/// Run the Portwise CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration, inputs, or planning
/// fail.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "portwise",
    about = "Plan the visiting order and schedule of a multi-stop voyage",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Optimize a JSON plan request and print the plan as JSON.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
