//! Error types emitted by the Portwise CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use portwise_core::{PlanError, PlanRequestValidationError};
use portwise_data::CongestionTableError;
use portwise_data::routing::ProviderBuildError;
use thiserror::Error;

/// Errors emitted by the Portwise CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Opening the plan request file failed.
    #[error("failed to open plan request at {path:?}: {source}")]
    OpenPlanRequest {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Plan request JSON could not be decoded.
    #[error("failed to parse plan request JSON at {path:?}: {source}")]
    ParsePlanRequest {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The plan request payload failed validation.
    #[error("plan request in {path:?} failed validation: {source}")]
    InvalidPlanRequest {
        path: Utf8PathBuf,
        #[source]
        source: PlanRequestValidationError,
    },
    /// Loading the congestion statistics failed.
    #[error(transparent)]
    LoadCongestion(#[from] CongestionTableError),
    /// Constructing the maritime routing client failed.
    #[error("failed to build maritime router for {base_url:?}: {source}")]
    BuildMaritimeRouter {
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// The planner rejected the request.
    #[error("planner failed: {source}")]
    Plan { source: PlanError },
    /// Serializing the plan response failed.
    #[error("failed to serialize plan response: {0}")]
    SerializePlanResponse(#[source] serde_json::Error),
    /// Writing the plan output failed.
    #[error("failed to write plan output: {0}")]
    WritePlanOutput(#[source] std::io::Error),
}
