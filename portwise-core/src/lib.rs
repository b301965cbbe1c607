//! Core domain for the Portwise voyage planner.
//!
//! The crate holds the pieces every planner needs: stops and vessels, the
//! distance engine with its routing seam, the vessel and congestion models,
//! whole-voyage metrics, and the arrival-time scheduler. Search strategies
//! and boundary adapters live in sibling crates and plug in through
//! [`Planner`] and [`LegRouter`].

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod congestion;
pub mod distance;
pub mod eta;
pub mod geodesy;
mod matrix;
pub mod metrics;
mod planner;
pub mod routing;
mod stop;
pub mod vessel;
mod weights;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use congestion::{CongestionBreakdown, PortDelayLookup, StopDelay};
pub use distance::{DistanceEngine, DistanceEngineConfig, LegOutcome, MatrixBuild};
pub use eta::{EtaEntry, EtaScheduler};
pub use matrix::{DistanceMatrix, Leg, LegSource};
pub use metrics::{RouteEvaluator, RouteMetrics};
pub use planner::{
    PlanDiagnostics, PlanError, PlanRequest, PlanRequestValidationError, PlanResponse, Planner,
    StopReason,
};
pub use routing::{GreatCircleRouter, LegRouter, RoutingError};
pub use stop::{Stop, StopError};
pub use vessel::{FuelCurveSample, VesselPerformance, VesselProfile};
pub use weights::ObjectiveWeights;
