//! Facade crate for the Portwise voyage planning engine.
//!
//! This crate re-exports the core domain types and exposes the data adapters
//! and the genetic planner behind feature flags.
//!
//! ```
//! # #[cfg(feature = "solver-ga")]
//! # {
//! use portwise_engine::{
//!     FuelCurveSample, GaConfig, GaPlanner, GreatCircleRouter, PlanRequest, Planner, Stop,
//!     VesselProfile,
//! };
//!
//! let stops = vec![
//!     Stop::new(51.9, 4.4).expect("Rotterdam"),
//!     Stop::new(53.5, 9.9).expect("Hamburg"),
//!     Stop::new(51.2, 4.4).expect("Antwerp"),
//! ];
//! let vessel = VesselProfile::new("Feeder", vec![FuelCurveSample::new(14.0, 1.2)]);
//! let planner = GaPlanner::new(GreatCircleRouter)
//!     .with_config(GaConfig::default().with_generations(20));
//! let plan = planner
//!     .plan(&PlanRequest::new(stops, vessel).with_seed(3))
//!     .expect("plan succeeds");
//! assert_eq!(plan.eta.len(), 2);
//! # }
//! ```

#![forbid(unsafe_code)]

pub use portwise_core::{
    CongestionBreakdown, DistanceEngine, DistanceEngineConfig, DistanceMatrix, EtaEntry,
    EtaScheduler, FuelCurveSample, GreatCircleRouter, Leg, LegRouter, LegSource, ObjectiveWeights,
    PlanDiagnostics, PlanError, PlanRequest, PlanRequestValidationError, PlanResponse, Planner,
    PortDelayLookup, RouteEvaluator, RouteMetrics, RoutingError, Stop, StopDelay, StopError,
    StopReason, VesselPerformance, VesselProfile,
};

#[cfg(feature = "data")]
pub use portwise_data::{
    ChainedRouter, CongestionTable, CongestionTableError, CorridorNavigator, HttpMaritimeRouter,
    HttpMaritimeRouterConfig,
};

#[cfg(feature = "solver-ga")]
pub use portwise_solver_ga::{GaConfig, GaPlanner, GeneticOptimizer, Optimization};
