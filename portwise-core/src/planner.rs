use geo::Coord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::congestion::CongestionBreakdown;
use crate::eta::EtaEntry;
use crate::geodesy::latlon;
use crate::metrics::RouteMetrics;
use crate::vessel::VesselProfile;
use crate::{ObjectiveWeights, Stop, StopError};

/// A voyage to plan.
///
/// `stops[0]` is the fixed origin; the remaining stops may be reordered.
///
/// # Examples
///
/// ```rust
/// use portwise_core::PlanRequest;
///
/// let request: PlanRequest = serde_json::from_str(
///     r#"{
///         "stops": [
///             {"latitude": 0.0, "longitude": 0.0},
///             {"latitude": 0.0, "longitude": 1.0}
///         ],
///         "vessel": {"name": "Coaster", "fuelCurve": [{"speed": 12, "consumption": 1.5}]},
///         "startTime": "2025-06-01T00:00:00Z"
///     }"#,
/// )
/// .expect("valid request");
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    /// Stops to visit, origin first.
    pub stops: Vec<Stop>,
    /// Vessel sailing the voyage.
    pub vessel: VesselProfile,
    /// Departure time from the origin; now when absent or unparsable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    /// Hours spent at each stop after arrival.
    #[serde(default)]
    pub port_stay_hours: f64,
    /// Objective weights; equal when omitted.
    #[serde(default)]
    pub weights: ObjectiveWeights,
    /// Seed for a reproducible search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Sail back to the origin after the last stop.
    #[serde(default)]
    pub round_trip: bool,
}

/// Reasons a [`PlanRequest`] is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanRequestValidationError {
    /// The request listed no stops.
    #[error("at least two stops are required, got none")]
    NoStops,
    /// Only the origin was listed, so there is nothing to order.
    #[error("at least two stops are required, got only the origin")]
    SingleStop,
    /// A stop's coordinates are not a valid position.
    #[error("stop {index} is invalid: {source}")]
    InvalidStop {
        /// Position of the stop in the request.
        index: usize,
        /// Underlying coordinate error.
        #[source]
        source: StopError,
    },
    /// The port stay was negative or not a number.
    #[error("port stay must be a non-negative number of hours, got {0}")]
    InvalidPortStay(f64),
}

impl PlanRequest {
    /// Bundle stops and a vessel with default weights and no port stay.
    #[must_use]
    pub fn new(stops: Vec<Stop>, vessel: VesselProfile) -> Self {
        Self {
            stops,
            vessel,
            start_time: None,
            port_stay_hours: 0.0,
            weights: ObjectiveWeights::default(),
            seed: None,
            round_trip: false,
        }
    }

    /// Set the departure time string.
    #[must_use]
    pub fn with_start_time(mut self, start_time: impl Into<String>) -> Self {
        self.start_time = Some(start_time.into());
        self
    }

    /// Set the port stay.
    #[must_use]
    pub const fn with_port_stay_hours(mut self, hours: f64) -> Self {
        self.port_stay_hours = hours;
        self
    }

    /// Set the objective weights.
    #[must_use]
    pub const fn with_weights(mut self, weights: ObjectiveWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Fix the search seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Return to the origin after the last stop.
    #[must_use]
    pub const fn with_round_trip(mut self, round_trip: bool) -> Self {
        self.round_trip = round_trip;
        self
    }

    /// Reject requests that cannot be planned.
    ///
    /// Degraded input such as missing weights or vessel data is accepted.
    ///
    /// # Errors
    /// Returns [`PlanRequestValidationError`] describing the first problem.
    pub fn validate(&self) -> Result<(), PlanRequestValidationError> {
        match self.stops.len() {
            0 => return Err(PlanRequestValidationError::NoStops),
            1 => return Err(PlanRequestValidationError::SingleStop),
            _ => {}
        }
        for (index, stop) in self.stops.iter().enumerate() {
            stop.validate()
                .map_err(|source| PlanRequestValidationError::InvalidStop { index, source })?;
        }
        if !self.port_stay_hours.is_finite() || self.port_stay_hours < 0.0 {
            return Err(PlanRequestValidationError::InvalidPortStay(
                self.port_stay_hours,
            ));
        }
        Ok(())
    }
}

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The configured number of generations ran.
    GenerationLimit,
    /// The wall-clock budget ran out.
    TimeLimit,
    /// The caller cancelled the run.
    Cancelled,
}

/// Run statistics reported alongside a plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDiagnostics {
    /// Generations completed.
    pub generations: usize,
    /// Fitness evaluations performed.
    pub evaluations: usize,
    /// Wall-clock time spent planning.
    pub elapsed_ms: u64,
    /// Seed the search ran with.
    pub seed: u64,
    /// Legs that fell back to great-circle distance.
    pub fallback_legs: usize,
    /// Legs left unrouted because the run was cancelled or out of time.
    #[serde(default)]
    pub skipped_legs: usize,
    /// Why the search ended.
    pub stop_reason: StopReason,
    /// Fitness of the returned order.
    pub best_fitness: f64,
}

/// A planned voyage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    /// Metrics for the stops visited in request order.
    pub standard_metrics: RouteMetrics,
    /// Metrics for the chosen order.
    pub optimized_metrics: RouteMetrics,
    /// Chosen order of the non-origin stops, as request indices.
    #[serde(rename = "bestOrderIndices")]
    pub best_order: Vec<usize>,
    /// Path sailed for the chosen order, as `[lat, lon]` pairs.
    #[serde(with = "latlon")]
    pub route_geometry: Vec<Coord<f64>>,
    /// Timed itinerary, one entry per non-origin stop plus the return to
    /// the origin on round trips.
    #[serde(rename = "etaDetails")]
    pub eta: Vec<EtaEntry>,
    /// Congestion contributions along the chosen order.
    pub congestion: CongestionBreakdown,
    /// Search statistics.
    pub diagnostics: PlanDiagnostics,
}

/// Errors returned by [`Planner::plan`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// The request was rejected before planning started.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] PlanRequestValidationError),
}

/// Choose a visiting order and schedule it.
///
/// Routing failures degrade to great-circle legs and never fail a plan.
/// Planners must be `Send + Sync` so one instance can serve concurrent
/// requests.
pub trait Planner: Send + Sync {
    /// Plan `request`.
    ///
    /// # Errors
    /// Returns [`PlanError::InvalidRequest`] for requests that cannot be
    /// planned.
    fn plan(&self, request: &PlanRequest) -> Result<PlanResponse, PlanError>;
}
