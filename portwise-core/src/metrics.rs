//! Whole-voyage metrics for a visiting order.
//!
//! A voyage starts at stop 0 and visits the free stops in the given order.
//! Open voyages end at the last stop; round trips sail back to the origin.
//! Metrics are always recomputed from scratch so the as-given order and the
//! optimized order are scored by the same function.

use serde::{Deserialize, Serialize};

use crate::congestion::{CongestionBreakdown, route_congestion, route_congestion_hours};
use crate::vessel::VesselPerformance;
use crate::DistanceMatrix;

/// Fuel, emissions and time for one visiting order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMetrics {
    /// Total distance sailed.
    pub distance_km: f64,
    /// Cruising plus congestion idling fuel.
    pub fuel_liters: f64,
    /// Emissions for `fuel_liters`.
    pub co2_kg: f64,
    /// Sailing time plus congestion delay; port stays are excluded.
    pub travel_time_hours: f64,
    /// Compounded congestion delay along the voyage.
    pub congestion_hours: f64,
    /// Idle burn used to price congestion.
    pub idle_fuel_rate_lph: f64,
    /// Fuel burned while sailing.
    pub travel_fuel_liters: f64,
    /// Fuel burned while waiting on congestion.
    pub congestion_fuel_liters: f64,
}

/// Scores visiting orders against a fixed matrix, vessel and set of delays.
#[derive(Debug, Clone, Copy)]
pub struct RouteEvaluator<'a> {
    matrix: &'a DistanceMatrix,
    performance: VesselPerformance,
    base_delays: &'a [f64],
    round_trip: bool,
}

impl<'a> RouteEvaluator<'a> {
    /// Bind the inputs of one run.
    ///
    /// `base_delays` is indexed by stop, like the matrix.
    #[must_use]
    pub const fn new(
        matrix: &'a DistanceMatrix,
        performance: VesselPerformance,
        base_delays: &'a [f64],
    ) -> Self {
        Self {
            matrix,
            performance,
            base_delays,
            round_trip: false,
        }
    }

    /// Include the leg from the last stop back to the origin.
    #[must_use]
    pub const fn with_round_trip(mut self, round_trip: bool) -> Self {
        self.round_trip = round_trip;
        self
    }

    /// Stops sailed to after leaving the origin: `order`, then the origin
    /// again on round trips.
    #[must_use]
    pub fn sailed_order(&self, order: &[usize]) -> Vec<usize> {
        let mut sailed = order.to_vec();
        if self.round_trip && !order.is_empty() {
            sailed.push(0);
        }
        sailed
    }

    /// Vessel rates in use.
    #[must_use]
    pub const fn performance(&self) -> &VesselPerformance {
        &self.performance
    }

    /// Number of stops that may be reordered.
    #[must_use]
    pub const fn free_stops(&self) -> usize {
        self.matrix.size().saturating_sub(1)
    }

    /// Visiting order as given by the request: `1, 2, ..., n - 1`.
    #[must_use]
    pub fn as_given_order(&self) -> Vec<usize> {
        (1..self.matrix.size()).collect()
    }

    /// Distance sailed from the origin through `order`, including the
    /// return leg on round trips.
    #[must_use]
    pub fn distance_km(&self, order: &[usize]) -> f64 {
        let mut previous = 0;
        let mut total = 0.0;
        for &stop in order {
            total += self.matrix.distance_km(previous, stop);
            previous = stop;
        }
        if self.round_trip {
            total += self.matrix.distance_km(previous, 0);
        }
        total
    }

    /// Compute all metrics for `order`, which lists free stops only.
    #[must_use]
    pub fn metrics(&self, order: &[usize]) -> RouteMetrics {
        let distance_km = self.distance_km(order);
        let congestion_hours = route_congestion_hours(
            self.base_delays,
            std::iter::once(0).chain(order.iter().copied()),
        );
        let travel_fuel_liters = self.performance.travel_fuel_liters(distance_km);
        let congestion_fuel_liters = self.performance.idle_fuel_liters(congestion_hours);
        let fuel_liters = travel_fuel_liters + congestion_fuel_liters;
        RouteMetrics {
            distance_km,
            fuel_liters,
            co2_kg: self.performance.co2_kg(fuel_liters),
            travel_time_hours: self.performance.sailing_hours(distance_km) + congestion_hours,
            congestion_hours,
            idle_fuel_rate_lph: self.performance.idle_rate_lph,
            travel_fuel_liters,
            congestion_fuel_liters,
        }
    }

    /// Per-stop congestion breakdown for `order`, origin first.
    #[must_use]
    pub fn congestion(&self, order: &[usize]) -> CongestionBreakdown {
        let sequence: Vec<usize> = std::iter::once(0).chain(order.iter().copied()).collect();
        route_congestion(self.base_delays, &sequence)
    }
}
