//! Deterministic routers and fixtures shared by unit and behaviour tests.

use geo::Coord;

use crate::geodesy::haversine_km;
use crate::routing::{LegRouter, RoutingError};
use crate::vessel::{FuelCurveSample, VesselProfile};
use crate::{Leg, LegSource, Stop};

/// Router answering with the great-circle distance times a fixed factor.
///
/// Legs are tagged [`LegSource::Maritime`] so tests can tell routed legs from
/// fallbacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StubRouter {
    factor: f64,
}

impl StubRouter {
    /// Stretch every great-circle distance by `factor`.
    #[must_use]
    pub const fn scaled(factor: f64) -> Self {
        Self { factor }
    }
}

impl LegRouter for StubRouter {
    fn route_leg(&self, from: Coord<f64>, to: Coord<f64>) -> Result<Leg, RoutingError> {
        let midpoint = Coord {
            x: (from.x + to.x) / 2.0,
            y: (from.y + to.y) / 2.0,
        };
        Ok(Leg::new(
            haversine_km(from, to) * self.factor,
            vec![from, midpoint, to],
            LegSource::Maritime,
        ))
    }
}

/// Router that fails every request with the same error.
#[derive(Debug, Clone, PartialEq)]
pub struct FailingRouter {
    error: RoutingError,
}

impl FailingRouter {
    /// Fail with an arbitrary error.
    #[must_use]
    pub const fn new(error: RoutingError) -> Self {
        Self { error }
    }

    /// Fail as if the routing service timed out.
    #[must_use]
    pub fn timeout() -> Self {
        Self::new(RoutingError::Timeout {
            url: "http://maritime.test/route".to_owned(),
            timeout_secs: 10,
        })
    }
}

impl LegRouter for FailingRouter {
    fn route_leg(&self, _from: Coord<f64>, _to: Coord<f64>) -> Result<Leg, RoutingError> {
        Err(self.error.clone())
    }
}

/// Build stops from `(lat, lon)` pairs.
///
/// # Panics
/// Panics when a pair is not a valid position.
#[must_use]
pub fn stops(positions: &[(f64, f64)]) -> Vec<Stop> {
    positions
        .iter()
        .map(|&(lat, lon)| Stop::new(lat, lon).expect("test positions must be valid"))
        .collect()
}

/// Origin plus three corners of a one-degree square.
///
/// Visiting the corners around the perimeter is optimal in either direction.
#[must_use]
pub fn square_stops() -> Vec<Stop> {
    stops(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])
}

/// Vessel cruising at 20 knots burning 5 t/h, with a 3.1 CO2 factor.
#[must_use]
pub fn sample_vessel() -> VesselProfile {
    VesselProfile::new("Test Carrier", vec![FuelCurveSample::new(20.0, 5.0)])
        .with_cruising_speed(20.0)
        .with_co2_factor(3.1)
}
