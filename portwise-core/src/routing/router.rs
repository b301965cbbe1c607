use geo::Coord;

use super::RoutingError;
use crate::Leg;

/// Resolve the sea distance and path between two coordinates.
///
/// Implementations must be shareable across the worker threads that build a
/// distance matrix.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use portwise_core::{GreatCircleRouter, LegRouter, LegSource};
///
/// let leg = GreatCircleRouter
///     .route_leg(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 })
///     .expect("great-circle routing never fails");
/// assert_eq!(leg.source, LegSource::GreatCircle);
/// assert!((leg.distance_km - 111.2).abs() < 0.1);
/// ```
pub trait LegRouter: Send + Sync {
    /// Route a single leg from `from` to `to`.
    ///
    /// # Errors
    /// Returns [`RoutingError`] when no route could be produced.
    fn route_leg(&self, from: Coord<f64>, to: Coord<f64>) -> Result<Leg, RoutingError>;
}

impl<R: LegRouter + ?Sized> LegRouter for &R {
    fn route_leg(&self, from: Coord<f64>, to: Coord<f64>) -> Result<Leg, RoutingError> {
        (**self).route_leg(from, to)
    }
}

impl<R: LegRouter + ?Sized> LegRouter for Box<R> {
    fn route_leg(&self, from: Coord<f64>, to: Coord<f64>) -> Result<Leg, RoutingError> {
        (**self).route_leg(from, to)
    }
}

impl<R: LegRouter + ?Sized> LegRouter for std::sync::Arc<R> {
    fn route_leg(&self, from: Coord<f64>, to: Coord<f64>) -> Result<Leg, RoutingError> {
        (**self).route_leg(from, to)
    }
}

/// Router that always answers with the great-circle distance and a straight
/// two-point line.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreatCircleRouter;

impl LegRouter for GreatCircleRouter {
    fn route_leg(&self, from: Coord<f64>, to: Coord<f64>) -> Result<Leg, RoutingError> {
        Ok(Leg::great_circle(from, to))
    }
}
