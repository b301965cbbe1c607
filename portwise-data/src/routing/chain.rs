use geo::Coord;
use log::warn;
use portwise_core::{Leg, LegRouter, RoutingError};

/// Router that asks `primary` first and `secondary` when it fails.
///
/// A typical deployment chains the HTTP maritime router in front of the
/// corridor navigator, so an unreachable service still yields sea routes.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use portwise_core::{GreatCircleRouter, LegRouter, LegSource};
/// use portwise_data::routing::{ChainedRouter, CorridorNavigator};
///
/// let router = ChainedRouter::new(CorridorNavigator::new(), GreatCircleRouter);
/// let leg = router
///     .route_leg(Coord { x: 4.4, y: 51.9 }, Coord { x: 103.85, y: 1.29 })
///     .expect("one of the routers answers");
/// assert_eq!(leg.source, LegSource::Corridor);
/// ```
#[derive(Debug, Clone)]
pub struct ChainedRouter<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> ChainedRouter<P, S> {
    /// Chain `primary` in front of `secondary`.
    pub const fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

impl<P: LegRouter, S: LegRouter> LegRouter for ChainedRouter<P, S> {
    fn route_leg(&self, from: Coord<f64>, to: Coord<f64>) -> Result<Leg, RoutingError> {
        self.primary.route_leg(from, to).or_else(|err| {
            warn!("primary router failed, trying secondary: {err}");
            self.secondary.route_leg(from, to)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portwise_core::LegSource;
    use portwise_core::test_support::{FailingRouter, StubRouter};
    use rstest::rstest;

    const FROM: Coord<f64> = Coord { x: 0.0, y: 0.0 };
    const TO: Coord<f64> = Coord { x: 10.0, y: 0.0 };

    #[rstest]
    fn primary_answer_wins() {
        let router = ChainedRouter::new(StubRouter::scaled(2.0), FailingRouter::timeout());
        let leg = router.route_leg(FROM, TO).expect("primary answers");
        assert_eq!(leg.source, LegSource::Maritime);
    }

    #[rstest]
    fn secondary_answers_after_primary_fails() {
        let router = ChainedRouter::new(FailingRouter::timeout(), StubRouter::scaled(1.0));
        assert!(router.route_leg(FROM, TO).is_ok());
    }

    #[rstest]
    fn secondary_error_is_returned_when_both_fail() {
        let router = ChainedRouter::new(
            FailingRouter::timeout(),
            FailingRouter::new(RoutingError::NoPath { from: FROM, to: TO }),
        );
        let err = router.route_leg(FROM, TO).expect_err("both fail");
        assert_eq!(err, RoutingError::NoPath { from: FROM, to: TO });
    }
}
