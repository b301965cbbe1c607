//! Distance engine: pairwise sea distances with a great-circle safety net.
//!
//! Short hops skip the router entirely. Longer legs are routed, and any
//! routing failure degrades to the great-circle distance with a straight
//! geometry. The engine never fails a run because a router did.

use geo::Coord;
use log::{debug, warn};
use rayon::prelude::*;

use crate::geodesy::haversine_km;
use crate::routing::{LegRouter, RoutingError};
use crate::{DistanceMatrix, Leg, Stop};

/// Legs shorter than this are not worth a routing query.
pub const DEFAULT_SHORT_RANGE_KM: f64 = 250.0;
/// Default number of routing queries in flight at once.
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 4;

/// Tunables for [`DistanceEngine`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceEngineConfig {
    /// Haversine distance under which the router is not consulted.
    pub short_range_km: f64,
    /// Upper bound on concurrent routing queries while building a matrix.
    pub max_concurrent_requests: usize,
}

impl Default for DistanceEngineConfig {
    fn default() -> Self {
        Self {
            short_range_km: DEFAULT_SHORT_RANGE_KM,
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }
}

impl DistanceEngineConfig {
    /// Override the short-range threshold.
    #[must_use]
    pub const fn with_short_range_km(mut self, km: f64) -> Self {
        self.short_range_km = km;
        self
    }

    /// Override the routing concurrency; zero is treated as one.
    #[must_use]
    pub const fn with_max_concurrent_requests(mut self, requests: usize) -> Self {
        self.max_concurrent_requests = requests;
        self
    }
}

/// How a single leg was resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum LegOutcome {
    /// Below the short-range threshold; the router was not asked.
    Direct(Leg),
    /// The router answered.
    Routed(Leg),
    /// The router failed and the great-circle leg was used instead.
    Fallback {
        /// Great-circle replacement.
        leg: Leg,
        /// Why routing failed.
        reason: RoutingError,
    },
    /// The build was interrupted before this leg was routed.
    Skipped(Leg),
}

impl LegOutcome {
    /// The leg to use, whatever path produced it.
    #[must_use]
    pub fn into_leg(self) -> Leg {
        match self {
            Self::Direct(leg)
            | Self::Routed(leg)
            | Self::Fallback { leg, .. }
            | Self::Skipped(leg) => leg,
        }
    }

    /// Whether routing failed for this leg.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Matrix plus the number of legs that had to fall back.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixBuild {
    /// Completed pairwise legs.
    pub matrix: DistanceMatrix,
    /// Legs where the router failed and great-circle was used.
    pub fallback_legs: usize,
    /// Legs left unrouted because the build was interrupted.
    pub skipped_legs: usize,
}

/// Computes legs and distance matrices through a [`LegRouter`].
///
/// # Examples
///
/// ```
/// use portwise_core::{DistanceEngine, GreatCircleRouter, Stop};
///
/// # fn main() -> Result<(), portwise_core::StopError> {
/// let stops = vec![Stop::new(0.0, 0.0)?, Stop::new(0.0, 1.0)?];
/// let build = DistanceEngine::new(GreatCircleRouter).build_matrix(&stops);
/// assert_eq!(build.matrix.size(), 2);
/// assert_eq!(build.fallback_legs, 0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DistanceEngine<R> {
    router: R,
    config: DistanceEngineConfig,
}

impl<R: LegRouter> DistanceEngine<R> {
    /// Create an engine with the default configuration.
    pub fn new(router: R) -> Self {
        Self::with_config(router, DistanceEngineConfig::default())
    }

    /// Create an engine with an explicit configuration.
    pub const fn with_config(router: R, config: DistanceEngineConfig) -> Self {
        Self { router, config }
    }

    /// Active configuration.
    pub const fn config(&self) -> &DistanceEngineConfig {
        &self.config
    }

    /// Give back the router.
    pub fn into_router(self) -> R {
        self.router
    }

    /// Resolve one leg, reporting whether routing failed.
    pub fn resolve_leg(&self, from: Coord<f64>, to: Coord<f64>) -> LegOutcome {
        let direct_km = haversine_km(from, to);
        if direct_km < self.config.short_range_km {
            return LegOutcome::Direct(Leg::great_circle(from, to));
        }
        match self.router.route_leg(from, to) {
            Ok(leg) if leg.distance_km.is_finite() && leg.distance_km >= 0.0 => {
                LegOutcome::Routed(leg)
            }
            Ok(_) => LegOutcome::Fallback {
                leg: Leg::great_circle(from, to),
                reason: RoutingError::MissingLength,
            },
            Err(reason) => LegOutcome::Fallback {
                leg: Leg::great_circle(from, to),
                reason,
            },
        }
    }

    /// Build the symmetric matrix for `stops`.
    ///
    /// Only pairs `i < j` are resolved; the rest are mirrored. Pairs are
    /// processed on a dedicated pool sized to the configured concurrency.
    pub fn build_matrix(&self, stops: &[Stop]) -> MatrixBuild {
        self.build_matrix_until(stops, &|| false)
    }

    /// Build the matrix, checking `interrupted` before each routing query.
    ///
    /// Once `interrupted` returns `true` the remaining pairs take the
    /// great-circle leg without consulting the router, so a cancelled or
    /// out-of-time run still gets a complete matrix.
    pub fn build_matrix_until(
        &self,
        stops: &[Stop],
        interrupted: &(dyn Fn() -> bool + Sync),
    ) -> MatrixBuild {
        let locations: Vec<Coord<f64>> = stops.iter().map(|stop| stop.location).collect();
        let pairs: Vec<(usize, usize)> = (0..locations.len())
            .flat_map(|i| ((i + 1)..locations.len()).map(move |j| (i, j)))
            .collect();
        let resolve = |&(i, j): &(usize, usize)| {
            let (from, to) = (locations[i], locations[j]);
            let outcome = if interrupted() {
                LegOutcome::Skipped(Leg::great_circle(from, to))
            } else {
                self.resolve_leg(from, to)
            };
            (i, j, outcome)
        };

        let threads = self.config.max_concurrent_requests.max(1);
        let outcomes: Vec<(usize, usize, LegOutcome)> =
            match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                Ok(pool) => pool.install(|| pairs.par_iter().map(resolve).collect()),
                Err(err) => {
                    warn!("failed to start routing pool, resolving legs sequentially: {err}");
                    pairs.iter().map(resolve).collect()
                }
            };

        let mut fallback_legs = 0;
        let mut skipped_legs = 0;
        let upper = outcomes.into_iter().map(|(i, j, outcome)| {
            match &outcome {
                LegOutcome::Fallback { reason, .. } => {
                    fallback_legs += 1;
                    warn!("leg {i}->{j} fell back to great-circle distance: {reason}");
                }
                LegOutcome::Skipped(_) => skipped_legs += 1,
                LegOutcome::Direct(_) | LegOutcome::Routed(_) => {}
            }
            (i, j, outcome.into_leg())
        });
        let matrix = DistanceMatrix::from_upper(&locations, upper);
        if skipped_legs > 0 {
            warn!("matrix build interrupted; {skipped_legs} legs use great-circle distance");
        }
        debug!(
            "built {n}x{n} distance matrix with {fallback_legs} fallback legs",
            n = matrix.size()
        );
        MatrixBuild {
            matrix,
            fallback_legs,
            skipped_legs,
        }
    }
}
