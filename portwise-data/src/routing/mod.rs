//! Leg routers backed by external services and static sea-lane data.
//!
//! - [`HttpMaritimeRouter`] asks a maritime-routing service for each leg.
//! - [`CorridorNavigator`] runs A* over a built-in graph of named sea
//!   corridors.
//! - [`ChainedRouter`] tries one router and falls through to another.
//!
//! All of them implement [`portwise_core::LegRouter`]; the distance engine in
//! `portwise-core` owns the great-circle fallback.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use portwise_data::routing::{
//!     ChainedRouter, CorridorNavigator, HttpMaritimeRouter, HttpMaritimeRouterConfig,
//! };
//!
//! let config = HttpMaritimeRouterConfig::new("http://localhost:8080")
//!     .with_timeout(Duration::from_secs(5));
//! let router = ChainedRouter::new(
//!     HttpMaritimeRouter::with_config(config)?,
//!     CorridorNavigator::new(),
//! );
//! # let _ = router;
//! # Ok::<(), portwise_data::routing::ProviderBuildError>(())
//! ```

mod chain;
mod corridor;
mod corridor_network;
mod provider;
mod searoute;

pub use chain::ChainedRouter;
pub use corridor::{CorridorGraph, CorridorGraphError, CorridorNavigator, ENDPOINT_LINKS};
pub use provider::{
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, HttpMaritimeRouter, HttpMaritimeRouterConfig,
    ProviderBuildError,
};
pub use searoute::{RouteGeometry, RouteProperties, RouteResponse, units_to_km};
