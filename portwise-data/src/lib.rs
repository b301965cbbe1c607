//! Boundary adapters for the Portwise voyage planner.
//!
//! Responsibilities:
//! - Route legs through a maritime-routing HTTP service or the built-in
//!   corridor network.
//! - Load country-level port congestion statistics from CSV.
//!
//! Boundaries:
//! - Do not encode planning rules (live in `portwise-core`).
//! - Keep blocking I/O off async executors.
//!
//! Invariants:
//! - Routers and lookups are `Send + Sync` and hold no global mutable state.

pub mod congestion;
pub mod routing;

pub use congestion::{CongestionTable, CongestionTableError};
pub use routing::{ChainedRouter, CorridorNavigator, HttpMaritimeRouter, HttpMaritimeRouterConfig};
