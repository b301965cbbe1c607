//! Routing seam between the distance engine and whatever answers leg queries.
//!
//! A [`LegRouter`] turns two coordinates into a routed [`Leg`](crate::Leg) or
//! reports why it could not. The distance engine decides what to do with the
//! failure; routers never fall back on their own.

mod error;
mod router;

pub use error::RoutingError;
pub use router::{GreatCircleRouter, LegRouter};
