//! Genetic voyage planner for Portwise.
//!
//! This crate provides [`GaPlanner`], the default implementation of the
//! [`Planner`](portwise_core::Planner) trait. Visiting orders are encoded as
//! random keys ([`encoding`]) and searched by [`GeneticOptimizer`], which
//! scores each decoded order with a weighted inverse-cost [`fitness()`] over
//! fuel, time and congestion.
//!
//! Fitness evaluation runs in parallel on the `rayon` pool; all random draws
//! come from one seeded `ChaCha8` stream, so a fixed seed reproduces a run.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod encoding;
mod fitness;
mod ga;
mod planner;

pub use fitness::{FITNESS_EPSILON, fitness};
pub use ga::{GaConfig, GeneticOptimizer, Optimization};
pub use planner::GaPlanner;
