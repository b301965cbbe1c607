//! Shared test harness modules for the Portwise CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod helpers;
mod plan_steps;
mod plan_unit;
