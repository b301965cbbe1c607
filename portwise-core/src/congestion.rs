//! Port-congestion delay model.
//!
//! A port's congestion index (0 to 100) maps to an expected wait through a
//! tiered curve that steepens with every quarter. Whole itineraries then
//! compound those waits: arriving straight after a congested call carries part
//! of its delay forward, and schedule drift accumulates along the voyage.

use serde::{Deserialize, Serialize};

use crate::Stop;

/// Share of the previous stop's base delay added to the next stop.
pub const SEQUENTIAL_PENALTY: f64 = 0.35;
/// Share of all prior adjusted delays added to each later stop.
pub const CUMULATIVE_PENALTY: f64 = 0.05;

/// Expected wait in hours for a congestion index.
///
/// The index is clamped to `0..=100`; non-finite values count as zero.
///
/// # Examples
///
/// ```
/// use portwise_core::congestion::base_delay_hours;
///
/// assert!((base_delay_hours(25.0) - 1.0).abs() < 1e-9);
/// assert!((base_delay_hours(100.0) - 15.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn base_delay_hours(index: f64) -> f64 {
    let idx = if index.is_finite() {
        index.clamp(0.0, 100.0)
    } else {
        0.0
    };
    if idx <= 25.0 {
        idx * 0.04
    } else if idx <= 50.0 {
        1.0 + (idx - 25.0) * 0.08
    } else if idx <= 75.0 {
        3.0 + (idx - 50.0) * 0.16
    } else {
        7.0 + (idx - 75.0) * 0.32
    }
}

/// Per-country port wait lookup, typically backed by published port-call
/// statistics.
pub trait PortDelayLookup: Send + Sync {
    /// Expected wait in hours for a port in `country`, if known.
    fn delay_hours(&self, country: &str) -> Option<f64>;
}

/// Base delay for every stop, in request order.
///
/// A stop's own congestion index wins; otherwise the country lookup is used
/// when both a country and a lookup are available; otherwise the delay is zero.
#[must_use]
pub fn resolve_base_delays(stops: &[Stop], lookup: Option<&dyn PortDelayLookup>) -> Vec<f64> {
    stops
        .iter()
        .map(|stop| {
            if let Some(index) = stop.congestion_index {
                return base_delay_hours(index);
            }
            match (stop.country.as_deref(), lookup) {
                (Some(country), Some(lookup)) => lookup
                    .delay_hours(country)
                    .filter(|hours| hours.is_finite() && *hours >= 0.0)
                    .unwrap_or(0.0),
                _ => 0.0,
            }
        })
        .collect()
}

/// Delay contributions for one stop of an itinerary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StopDelay {
    /// Index of the stop in the request.
    pub stop_index: usize,
    /// Delay from the stop's own congestion.
    pub base_hours: f64,
    /// Carry-over from the previous stop.
    pub sequential_penalty_hours: f64,
    /// Drift from all earlier delays.
    pub cumulative_penalty_hours: f64,
    /// Sum of the three contributions.
    pub adjusted_hours: f64,
}

/// Compounded congestion for a whole itinerary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CongestionBreakdown {
    /// Per-stop contributions in visiting order, origin first.
    pub stops: Vec<StopDelay>,
    /// Sum of all adjusted delays.
    pub total_hours: f64,
}

/// Compound base delays along a visiting sequence.
///
/// `sequence` lists stop indices in visiting order, origin first, and indexes
/// into `base_delays`. Unknown indices contribute no delay.
#[must_use]
pub fn route_congestion(base_delays: &[f64], sequence: &[usize]) -> CongestionBreakdown {
    let mut stops = Vec::with_capacity(sequence.len());
    let mut running_total = 0.0;
    let mut previous_base: Option<f64> = None;
    for &stop_index in sequence {
        let base_hours = base_delays.get(stop_index).copied().unwrap_or(0.0);
        let (sequential_penalty_hours, cumulative_penalty_hours) = match previous_base {
            Some(previous) => (previous * SEQUENTIAL_PENALTY, running_total * CUMULATIVE_PENALTY),
            None => (0.0, 0.0),
        };
        let adjusted_hours = base_hours + sequential_penalty_hours + cumulative_penalty_hours;
        running_total += adjusted_hours;
        previous_base = Some(base_hours);
        stops.push(StopDelay {
            stop_index,
            base_hours,
            sequential_penalty_hours,
            cumulative_penalty_hours,
            adjusted_hours,
        });
    }
    CongestionBreakdown {
        stops,
        total_hours: running_total,
    }
}

/// Total compounded congestion without building the per-stop breakdown.
///
/// Used on the optimizer's hot path; agrees with [`route_congestion`].
#[must_use]
pub fn route_congestion_hours(
    base_delays: &[f64],
    sequence: impl IntoIterator<Item = usize>,
) -> f64 {
    let mut running_total = 0.0;
    let mut previous_base: Option<f64> = None;
    for stop_index in sequence {
        let base = base_delays.get(stop_index).copied().unwrap_or(0.0);
        let adjusted = match previous_base {
            Some(previous) => {
                base + previous * SEQUENTIAL_PENALTY + running_total * CUMULATIVE_PENALTY
            }
            None => base,
        };
        running_total += adjusted;
        previous_base = Some(base);
    }
    running_total
}
