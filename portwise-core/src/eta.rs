//! Arrival-time scheduling for a chosen visiting order.
//!
//! The clock starts at the requested departure, advances by the sailing time
//! of each leg, and then by the port stay before the next leg. Every leg
//! advances the clock by at least [`MIN_LEG_ADVANCE_MS`], so arrivals are
//! strictly increasing even between coincident stops. Congestion delay is
//! reported in the metrics but not added to the timeline.

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use geo::Coord;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::geodesy::latlon;
use crate::{DistanceMatrix, Stop};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Smallest clock advance for one leg, in milliseconds.
pub const MIN_LEG_ADVANCE_MS: i64 = 1;

/// Scheduled arrival at one stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtaEntry {
    /// Index of the stop in the request.
    pub stop_index: usize,
    /// Stop position, serialized as `[lat, lon]`.
    #[serde(with = "latlon::point")]
    pub coordinates: Coord<f64>,
    /// Length of the leg ending here.
    pub leg_distance_km: f64,
    /// Sailing time of the leg ending here.
    pub leg_travel_hours: f64,
    /// Arrival time.
    pub arrival: DateTime<Utc>,
    /// Departure time after the port stay.
    pub departure: DateTime<Utc>,
}

/// Parse a departure timestamp.
///
/// Accepts RFC 3339 and naive `YYYY-MM-DDTHH:MM[:SS]` values, the latter read
/// as UTC.
///
/// # Examples
///
/// ```
/// use portwise_core::eta::parse_start_time;
///
/// let start = parse_start_time("2025-03-01T08:30").expect("naive timestamps are UTC");
/// assert_eq!(start.to_rfc3339(), "2025-03-01T08:30:00+00:00");
/// assert!(parse_start_time("next tuesday").is_none());
/// ```
#[must_use]
pub fn parse_start_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// Resolve the departure time, falling back to now for missing or
/// unparsable input.
#[must_use]
pub fn resolve_start_time(raw: Option<&str>) -> DateTime<Utc> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => parse_start_time(value).unwrap_or_else(|| {
            warn!("unparsable start time {value:?}; departing now");
            Utc::now()
        }),
        None => {
            warn!("no start time supplied; departing now");
            Utc::now()
        }
    }
}

fn hours_to_delta(hours: f64) -> TimeDelta {
    if !hours.is_finite() || hours <= 0.0 {
        return TimeDelta::zero();
    }
    TimeDelta::try_milliseconds((hours * 3_600_000.0).round() as i64).unwrap_or(TimeDelta::MAX)
}

/// Builds the timed itinerary for a visiting order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EtaScheduler {
    average_speed_kmh: f64,
    port_stay: TimeDelta,
}

impl EtaScheduler {
    /// Schedule at `average_speed_kmh`, staying `port_stay_hours` at each stop.
    #[must_use]
    pub fn new(average_speed_kmh: f64, port_stay_hours: f64) -> Self {
        Self {
            average_speed_kmh,
            port_stay: hours_to_delta(port_stay_hours),
        }
    }

    fn leg_hours(&self, distance_km: f64) -> f64 {
        if self.average_speed_kmh.is_finite() && self.average_speed_kmh > 0.0 {
            distance_km / self.average_speed_kmh
        } else {
            0.0
        }
    }

    /// One entry per stop in `order`, departing stop 0 at `start`.
    #[must_use]
    pub fn schedule(
        &self,
        stops: &[Stop],
        matrix: &DistanceMatrix,
        order: &[usize],
        start: DateTime<Utc>,
    ) -> Vec<EtaEntry> {
        let mut clock = start;
        let mut previous = 0;
        let mut entries = Vec::with_capacity(order.len());
        for &stop_index in order {
            let Some(stop) = stops.get(stop_index) else {
                warn!("skipping unknown stop index {stop_index} while scheduling");
                continue;
            };
            let leg_distance_km = matrix.distance_km(previous, stop_index);
            let leg_travel_hours = self.leg_hours(leg_distance_km);
            let sailing = hours_to_delta(leg_travel_hours).max(min_leg_advance());
            let arrival = advance(clock, sailing);
            let departure = advance(arrival, self.port_stay);
            entries.push(EtaEntry {
                stop_index,
                coordinates: stop.location,
                leg_distance_km,
                leg_travel_hours,
                arrival,
                departure,
            });
            clock = departure;
            previous = stop_index;
        }
        entries
    }
}

fn min_leg_advance() -> TimeDelta {
    TimeDelta::try_milliseconds(MIN_LEG_ADVANCE_MS).unwrap_or_else(TimeDelta::zero)
}

fn advance(clock: DateTime<Utc>, by: TimeDelta) -> DateTime<Utc> {
    clock.checked_add_signed(by).unwrap_or_else(|| {
        warn!("schedule overflowed the calendar at {clock}");
        clock
    })
}
