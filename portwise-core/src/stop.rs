//! Ports of call on a voyage.

use geo::Coord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A port or waypoint the vessel must visit.
///
/// The first stop of a request is the fixed origin; the remaining stops may be
/// visited in any order.
///
/// # Examples
///
/// ```
/// use portwise_core::Stop;
///
/// # fn main() -> Result<(), portwise_core::StopError> {
/// let stop = Stop::new(1.29, 103.85)?
///     .with_country("Singapore")
///     .with_congestion_index(40.0);
/// assert_eq!(stop.latitude(), 1.29);
/// assert_eq!(stop.country.as_deref(), Some("Singapore"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StopRecord", into = "StopRecord")]
pub struct Stop {
    /// Position with `x = longitude` and `y = latitude`.
    pub location: Coord<f64>,
    /// Display name of the port.
    pub name: Option<String>,
    /// Country or economy the port belongs to.
    pub country: Option<String>,
    /// Business-defined congestion score in `0..=100`.
    pub congestion_index: Option<f64>,
}

/// Errors returned when a coordinate cannot describe a place on Earth.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum StopError {
    /// Latitude or longitude was NaN or infinite.
    #[error("coordinates must be finite numbers")]
    NonFiniteCoordinate,
    /// Latitude fell outside `-90..=90`.
    #[error("latitude {0} is outside -90..=90")]
    LatitudeOutOfRange(f64),
    /// Longitude fell outside `-180..=180`.
    #[error("longitude {0} is outside -180..=180")]
    LongitudeOutOfRange(f64),
}

impl Stop {
    /// Validate and construct a stop from latitude and longitude.
    ///
    /// # Errors
    /// Returns [`StopError`] when either value is not finite or out of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, StopError> {
        let stop = Self {
            location: Coord {
                x: longitude,
                y: latitude,
            },
            name: None,
            country: None,
            congestion_index: None,
        };
        stop.validate()?;
        Ok(stop)
    }

    /// Attach a display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach the port's country.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Attach a congestion index.
    #[must_use]
    pub const fn with_congestion_index(mut self, index: f64) -> Self {
        self.congestion_index = Some(index);
        self
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }

    /// Check the coordinates; fields are public so callers may bypass
    /// [`Stop::new`].
    ///
    /// # Errors
    /// Returns [`StopError`] when the location is not a valid position.
    pub fn validate(&self) -> Result<(), StopError> {
        let Coord { x: lon, y: lat } = self.location;
        if !lat.is_finite() || !lon.is_finite() {
            return Err(StopError::NonFiniteCoordinate);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(StopError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(StopError::LongitudeOutOfRange(lon));
        }
        Ok(())
    }
}

/// Wire shape of a [`Stop`], using explicit latitude/longitude names.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StopRecord {
    latitude: f64,
    longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    country: Option<String>,
    #[serde(
        default,
        alias = "congestionIndex",
        skip_serializing_if = "Option::is_none"
    )]
    congestion_index: Option<f64>,
}

impl TryFrom<StopRecord> for Stop {
    type Error = StopError;

    fn try_from(record: StopRecord) -> Result<Self, Self::Error> {
        let stop = Self::new(record.latitude, record.longitude)?;
        Ok(Self {
            name: record.name,
            country: record.country,
            congestion_index: record.congestion_index,
            ..stop
        })
    }
}

impl From<Stop> for StopRecord {
    fn from(stop: Stop) -> Self {
        Self {
            latitude: stop.location.y,
            longitude: stop.location.x,
            name: stop.name,
            country: stop.country,
            congestion_index: stop.congestion_index,
        }
    }
}
