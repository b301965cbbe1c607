//! Response types for the maritime `route` endpoint.
//!
//! The service answers with a GeoJSON `Feature` whose properties carry the
//! route length and its units, and whose geometry is a `LineString` or
//! `MultiLineString` of `[lon, lat]` positions. Failures come back as a JSON
//! object with an `error` or `message` field instead of a feature.

use geo::Coord;
use portwise_core::geodesy::KM_PER_NAUTICAL_MILE;
use serde::Deserialize;

const KM_PER_STATUTE_MILE: f64 = 1.609_344;

/// Body of a `route` response.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// GeoJSON object type; `"Feature"` on success.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Route summary.
    pub properties: Option<RouteProperties>,
    /// Route path.
    pub geometry: Option<RouteGeometry>,
    /// Error text reported by some deployments.
    pub error: Option<String>,
    /// Error text reported by other deployments.
    pub message: Option<String>,
}

impl RouteResponse {
    /// Whether the body is a GeoJSON feature.
    #[must_use]
    pub fn is_feature(&self) -> bool {
        self.kind.as_deref() == Some("Feature")
    }

    /// Error text carried by a failed response, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

/// `properties` of a route feature.
#[derive(Debug, Deserialize)]
pub struct RouteProperties {
    /// Route length in `units`.
    pub length: Option<f64>,
    /// Length units; kilometres when absent.
    pub units: Option<String>,
}

impl RouteProperties {
    /// Route length in kilometres, or `None` when the length is missing,
    /// invalid, or in unknown units.
    #[must_use]
    pub fn length_km(&self) -> Option<f64> {
        let length = self.length.filter(|len| len.is_finite() && *len >= 0.0)?;
        let factor = units_to_km(self.units.as_deref().unwrap_or("km"))?;
        Some(length * factor)
    }
}

/// Kilometres per unit for the unit names the service may report.
#[must_use]
pub fn units_to_km(units: &str) -> Option<f64> {
    match units.trim().to_ascii_lowercase().as_str() {
        "" | "km" | "kilometers" | "kilometres" => Some(1.0),
        "nm" | "naut" | "nauticalmiles" | "nautical miles" => Some(KM_PER_NAUTICAL_MILE),
        "mi" | "miles" => Some(KM_PER_STATUTE_MILE),
        "m" | "meters" | "metres" => Some(0.001),
        _ => None,
    }
}

/// Route path geometry.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum RouteGeometry {
    /// Single polyline of `[lon, lat, ...]` positions.
    LineString {
        /// Positions.
        coordinates: Vec<Vec<f64>>,
    },
    /// Several polylines, typically split at the antimeridian.
    MultiLineString {
        /// Position lists.
        coordinates: Vec<Vec<Vec<f64>>>,
    },
}

impl RouteGeometry {
    /// Flatten into one polyline, dropping malformed positions.
    #[must_use]
    pub fn into_coords(self) -> Vec<Coord<f64>> {
        let positions: Vec<Vec<f64>> = match self {
            Self::LineString { coordinates } => coordinates,
            Self::MultiLineString { coordinates } => coordinates.into_iter().flatten().collect(),
        };
        positions
            .into_iter()
            .filter_map(|position| match position.as_slice() {
                [lon, lat, ..] if lon.is_finite() && lat.is_finite() => {
                    Some(Coord { x: *lon, y: *lat })
                }
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn deserialises_line_string_feature() {
        let json = r#"{
            "type": "Feature",
            "properties": {"length": 100.0, "units": "nm"},
            "geometry": {"type": "LineString", "coordinates": [[4.4, 51.9], [3.0, 51.5, 0.0]]}
        }"#;
        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");
        assert!(response.is_feature());
        let length = response.properties.as_ref().and_then(RouteProperties::length_km);
        assert!((length.expect("length") - 185.2).abs() < 1e-9);
        let coords = response.geometry.expect("geometry").into_coords();
        assert_eq!(coords, vec![Coord { x: 4.4, y: 51.9 }, Coord { x: 3.0, y: 51.5 }]);
    }

    #[rstest]
    fn flattens_multi_line_strings() {
        let json = r#"{"type": "MultiLineString", "coordinates": [[[170.0, 10.0], [180.0, 11.0]], [[-180.0, 11.0], [-170.0, 12.0]]]}"#;
        let geometry: RouteGeometry = serde_json::from_str(json).expect("should deserialise");
        assert_eq!(geometry.into_coords().len(), 4);
    }

    #[rstest]
    fn error_bodies_are_not_features() {
        let response: RouteResponse =
            serde_json::from_str(r#"{"error": "no route found"}"#).expect("should deserialise");
        assert!(!response.is_feature());
        assert_eq!(response.error_message(), Some("no route found"));
    }

    #[rstest]
    #[case("km", Some(1.0))]
    #[case("NM", Some(KM_PER_NAUTICAL_MILE))]
    #[case("mi", Some(KM_PER_STATUTE_MILE))]
    #[case("m", Some(0.001))]
    #[case("furlongs", None)]
    fn converts_units(#[case] units: &str, #[case] expected: Option<f64>) {
        assert_eq!(units_to_km(units), expected);
    }

    #[rstest]
    fn missing_units_default_to_kilometres() {
        let properties = RouteProperties {
            length: Some(42.0),
            units: None,
        };
        assert_eq!(properties.length_km(), Some(42.0));
    }
}
