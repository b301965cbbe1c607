//! Great-circle helpers shared by the distance engine and the corridor
//! navigator.
//!
//! Coordinates follow the `geo` convention used across the workspace:
//! `x` holds the longitude and `y` the latitude, both in decimal degrees.

use geo::{Coord, Distance, Haversine, Point};

/// Kilometres in one nautical mile; one knot is this many km/h.
pub const KM_PER_NAUTICAL_MILE: f64 = 1.852;

/// Haversine distance between two coordinates in kilometres.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use portwise_core::geodesy::haversine_km;
///
/// let singapore = Coord { x: 103.85, y: 1.29 };
/// assert!(haversine_km(singapore, singapore).abs() < f64::EPSILON);
/// ```
#[must_use]
pub fn haversine_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    Haversine.distance(Point::from(from), Point::from(to)) / 1000.0
}

/// Two-point geometry used whenever no routed path is available.
#[must_use]
pub fn straight_line(from: Coord<f64>, to: Coord<f64>) -> Vec<Coord<f64>> {
    vec![from, to]
}

/// Serde helpers that write coordinates as `[lat, lon]` pairs.
///
/// Map clients expect latitude first, whereas `geo` stores longitude in `x`.
pub mod latlon {
    use geo::Coord;
    use serde::de::{Deserialize, Deserializer};
    use serde::ser::{SerializeSeq, Serializer};

    /// Serialize a polyline as a sequence of `[lat, lon]` arrays.
    ///
    /// # Errors
    /// Propagates serializer failures.
    pub fn serialize<S>(coords: &[Coord<f64>], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(coords.len()))?;
        for coord in coords {
            seq.serialize_element(&[coord.y, coord.x])?;
        }
        seq.end()
    }

    /// Deserialize a polyline from a sequence of `[lat, lon]` arrays.
    ///
    /// # Errors
    /// Propagates deserializer failures.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Coord<f64>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let pairs = Vec::<[f64; 2]>::deserialize(deserializer)?;
        Ok(pairs
            .into_iter()
            .map(|[lat, lon]| Coord { x: lon, y: lat })
            .collect())
    }

    /// Single-coordinate variant of the `[lat, lon]` encoding.
    pub mod point {
        use geo::Coord;
        use serde::de::{Deserialize, Deserializer};
        use serde::ser::{Serialize, Serializer};

        /// Serialize one coordinate as `[lat, lon]`.
        ///
        /// # Errors
        /// Propagates serializer failures.
        pub fn serialize<S>(coord: &Coord<f64>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            [coord.y, coord.x].serialize(serializer)
        }

        /// Deserialize one coordinate from `[lat, lon]`.
        ///
        /// # Errors
        /// Propagates deserializer failures.
        pub fn deserialize<'de, D>(deserializer: D) -> Result<Coord<f64>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let [lat, lon] = <[f64; 2]>::deserialize(deserializer)?;
            Ok(Coord { x: lon, y: lat })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Textbook haversine on the mean Earth radius used by `geo`.
    fn reference_haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
        let radius_km = 6_371.008_8;
        let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
        let d_phi = (lat2 - lat1).to_radians();
        let d_lambda = (lon2 - lon1).to_radians();
        let a = (d_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
        2.0 * radius_km * a.sqrt().asin()
    }

    #[rstest]
    fn matches_reference_for_nearby_singapore_points() {
        let from = Coord { x: 103.85, y: 1.29 };
        let to = Coord { x: 103.82, y: 1.35 };
        let expected = reference_haversine_km(1.29, 103.85, 1.35, 103.82);
        let actual = haversine_km(from, to);
        assert!((actual - expected).abs() < 0.01, "{actual} vs {expected}");
        assert!((7.0..8.0).contains(&actual), "expected ~7 km, got {actual}");
    }

    #[rstest]
    #[case(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 })]
    #[case(Coord { x: -0.1, y: 51.5 }, Coord { x: 4.4, y: 51.9 })]
    fn distance_is_symmetric(#[case] a: Coord<f64>, #[case] b: Coord<f64>) {
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
    }

    #[rstest]
    fn latlon_round_trips_through_json() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Line {
            #[serde(with = "latlon")]
            points: Vec<Coord<f64>>,
        }

        let line = Line {
            points: vec![Coord { x: 103.85, y: 1.29 }],
        };
        let json = serde_json::to_string(&line).expect("serialize");
        assert_eq!(json, r#"{"points":[[1.29,103.85]]}"#);
        let back: Line = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.points, line.points);
    }
}
