//! Pairwise legs between the stops of one request.

use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::geodesy::{haversine_km, latlon, straight_line};

/// Where a leg's distance and geometry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegSource {
    /// Answered by an external maritime-routing service.
    Maritime,
    /// Found on the corridor waypoint graph.
    Corridor,
    /// Straight great-circle line, used for short hops and fallbacks.
    GreatCircle,
}

/// Sea distance and path between two stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    /// Distance sailed in kilometres.
    pub distance_km: f64,
    /// Polyline from the leg's start to its end.
    #[serde(with = "latlon")]
    pub geometry: Vec<Coord<f64>>,
    /// Method that produced the leg.
    pub source: LegSource,
}

impl Leg {
    /// Build a leg from an explicit distance and geometry.
    #[must_use]
    pub const fn new(distance_km: f64, geometry: Vec<Coord<f64>>, source: LegSource) -> Self {
        Self {
            distance_km,
            geometry,
            source,
        }
    }

    /// Straight great-circle leg between two coordinates.
    #[must_use]
    pub fn great_circle(from: Coord<f64>, to: Coord<f64>) -> Self {
        Self::new(
            haversine_km(from, to),
            straight_line(from, to),
            LegSource::GreatCircle,
        )
    }

    /// Zero-length leg used on the matrix diagonal.
    #[must_use]
    pub fn stationary(at: Coord<f64>) -> Self {
        Self::new(0.0, vec![at], LegSource::GreatCircle)
    }

    /// The same leg sailed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut geometry = self.geometry.clone();
        geometry.reverse();
        Self::new(self.distance_km, geometry, self.source)
    }
}

/// Symmetric `n x n` table of legs.
///
/// `leg(i, j)` runs from stop `i` to stop `j`; its mirror `leg(j, i)` has the
/// same distance and the reversed geometry. Diagonal cells are stationary.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    legs: Vec<Leg>,
}

impl DistanceMatrix {
    /// Assemble a matrix from the upper-triangle legs.
    ///
    /// `upper` yields `(i, j, leg)` for `i < j`; `locations` supplies the
    /// diagonal. Pairs that are missing fall back to great-circle legs so the
    /// matrix is always complete.
    #[must_use]
    pub fn from_upper<I>(locations: &[Coord<f64>], upper: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, Leg)>,
    {
        let size = locations.len();
        let mut cells: Vec<Option<Leg>> = vec![None; size * size];
        for (i, j, leg) in upper {
            if i >= j || j >= size {
                continue;
            }
            cells[j * size + i] = Some(leg.reversed());
            cells[i * size + j] = Some(leg);
        }
        let legs = cells
            .into_iter()
            .enumerate()
            .map(|(cell, leg)| {
                let (i, j) = (cell / size, cell % size);
                leg.unwrap_or_else(|| {
                    if i == j {
                        Leg::stationary(locations[i])
                    } else {
                        Leg::great_circle(locations[i], locations[j])
                    }
                })
            })
            .collect();
        Self { size, legs }
    }

    /// Matrix of great-circle legs only.
    #[must_use]
    pub fn great_circle(locations: &[Coord<f64>]) -> Self {
        Self::from_upper(locations, std::iter::empty())
    }

    /// Number of stops covered.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Leg from stop `i` to stop `j`, if both indices are in range.
    #[must_use]
    pub fn leg(&self, i: usize, j: usize) -> Option<&Leg> {
        if i >= self.size || j >= self.size {
            return None;
        }
        self.legs.get(i * self.size + j)
    }

    /// Distance from stop `i` to stop `j`; out-of-range pairs count as zero.
    #[must_use]
    pub fn distance_km(&self, i: usize, j: usize) -> f64 {
        self.leg(i, j).map_or(0.0, |leg| leg.distance_km)
    }

    /// Polyline for a voyage from stop 0 through `order`.
    ///
    /// Leg geometries are joined end to start; a join point shared by two
    /// consecutive legs appears once.
    #[must_use]
    pub fn voyage_geometry(&self, order: &[usize]) -> Vec<Coord<f64>> {
        let mut path: Vec<Coord<f64>> = Vec::new();
        let mut previous = 0;
        for &stop in order {
            if let Some(leg) = self.leg(previous, stop) {
                let skip = usize::from(path.last().is_some_and(|last| leg.geometry.first() == Some(last)));
                path.extend(leg.geometry.iter().skip(skip).copied());
            }
            previous = stop;
        }
        path
    }

    /// Iterate over every cell as `(i, j, leg)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Leg)> + '_ {
        self.legs
            .iter()
            .enumerate()
            .map(|(cell, leg)| (cell / self.size, cell % self.size, leg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn coords() -> Vec<Coord<f64>> {
        vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 1.0, y: 0.0 },
            Coord { x: 1.0, y: 1.0 },
        ]
    }

    #[rstest]
    fn mirrored_cell_reverses_geometry() {
        let locations = coords();
        let routed = Leg::new(
            500.0,
            vec![locations[0], Coord { x: 0.5, y: -0.5 }, locations[2]],
            LegSource::Corridor,
        );
        let matrix = DistanceMatrix::from_upper(&locations, [(0, 2, routed.clone())]);
        let back = matrix.leg(2, 0).expect("in range");
        assert_eq!(matrix.leg(0, 2), Some(&routed));
        assert_eq!(back.distance_km, 500.0);
        assert_eq!(back.geometry.first(), Some(&locations[2]));
        assert_eq!(back.geometry.last(), Some(&locations[0]));
        assert_eq!(back.source, LegSource::Corridor);
    }

    #[rstest]
    fn missing_pairs_fall_back_to_great_circle() {
        let locations = coords();
        let matrix = DistanceMatrix::great_circle(&locations);
        assert_eq!(matrix.size(), 3);
        for (i, j, leg) in matrix.iter() {
            if i == j {
                assert_eq!(leg.distance_km, 0.0);
            } else {
                assert!(leg.distance_km > 100.0);
                assert!((leg.distance_km - matrix.distance_km(j, i)).abs() < 1e-9);
            }
        }
    }

    #[rstest]
    fn out_of_range_lookups_are_empty() {
        let matrix = DistanceMatrix::great_circle(&coords());
        assert!(matrix.leg(3, 0).is_none());
        assert_eq!(matrix.distance_km(0, 7), 0.0);
    }

    #[rstest]
    fn voyage_geometry_joins_legs_once() {
        let locations = coords();
        let matrix = DistanceMatrix::great_circle(&locations);
        let path = matrix.voyage_geometry(&[2, 1]);
        assert_eq!(path, vec![locations[0], locations[2], locations[1]]);
    }

    #[rstest]
    fn serializes_geometry_latitude_first() {
        let leg = Leg::great_circle(Coord { x: 4.4, y: 51.9 }, Coord { x: -0.1, y: 51.5 });
        let json = serde_json::to_value(&leg).expect("serialize");
        assert_eq!(json["geometry"][0][0], 51.9);
        assert_eq!(json["source"], "great_circle");
    }
}
