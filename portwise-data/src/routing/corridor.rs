//! Waypoint-graph navigation along named sea corridors.
//!
//! The built-in corridor graph is constant data, built once per process and
//! shared read-only by every navigator. Each query works on a private copy
//! with two temporary nodes for the leg's endpoints, so concurrent queries
//! never contend.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use geo::Coord;
use log::warn;
use petgraph::algo::astar;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use portwise_core::geodesy::haversine_km;
use portwise_core::{Leg, LegRouter, LegSource, RoutingError};
use thiserror::Error;

use super::corridor_network::{CORRIDOR_LANES, CORRIDOR_NODES};

/// Corridor nodes each leg endpoint is attached to.
pub const ENDPOINT_LINKS: usize = 3;

static BUILTIN_GRAPH: LazyLock<Arc<CorridorGraph>> =
    LazyLock::new(|| Arc::new(CorridorGraph::builtin()));

/// Problems found while assembling a corridor graph from tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorridorGraphError {
    /// Two nodes share a name.
    #[error("corridor node {0:?} is defined more than once")]
    DuplicateNode(String),
    /// A lane refers to a node that was never defined.
    #[error("corridor lane refers to unknown node {0:?}")]
    UnknownNode(String),
    /// A node's position is not a valid latitude/longitude.
    #[error("corridor node {0:?} has an invalid position")]
    InvalidPosition(String),
}

/// Read-only graph of corridor waypoints joined by sea lanes.
///
/// Lanes are stored as a pair of directed edges weighted by the great-circle
/// distance between their endpoints.
#[derive(Debug, Clone, Default)]
pub struct CorridorGraph {
    graph: DiGraph<Coord<f64>, f64>,
}

impl CorridorGraph {
    /// Assemble a graph from `(name, lat, lon)` nodes and `(name, name)`
    /// lanes.
    ///
    /// # Errors
    /// Returns [`CorridorGraphError`] for duplicate names, unknown lane
    /// endpoints, or invalid positions.
    pub fn from_tables(
        nodes: &[(&str, f64, f64)],
        lanes: &[(&str, &str)],
    ) -> Result<Self, CorridorGraphError> {
        let mut graph = DiGraph::with_capacity(nodes.len(), lanes.len() * 2);
        let mut index_by_name: HashMap<&str, NodeIndex> = HashMap::with_capacity(nodes.len());

        for &(name, lat, lon) in nodes {
            let valid = lat.is_finite()
                && lon.is_finite()
                && (-90.0..=90.0).contains(&lat)
                && (-180.0..=180.0).contains(&lon);
            if !valid {
                return Err(CorridorGraphError::InvalidPosition(name.to_owned()));
            }
            if index_by_name.contains_key(name) {
                return Err(CorridorGraphError::DuplicateNode(name.to_owned()));
            }
            let index = graph.add_node(Coord { x: lon, y: lat });
            index_by_name.insert(name, index);
        }

        let lookup = |name: &str| {
            index_by_name
                .get(name)
                .copied()
                .ok_or_else(|| CorridorGraphError::UnknownNode(name.to_owned()))
        };
        for &(a, b) in lanes {
            let (a, b) = (lookup(a)?, lookup(b)?);
            let weight = haversine_km(graph[a], graph[b]);
            graph.add_edge(a, b, weight);
            graph.add_edge(b, a, weight);
        }

        Ok(Self { graph })
    }

    /// The built-in global corridor network.
    ///
    /// An invalid built-in table is logged and yields an empty graph, which
    /// makes every query fall back to great-circle legs.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_tables(CORRIDOR_NODES, CORRIDOR_LANES).unwrap_or_else(|err| {
            log::error!("built-in corridor network is invalid: {err}");
            Self::default()
        })
    }

    /// Number of corridor waypoints.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of undirected sea lanes.
    #[must_use]
    pub fn lane_count(&self) -> usize {
        self.graph.edge_count() / 2
    }

    /// Up to `k` waypoints closest to `at`, nearest first.
    fn nearest(&self, at: Coord<f64>, k: usize) -> Vec<(NodeIndex, f64)> {
        let mut by_distance: Vec<(NodeIndex, f64)> = self
            .graph
            .node_indices()
            .map(|index| (index, haversine_km(at, self.graph[index])))
            .collect();
        by_distance.sort_by(|lhs, rhs| lhs.1.total_cmp(&rhs.1));
        by_distance.truncate(k);
        by_distance
    }

    /// Shortest corridor path from `from` to `to`.
    ///
    /// `from` joins the graph through one-way links to its nearest
    /// waypoints; `to` joins through two-way links. Returns the path length
    /// and the polyline from `from` to `to`, or `None` when no path exists.
    #[must_use]
    pub fn shortest_path(&self, from: Coord<f64>, to: Coord<f64>) -> Option<(f64, Vec<Coord<f64>>)> {
        let start_links = self.nearest(from, ENDPOINT_LINKS);
        let end_links = self.nearest(to, ENDPOINT_LINKS);

        let mut graph = self.graph.clone();
        let start = graph.add_node(from);
        let end = graph.add_node(to);
        for (node, distance) in start_links {
            graph.add_edge(start, node, distance);
        }
        for (node, distance) in end_links {
            graph.add_edge(end, node, distance);
            graph.add_edge(node, end, distance);
        }

        let (cost, path) = astar(
            &graph,
            start,
            |node| node == end,
            |edge| *edge.weight(),
            |node| haversine_km(graph[node], to),
        )?;
        Some((cost, path.into_iter().map(|node| graph[node]).collect()))
    }
}

/// [`LegRouter`] that sails along the corridor graph.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use portwise_data::routing::CorridorNavigator;
///
/// let navigator = CorridorNavigator::new();
/// let leg = navigator.navigate(Coord { x: 4.4, y: 51.9 }, Coord { x: 103.85, y: 1.29 });
/// assert!(leg.distance_km > 15_000.0);
/// ```
#[derive(Debug, Clone)]
pub struct CorridorNavigator {
    graph: Arc<CorridorGraph>,
}

impl Default for CorridorNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl CorridorNavigator {
    /// Navigator over the shared built-in network.
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: Arc::clone(&BUILTIN_GRAPH),
        }
    }

    /// Navigator over a caller-supplied network.
    #[must_use]
    pub fn with_graph(graph: CorridorGraph) -> Self {
        Self {
            graph: Arc::new(graph),
        }
    }

    /// Route a leg, falling back to a great-circle line when the graph has
    /// no path.
    #[must_use]
    pub fn navigate(&self, from: Coord<f64>, to: Coord<f64>) -> Leg {
        self.route_leg(from, to).unwrap_or_else(|err| {
            warn!("corridor navigation failed, using great-circle line: {err}");
            Leg::great_circle(from, to)
        })
    }
}

impl LegRouter for CorridorNavigator {
    fn route_leg(&self, from: Coord<f64>, to: Coord<f64>) -> Result<Leg, RoutingError> {
        let (distance_km, geometry) = self
            .graph
            .shortest_path(from, to)
            .ok_or(RoutingError::NoPath { from, to })?;
        Ok(Leg::new(distance_km, geometry, LegSource::Corridor))
    }
}
