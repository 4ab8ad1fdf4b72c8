use crate::errors::RouteError;
use crate::geometry::{GeoPoint, haversine};
use crate::graph::Graph;

use std::ops::Add;
use num_traits::Zero;
use tracing::debug;


/// Edge weight of a route graph
///
/// `distance` (road meters) is the primary cost the solvers minimize;
/// `direct` (straight-line meters) and `duration` (seconds) accumulate in
/// lockstep along the same path but never drive a relaxation on their own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeWeight {
    /// Road distance in meters
    pub distance: u64,
    /// Straight-line distance in meters
    pub direct: u64,
    /// Travel time in seconds
    pub duration: u64,
}

impl EdgeWeight {
    pub fn new(distance: u64, direct: u64, duration: u64) -> Self {
        Self {
            distance,
            direct,
            duration,
        }
    }

    /// Extraction rule for the solvers: road distance is the cost
    pub fn road_distance(weight: &EdgeWeight) -> u64 {
        weight.distance
    }
}

impl Add for EdgeWeight {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            distance: self.distance + other.distance,
            direct: self.direct + other.direct,
            duration: self.duration + other.duration,
        }
    }
}

impl Zero for EdgeWeight {
    fn zero() -> Self {
        Self::default()
    }

    fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}


/// One instruction of a turn-by-turn route
#[derive(Clone, Debug, PartialEq)]
pub struct Maneuver {
    /// Where the instruction begins
    pub position: GeoPoint,
    /// Road meters covered until the next maneuver
    pub distance: u64,
    /// Seconds spent until the next maneuver
    pub duration: u64,
    /// Human-readable instruction
    pub narrative: Option<String>,
}


/// A graph derived from route data, with its terminal node ids
#[derive(Clone, Debug)]
pub struct RouteGraph {
    pub graph: Graph<String, EdgeWeight>,
    pub start: String,
    pub end: String,
}


/// Build a route graph by sampling an ordered polyline
///
/// Keeps roughly `target_nodes` evenly spaced points (the last point is
/// always kept) and weights each edge with the summed length of the raw
/// segments between the sampled indices, so the graph preserves the route's
/// true length instead of the straight-line distance between samples.
/// Edges are inserted symmetrically; durations are unknown here and stay
/// zero.
pub fn from_polyline(points: &[GeoPoint], target_nodes: usize) -> Result<RouteGraph, RouteError> {
    if points.len() < 2 {
        return Err(RouteError::PolylineTooShort);
    }

    let sample_rate = (points.len() / target_nodes.max(1)).max(1);

    let mut sampled: Vec<usize> = (0..points.len()).step_by(sample_rate).collect();
    if sampled[sampled.len() - 1] != points.len() - 1 {
        sampled.push(points.len() - 1);
    }

    let mut graph = Graph::new();
    for &index in &sampled {
        graph.add_node(format!("node_{index}")).position = Some(points[index]);
    }

    for pair in sampled.windows(2) {
        let (from_index, to_index) = (pair[0], pair[1]);

        // Length along the raw polyline between the two sampled indices
        let distance: f64 = points[from_index..=to_index]
            .windows(2)
            .map(|segment| haversine(&segment[0], &segment[1]))
            .sum();

        let weight = EdgeWeight::new(
            distance.round() as u64,
            haversine(&points[from_index], &points[to_index]).round() as u64,
            0,
        );
        graph.connect(
            &format!("node_{from_index}"),
            &format!("node_{to_index}"),
            weight,
        )?;
    }

    debug!(
        nodes = sampled.len(),
        points = points.len(),
        "sampled polyline into route graph"
    );

    Ok(RouteGraph {
        graph,
        start: "node_0".to_string(),
        end: format!("node_{}", points.len() - 1),
    })
}


/// Build a route graph from a turn-by-turn maneuver list
///
/// One node per maneuver start point plus a final destination node. Each
/// edge carries the maneuver's road distance and duration together with the
/// straight-line length of the leg; narratives become node labels. Edges
/// are inserted symmetrically.
pub fn from_maneuvers(
    maneuvers: &[Maneuver],
    destination: GeoPoint,
) -> Result<RouteGraph, RouteError> {
    if maneuvers.is_empty() {
        return Err(RouteError::NoManeuvers);
    }

    let mut graph = Graph::new();
    let mut ids = Vec::with_capacity(maneuvers.len() + 1);

    for (index, maneuver) in maneuvers.iter().enumerate() {
        let id = format!("maneuver_{index}");
        let meta = graph.add_node(id.clone());
        meta.position = Some(maneuver.position);
        meta.label = maneuver.narrative.clone();
        ids.push(id);
    }

    let destination_id = "destination".to_string();
    graph.add_node(destination_id.clone()).position = Some(destination);
    ids.push(destination_id);

    // Each maneuver's distance and duration describe the leg to its successor
    let mut positions: Vec<GeoPoint> = maneuvers.iter().map(|m| m.position).collect();
    positions.push(destination);

    for (index, maneuver) in maneuvers.iter().enumerate() {
        let weight = EdgeWeight::new(
            maneuver.distance,
            haversine(&positions[index], &positions[index + 1]).round() as u64,
            maneuver.duration,
        );
        graph.connect(&ids[index], &ids[index + 1], weight)?;
    }

    debug!(nodes = graph.len(), "built route graph from maneuvers");

    Ok(RouteGraph {
        graph,
        start: "maneuver_0".to_string(),
        end: "destination".to_string(),
    })
}


/// Splice several labeled route alternatives into a single graph
///
/// The terminal nodes of every route collapse into shared START/END nodes
/// (positioned from the first route) and intermediate ids are prefixed with
/// the route label so alternatives stay disjoint; a solve over the result
/// picks the globally best alternative. Expects graphs whose nodes were
/// inserted in path order, as the builders produce. When two alternatives
/// contribute an edge between the same pair of nodes the cheaper road
/// distance is kept.
pub fn combine_routes(routes: &[(String, RouteGraph)]) -> Result<RouteGraph, RouteError> {
    let Some((_, first)) = routes.first() else {
        return Err(RouteError::NoRoutes);
    };

    let start_id = "START".to_string();
    let end_id = "END".to_string();

    let mut graph: Graph<String, EdgeWeight> = Graph::new();
    graph.add_node(start_id.clone()).position =
        first.graph.meta(&first.start).and_then(|meta| meta.position);
    graph.add_node(end_id.clone()).position =
        first.graph.meta(&first.end).and_then(|meta| meta.position);

    for (label, route) in routes {
        let chain: Vec<&String> = route.graph.node_ids().collect();

        // Terminal nodes map to the shared ids, the rest get prefixed
        let mapped: Vec<String> = chain
            .iter()
            .enumerate()
            .map(|(index, id)| {
                if index == 0 {
                    start_id.clone()
                } else if index == chain.len() - 1 {
                    end_id.clone()
                } else {
                    format!("{label}_{id}")
                }
            })
            .collect();

        for (index, id) in chain.iter().enumerate() {
            if index == 0 || index == chain.len() - 1 {
                continue;
            }
            let meta = route.graph.meta(id).cloned().unwrap_or_default();
            *graph.add_node(mapped[index].clone()) = meta;
        }

        for index in 0..chain.len().saturating_sub(1) {
            let weight = *route
                .graph
                .edge(chain[index], chain[index + 1])
                .ok_or_else(|| RouteError::BrokenChain {
                    label: label.clone(),
                })?;

            let merged = match graph.edge(&mapped[index], &mapped[index + 1]) {
                Some(existing) if existing.distance <= weight.distance => *existing,
                _ => weight,
            };
            graph.connect(&mapped[index], &mapped[index + 1], merged)?;
        }
    }

    debug!(
        routes = routes.len(),
        nodes = graph.len(),
        edges = graph.edge_count(),
        "combined route graphs"
    );

    Ok(RouteGraph {
        graph,
        start: start_id,
        end: end_id,
    })
}
