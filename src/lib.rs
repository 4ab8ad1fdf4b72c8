//! Route graph shortest path modules
//!
//! Builds weighted graphs out of route data - sampled polylines,
//! turn-by-turn maneuver lists, combined route alternatives - and computes
//! shortest paths over them with Dijkstra's algorithm, either in a single
//! call or step by step for callers that replay the computation.

mod collections;

pub mod errors;
pub mod geometry;
pub mod graph;
pub mod graph_algos;
pub mod route;
pub mod spatial;

pub use errors::{GraphError, RouteError};
pub use geometry::GeoPoint;
pub use graph::{Graph, NodeMeta};
pub use graph_algos::{Replay, ReplayStep, ShortestPath, dijkstra, dijkstra_scan};
pub use route::{EdgeWeight, Maneuver, RouteGraph, combine_routes, from_maneuvers, from_polyline};
pub use spatial::NodeLocator;
