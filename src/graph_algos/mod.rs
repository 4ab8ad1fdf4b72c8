
pub mod dijkstra;
pub mod replay;
mod shortest_path;

pub use dijkstra::dijkstra;
pub use replay::{Replay, ReplayStep, dijkstra_scan};

use crate::collections::FxIndexMap;

/// Type alias for the node map used by the heap solver
/// N: Node id on the graph
/// W: Weight record accumulated from the start
/// The tuple contains (parent_index, totals) where:
/// - parent_index is the index of the parent node in the map
///   (usize::MAX for the start node, which has no parent)
/// - totals is the weight record accumulated to reach this node
pub type GraphNodeMap<N, W> = FxIndexMap<N, (usize, W)>;


/// Result of a successful shortest-path computation
#[derive(Clone, Debug, PartialEq)]
pub struct ShortestPath<N, W, C> {
    /// Minimum primary cost from start to end
    pub cost: C,
    /// Full weight record accumulated along the path, auxiliary
    /// attributes included
    pub totals: W,
    /// Node ids from start to end inclusive
    pub path: Vec<N>,
}
