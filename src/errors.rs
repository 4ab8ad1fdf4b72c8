use thiserror::Error;


/// Invalid graph or solver input.
///
/// An unreachable target is not an error: the solvers report it as a
/// defined outcome (`Ok(None)`) rather than through this enum.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A node id was referenced that is not a key of the graph.
    #[error("node {node} is not part of the graph")]
    UnknownNode { node: String },

    /// A negative primary weight was encountered; shortest-path
    /// correctness requires non-negative weights.
    #[error("negative weight on edge {from} -> {to}")]
    NegativeWeight { from: String, to: String },
}

impl GraphError {
    pub(crate) fn unknown<N: std::fmt::Debug>(node: &N) -> Self {
        GraphError::UnknownNode {
            node: format!("{node:?}"),
        }
    }

    pub(crate) fn negative<N: std::fmt::Debug>(from: &N, to: &N) -> Self {
        GraphError::NegativeWeight {
            from: format!("{from:?}"),
            to: format!("{to:?}"),
        }
    }
}


/// Route-graph construction and spatial lookup failures.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A polyline needs at least two points to form an edge.
    #[error("polyline must contain at least two points")]
    PolylineTooShort,

    /// A maneuver list with no entries cannot produce a graph.
    #[error("route contains no maneuvers")]
    NoManeuvers,

    /// Combining requires at least one route.
    #[error("cannot combine an empty set of routes")]
    NoRoutes,

    /// A route graph's nodes do not form a connected chain.
    #[error("route {label} is not a connected chain")]
    BrokenChain { label: String },

    /// The graph holds no nodes with a geographic position.
    #[error("graph contains no positioned nodes")]
    NoPositionedNodes,

    #[error("spatial index error: {0}")]
    KdTree(String),

    /// Graph construction failure while assembling a route graph.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl From<kdtree::ErrorKind> for RouteError {
    fn from(error: kdtree::ErrorKind) -> Self {
        RouteError::KdTree(error.to_string())
    }
}
