use crate::collections::FxIndexMap;
use crate::errors::GraphError;
use crate::geometry::GeoPoint;

use std::fmt::Debug;
use std::hash::Hash;


/// Caller-attached node data, not interpreted by the solvers
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeMeta {
    /// Geographic position, set by the route builders
    pub position: Option<GeoPoint>,
    /// Free-form label, e.g. a turn-by-turn narrative
    pub label: Option<String>,
}


#[derive(Clone, Debug)]
struct Node<N, W> {
    meta: NodeMeta,
    edges: FxIndexMap<N, W>,
}

impl<N, W> Node<N, W> {
    fn new() -> Self {
        Self {
            meta: NodeMeta::default(),
            edges: FxIndexMap::default(),
        }
    }
}


/// Weighted graph stored as an insertion-ordered adjacency map
///
/// Storage is directional; `connect` inserts the symmetric pair for the
/// undirected graphs the route builders produce. Every edge endpoint must
/// already be a node of the graph. Node iteration follows insertion order,
/// which is the tie-break order of the scan solver.
#[derive(Clone, Debug, Default)]
pub struct Graph<N, W> {
    nodes: FxIndexMap<N, Node<N, W>>,
}

impl<N, W> Graph<N, W>
where
    N: Eq + Hash + Clone + Debug,
{
    pub fn new() -> Self {
        Self {
            nodes: FxIndexMap::default(),
        }
    }

    /// Insert a node if it does not exist yet
    /// Returns its metadata for optional decoration
    pub fn add_node(&mut self, id: N) -> &mut NodeMeta {
        &mut self.nodes.entry(id).or_insert_with(Node::new).meta
    }

    /// Insert a directed edge between two existing nodes
    /// An existing edge between the same pair is overwritten
    pub fn add_edge(&mut self, from: &N, to: &N, weight: W) -> Result<(), GraphError> {
        if !self.nodes.contains_key(to) {
            return Err(GraphError::unknown(to));
        }
        match self.nodes.get_mut(from) {
            Some(node) => {
                node.edges.insert(to.clone(), weight);
                Ok(())
            }
            None => Err(GraphError::unknown(from)),
        }
    }

    /// Insert the symmetric edge pair a -> b and b -> a with equal weight
    pub fn connect(&mut self, a: &N, b: &N, weight: W) -> Result<(), GraphError>
    where
        W: Clone,
    {
        self.add_edge(a, b, weight.clone())?;
        self.add_edge(b, a, weight)
    }

    /// Outgoing edges of a node; empty for an unknown id
    pub fn neighbors(&self, id: &N) -> impl Iterator<Item = (&N, &W)> {
        self.nodes
            .get(id)
            .into_iter()
            .flat_map(|node| node.edges.iter())
    }

    /// Weight of the directed edge from -> to, if present
    pub fn edge(&self, from: &N, to: &N) -> Option<&W> {
        self.nodes.get(from).and_then(|node| node.edges.get(to))
    }

    pub fn meta(&self, id: &N) -> Option<&NodeMeta> {
        self.nodes.get(id).map(|node| &node.meta)
    }

    pub fn contains(&self, id: &N) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of directed edges
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|node| node.edges.len()).sum()
    }

    /// Nodes with their metadata, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&N, &NodeMeta)> {
        self.nodes.iter().map(|(id, node)| (id, &node.meta))
    }

    /// Node ids in insertion order
    pub fn node_ids(&self) -> impl Iterator<Item = &N> {
        self.nodes.keys()
    }

    /// Position of a node id in insertion order
    pub fn index_of(&self, id: &N) -> Option<usize> {
        self.nodes.get_index_of(id)
    }

    /// Node id at an insertion-order position
    pub fn node_at(&self, index: usize) -> Option<&N> {
        self.nodes.get_index(index).map(|(id, _)| id)
    }
}
