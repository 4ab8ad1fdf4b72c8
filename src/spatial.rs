use crate::errors::RouteError;
use crate::geometry::GeoPoint;
use crate::graph::Graph;

use std::fmt::Debug;
use std::hash::Hash;

use kdtree::KdTree;
use kdtree::distance::squared_euclidean;
use tracing::debug;


/// Nearest-node lookup over the positioned nodes of a graph
///
/// Snaps a raw coordinate (e.g. a map click) to the closest node id so the
/// caller can hand it to a solver. Queries compare squared offsets in
/// degrees, which is adequate at route scale.
pub struct NodeLocator<N> {
    tree: KdTree<f64, usize, [f64; 2]>,
    ids: Vec<N>,
}

impl<N> NodeLocator<N>
where
    N: Eq + Hash + Clone + Debug,
{
    /// Index every node of the graph that carries a position
    pub fn build<W>(graph: &Graph<N, W>) -> Result<Self, RouteError> {
        let mut tree = KdTree::new(2);
        let mut ids = Vec::new();

        for (id, meta) in graph.iter() {
            if let Some(position) = meta.position {
                tree.add([position.lat, position.lon], ids.len())?;
                ids.push(id.clone());
            }
        }

        if ids.is_empty() {
            return Err(RouteError::NoPositionedNodes);
        }

        debug!(nodes = ids.len(), "built node locator");

        Ok(Self { tree, ids })
    }

    /// Id of the node closest to the point
    pub fn nearest(&self, point: &GeoPoint) -> Result<&N, RouteError> {
        let found = self
            .tree
            .nearest(&[point.lat, point.lon], 1, &squared_euclidean)?;

        match found.first() {
            Some(&(_, &index)) => Ok(&self.ids[index]),
            None => Err(RouteError::NoPositionedNodes),
        }
    }
}
